//! Queries against the Go toolchain.
//!
//! The resolver needs two facts only the toolchain can provide: where GOROOT
//! is, and what the project's module descriptor looks like. Both sit behind
//! the [`Toolchain`] trait so tests can substitute canned answers without
//! spawning a process.

use crate::context::ModuleDescriptor;
use crate::error::{Error, Result};
use log::debug;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Source of toolchain-derived configuration.
pub trait Toolchain {
    /// Absolute path of the built-in library root (GOROOT).
    fn library_root(&self) -> Result<PathBuf>;

    /// The project's module descriptor, as reported by the toolchain's
    /// module-edit query in `project_root`.
    fn module_descriptor(&self, project_root: &Path) -> Result<ModuleDescriptor>;
}

/// Production [`Toolchain`] backed by the `go` binary.
///
/// Every subprocess runs under a deadline; a query that outlives it is killed
/// and reported as a [`Error::Toolchain`], which the descriptor path treats
/// the same as any other failure.
pub struct GoToolchain {
    timeout: Duration,
}

impl GoToolchain {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `go` with the given args, returning trimmed stdout on success.
    fn run_go(&self, args: &[&str], cwd: Option<&Path>) -> Result<String> {
        debug!("running go {:?} (cwd: {:?})", args, cwd);

        let mut command = Command::new("go");
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let mut child = command
            .spawn()
            .map_err(|e| Error::Toolchain(format!("failed to run go: {}", e)))?;

        // Drain both pipes while waiting. A child whose output exceeds the
        // OS pipe buffer would otherwise block writing, never exit, and get
        // killed at the deadline with its valid output thrown away.
        let stdout_reader = drain_pipe(child.stdout.take());
        let stderr_reader = drain_pipe(child.stderr.take());

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::Toolchain(format!(
                        "go {:?} timed out after {:?}",
                        args, self.timeout
                    )));
                }
                Ok(None) => std::thread::sleep(Duration::from_millis(25)),
                Err(e) => {
                    return Err(Error::Toolchain(format!("failed to wait for go: {}", e)))
                }
            }
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();

        if !status.success() {
            return Err(Error::Toolchain(format!(
                "go {:?} exited with {}: {}",
                args,
                status,
                stderr.trim()
            )));
        }

        Ok(stdout.trim().to_string())
    }
}

/// Read a child pipe to the end on a background thread.
fn drain_pipe<R: Read + Send + 'static>(pipe: Option<R>) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buffer = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buffer);
        }
        buffer
    })
}

impl Default for GoToolchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolchain for GoToolchain {
    fn library_root(&self) -> Result<PathBuf> {
        // The GOROOT variable, when set, overrides the toolchain's own answer,
        // mirroring how the runtime reports it.
        if let Some(root) = std::env::var_os("GOROOT") {
            if !root.is_empty() {
                return Ok(PathBuf::from(root));
            }
        }
        let root = self.run_go(&["env", "GOROOT"], None)?;
        if root.is_empty() {
            return Err(Error::Toolchain("go env GOROOT reported nothing".to_string()));
        }
        Ok(PathBuf::from(root))
    }

    fn module_descriptor(&self, project_root: &Path) -> Result<ModuleDescriptor> {
        let output = self.run_go(&["mod", "edit", "-json"], Some(project_root))?;
        serde_json::from_str(&output)
            .map_err(|e| Error::Toolchain(format!("unparsable module descriptor: {}", e)))
    }
}
