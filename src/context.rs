//! Process-wide resolution configuration.
//!
//! A [`ModuleContext`] is built once per run and threaded by reference into
//! the resolver and assembler; nothing in the crate reads GOPATH or spawns
//! the toolchain after this point. Missing search roots or an undetermined
//! library root are precondition violations and fail the load; a missing
//! module descriptor only degrades resolution to path search.

use crate::error::{Error, Result};
use crate::toolchain::Toolchain;
use log::{debug, warn};
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Read-only configuration shared by every resolution during one run.
#[derive(Debug, Clone)]
pub struct ModuleContext {
    /// GOPATH entries, in environment order
    pub search_roots: Vec<PathBuf>,
    /// GOROOT
    pub library_root: PathBuf,
    /// `<projectRoot>/vendor`
    pub vendor_root: PathBuf,
    /// Absolute project root
    pub project_root: PathBuf,
    /// Module descriptor, when the toolchain could produce one
    pub descriptor: Option<ModuleDescriptor>,
}

/// Decoded output of the toolchain's module-edit query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ModuleDescriptor {
    pub module: ModuleRef,
    pub go: String,
    pub require: Vec<Requirement>,
    pub exclude: Vec<ModuleRef>,
    pub replace: Vec<Replacement>,
}

/// A module path plus version, as used in exclude and replace entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ModuleRef {
    pub path: String,
    pub version: String,
}

/// One requirement of the module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Requirement {
    pub path: String,
    pub version: String,
    pub indirect: bool,
}

/// One replacement rule. When several entries name the same `old` path, the
/// first one in descriptor order is the one that applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Replacement {
    pub old: ModuleRef,
    pub new: ModuleRef,
}

impl ModuleContext {
    /// Build the context for `project_root`: search roots from GOPATH, the
    /// library root from the toolchain, and a best-effort module descriptor.
    pub fn load(project_root: &Path, toolchain: &dyn Toolchain) -> Result<Self> {
        let gopath = std::env::var_os("GOPATH").unwrap_or_default();
        let search_roots = split_search_roots(&gopath);
        if search_roots.is_empty() {
            return Err(Error::Config(
                "GOPATH environment variable is not set or empty".to_string(),
            ));
        }

        let library_root = toolchain
            .library_root()
            .map_err(|e| Error::Config(format!("library root undetermined: {}", e)))?;

        let project_root = std::path::absolute(project_root)?;

        let descriptor = match toolchain.module_descriptor(&project_root) {
            Ok(descriptor) => {
                debug!("module descriptor loaded for {}", descriptor.module.path);
                Some(descriptor)
            }
            Err(e) => {
                warn!("module descriptor unavailable ({}), falling back to path search", e);
                None
            }
        };

        Ok(Self::new(search_roots, library_root, project_root, descriptor))
    }

    /// Assemble a context from already-known parts. Tests use this to avoid
    /// touching the environment or the toolchain.
    pub fn new(
        search_roots: Vec<PathBuf>,
        library_root: PathBuf,
        project_root: PathBuf,
        descriptor: Option<ModuleDescriptor>,
    ) -> Self {
        let vendor_root = project_root.join("vendor");
        Self {
            search_roots,
            library_root,
            vendor_root,
            project_root,
            descriptor,
        }
    }
}

/// Split a GOPATH-style value on the platform's path-list separator,
/// dropping empty entries.
pub fn split_search_roots(value: &OsStr) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}
