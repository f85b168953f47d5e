//! OpenAPI-from-Go - static OpenAPI documentation from annotated Go projects.
//!
//! This library generates an OpenAPI 3.0 document from a Go project without
//! compiling or executing it. A designated manifest file seeds the document:
//! directives in its comments (`// @Title`, `// @Version`, ...) fill in the
//! Info and Servers sections, and its import list names the controller
//! packages whose sources are scanned for `@Router` operations. Packages are
//! located on disk the way the toolchain would locate them: vendor directory
//! first, then module-descriptor replacements, then each GOPATH entry, then
//! GOROOT.
//!
//! # Architecture
//!
//! 1. [`context`] - process-wide resolution configuration (GOPATH, GOROOT,
//!    vendor directory, module descriptor)
//! 2. [`toolchain`] - subprocess queries against the `go` binary, behind a
//!    trait so tests can fake them
//! 3. [`manifest`] - parses the manifest file's comments and imports
//! 4. [`directive`] - recognizes `@Tag value` directives in comment lines
//! 5. [`resolver`] - maps import paths to source directories
//! 6. [`extractor`] - turns resolved packages into Paths operations
//! 7. [`assembler`] - drives one run and accumulates the [`document::Document`]
//! 8. [`emitter`] - serializes the finished document to swagger.json/yaml
//!
//! # Example Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! openapi_from_go::parse(
//!     Path::new("./my-go-project"),
//!     Path::new("./my-go-project/swagger.go"),
//!     Path::new("./docs"),
//!     "yaml",
//! ).unwrap();
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete
//! CLI application.

pub mod assembler;
pub mod cli;
pub mod context;
pub mod directive;
pub mod document;
pub mod emitter;
pub mod error;
pub mod extractor;
pub mod manifest;
pub mod resolver;
pub mod toolchain;

use std::path::{Path, PathBuf};

/// Generate the document for one project and write it to disk.
///
/// Loads the [`context::ModuleContext`] via the real Go toolchain, assembles
/// the document from `manifest_file`, and emits it into `output_dir` in the
/// requested format (`"json"` or `"yaml"`). Returns the path of the written
/// file. On any failure no output file is produced.
pub fn parse(
    project_path: &Path,
    manifest_file: &Path,
    output_dir: &Path,
    format: &str,
) -> error::Result<PathBuf> {
    let toolchain = toolchain::GoToolchain::new();
    let context = context::ModuleContext::load(project_path, &toolchain)?;
    parse_with(&context, manifest_file, output_dir, format)
}

/// Like [`parse`], but with an already-loaded context. Lets callers and
/// tests supply their own roots and descriptor without touching the
/// environment or spawning the toolchain.
pub fn parse_with(
    context: &context::ModuleContext,
    manifest_file: &Path,
    output_dir: &Path,
    format: &str,
) -> error::Result<PathBuf> {
    let extractor = extractor::CommentExtractor;
    let assembler = assembler::Assembler::new(context, &extractor);
    let doc = assembler.assemble(manifest_file)?;
    emitter::emit(&doc, output_dir, format)
}
