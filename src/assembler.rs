//! Document assembly.
//!
//! The assembler drives one run: it folds the manifest's directives into a
//! fresh [`Document`], then walks the manifest's imports in source order,
//! resolving each one and handing the resolved directory to the package
//! extractor. Traversal is exactly one level deep by contract: only the
//! manifest's direct imports are visited, never imports of imports; the
//! manifest is expected to enumerate every documentable package itself.
//!
//! Any failure aborts the whole build; a partially populated document is
//! never returned.

use crate::context::ModuleContext;
use crate::directive;
use crate::document::Document;
use crate::error::Result;
use crate::extractor::PackageExtractor;
use crate::manifest::parse_manifest;
use crate::resolver::Resolver;
use log::{debug, info};
use std::path::Path;

/// Builds one document from one manifest file.
pub struct Assembler<'a> {
    context: &'a ModuleContext,
    extractor: &'a dyn PackageExtractor,
}

impl<'a> Assembler<'a> {
    pub fn new(context: &'a ModuleContext, extractor: &'a dyn PackageExtractor) -> Self {
        Self { context, extractor }
    }

    /// Assemble the document for `manifest_path`.
    pub fn assemble(&self, manifest_path: &Path) -> Result<Document> {
        let manifest = parse_manifest(manifest_path)?;

        let mut doc = Document::new();
        for line in &manifest.comment_lines {
            if let Some((tag, value)) = directive::scan_line(line) {
                debug!("directive {:?} = {:?}", tag, value);
                directive::apply(&mut doc, tag, value);
            }
        }

        let mut resolver = Resolver::new(self.context);
        for import in &manifest.imports {
            let package_dir = resolver.resolve(import)?;
            info!("scanning package {} ({})", import, package_dir.display());
            self.extractor.extract(&package_dir, &mut doc)?;
        }

        Ok(doc)
    }
}
