//! Per-package extraction of path operations.
//!
//! The assembler hands every resolved package directory to a
//! [`PackageExtractor`]; the trait keeps the document core independent of how
//! operations are recognized, and lets tests drive the assembler with stub
//! extractors. [`CommentExtractor`] is the default implementation: it reads
//! each `.go` file of the package and turns `@Router`-annotated comment
//! blocks into operations.

use crate::directive::DESCRIPTION_SEPARATOR;
use crate::document::{Document, Operation, PathItem, Response};
use crate::error::{Error, Result};
use log::{debug, warn};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Turns one resolved package directory into Paths entries on the document.
pub trait PackageExtractor {
    fn extract(&self, package_dir: &Path, doc: &mut Document) -> Result<()>;
}

/// Comment-driven extractor.
///
/// A comment block documents an operation when it carries a
/// `@Router <path> [<method>]` directive. Within the block, `@Title` becomes
/// the summary, repeated `@Description` lines concatenate into the
/// description, and `@Success`/`@Failure` lines become responses. The name of
/// the function the block precedes becomes the operationId. Files are visited
/// in file-name order so repeated runs produce identical documents;
/// `_test.go` files are skipped.
pub struct CommentExtractor;

#[derive(Default)]
struct OperationBlock {
    router: Option<(String, String)>,
    summary: Option<String>,
    description: Option<String>,
    responses: BTreeMap<String, Response>,
}

impl PackageExtractor for CommentExtractor {
    fn extract(&self, package_dir: &Path, doc: &mut Document) -> Result<()> {
        debug!("extracting package {}", package_dir.display());

        for entry in WalkDir::new(package_dir)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy();
            if !entry.file_type().is_file()
                || !name.ends_with(".go")
                || name.ends_with("_test.go")
            {
                continue;
            }
            extract_file(path, doc)?;
        }
        Ok(())
    }
}

fn extract_file(path: &Path, doc: &mut Document) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| Error::ParseError {
        file: path.to_path_buf(),
        message: format!("cannot read source file: {}", e),
    })?;

    // '@Router /pets/{id} [get]'
    let router = Regex::new(r"^@Router\s+(\S+)\s+\[(\w+)\]").unwrap();
    // '@Success 200 pet fetched' / '@Failure 404 no such pet'
    let response = Regex::new(r"^@(Success|Failure)\s+(\d{3})\s*(.*)$").unwrap();
    let func_decl = Regex::new(r"^func\s+(?:\([^)]*\)\s*)?(\w+)").unwrap();

    let mut block = OperationBlock::default();

    for line in content.lines() {
        let trimmed = line.trim();

        if let Some(comment) = trimmed.strip_prefix("//") {
            let comment = comment.trim();
            if let Some(captures) = router.captures(comment) {
                block.router = Some((captures[1].to_string(), captures[2].to_lowercase()));
            } else if let Some(rest) = strip_tag(comment, "@Title") {
                block.summary = Some(rest.to_string());
            } else if let Some(rest) = strip_tag(comment, "@Description") {
                match &mut block.description {
                    Some(desc) => {
                        desc.push_str(DESCRIPTION_SEPARATOR);
                        desc.push_str(rest);
                    }
                    None => block.description = Some(rest.to_string()),
                }
            } else if let Some(captures) = response.captures(comment) {
                let description = match captures[3].trim() {
                    "" => default_response_description(&captures[1]),
                    text => text.to_string(),
                };
                block
                    .responses
                    .insert(captures[2].to_string(), Response { description });
            }
            continue;
        }

        // Blank lines may separate a block from its function; the first code
        // line closes the block, and a function declaration on it names the
        // operation.
        if trimmed.is_empty() {
            continue;
        }
        if block.router.is_some() {
            let operation_id = func_decl
                .captures(trimmed)
                .map(|captures| captures[1].to_string());
            finish_block(std::mem::take(&mut block), operation_id, path, doc);
        } else {
            block = OperationBlock::default();
        }
    }

    // An annotated block at end of file still counts, without an operationId.
    if block.router.is_some() {
        finish_block(block, None, path, doc);
    }

    Ok(())
}

fn finish_block(block: OperationBlock, operation_id: Option<String>, file: &Path, doc: &mut Document) {
    let (route, method) = match block.router {
        Some(router) => router,
        None => return,
    };

    let mut responses = block.responses;
    if responses.is_empty() {
        responses.insert(
            "200".to_string(),
            Response {
                description: "successful operation".to_string(),
            },
        );
    }

    let operation = Operation {
        summary: block.summary,
        description: block.description,
        operation_id,
        responses,
    };

    let item = doc.paths.entry(route.clone()).or_insert_with(PathItem::default);
    match item.slot_mut(&method) {
        Some(slot) => {
            if slot.is_some() {
                warn!(
                    "duplicate operation {} {} in {}, keeping the later one",
                    method,
                    route,
                    file.display()
                );
            }
            *slot = Some(operation);
        }
        None => warn!(
            "unknown HTTP method {:?} for {} in {}, skipping",
            method,
            route,
            file.display()
        ),
    }
}

fn strip_tag<'a>(comment: &'a str, tag: &str) -> Option<&'a str> {
    let rest = comment.strip_prefix(tag)?;
    if rest.is_empty() {
        Some("")
    } else if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn default_response_description(kind: &str) -> String {
    match kind {
        "Success" => "successful operation".to_string(),
        _ => "error".to_string(),
    }
}
