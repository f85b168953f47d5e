//! Manifest file parsing.
//!
//! The manifest is the entry Go file of the documented project: its comments
//! carry the document-level directives and its import list enumerates every
//! controller package to scan. Only this one file is parsed here; package
//! sources are read by the extractor after resolution.

use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed form of the manifest file.
#[derive(Debug)]
pub struct ManifestFile {
    /// Path to the manifest
    pub path: PathBuf,
    /// Comment text, one entry per comment line, markers stripped
    pub comment_lines: Vec<String>,
    /// Import paths, in source order
    pub imports: Vec<String>,
}

/// Parse the manifest file's comments and import statements.
///
/// Handles `//` line comments, `/* */` block comments, single-line imports
/// (including `_` and named aliases) and grouped `import ( ... )` blocks.
/// An unterminated import block or block comment is a parse error.
pub fn parse_manifest(path: &Path) -> Result<ManifestFile> {
    debug!("parsing manifest {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| Error::ParseError {
        file: path.to_path_buf(),
        message: format!("cannot read manifest: {}", e),
    })?;

    // 'import "p"', 'import alias "p"', 'import _ "p"'
    let single_import = Regex::new(r#"^import\s+(?:[A-Za-z_][\w.]*\s+)?"([^"]+)""#).unwrap();
    // one grouped entry: '"p"', 'alias "p"', '_ "p"'
    let grouped_import = Regex::new(r#"^(?:[A-Za-z_][\w.]*\s+)?"([^"]+)"$"#).unwrap();

    let mut comment_lines = Vec::new();
    let mut imports = Vec::new();
    let mut in_import_block = false;
    let mut in_comment_block = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if in_comment_block {
            match trimmed.find("*/") {
                Some(end) => {
                    comment_lines.push(trimmed[..end].trim().to_string());
                    in_comment_block = false;
                }
                None => comment_lines.push(trimmed.trim_start_matches('*').trim().to_string()),
            }
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("//") {
            comment_lines.push(rest.to_string());
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("/*") {
            match rest.find("*/") {
                Some(end) => comment_lines.push(rest[..end].trim().to_string()),
                None => {
                    comment_lines.push(rest.trim().to_string());
                    in_comment_block = true;
                }
            }
            continue;
        }

        if in_import_block {
            // Entries may carry a trailing line comment
            let entry = match trimmed.find("//") {
                Some(pos) => trimmed[..pos].trim(),
                None => trimmed,
            };
            if entry == ")" {
                in_import_block = false;
            } else if let Some(captures) = grouped_import.captures(entry) {
                imports.push(captures[1].to_string());
            } else if !entry.is_empty() {
                return Err(Error::ParseError {
                    file: path.to_path_buf(),
                    message: format!("malformed import entry: {:?}", entry),
                });
            }
            continue;
        }

        if let Some(rest) = trimmed
            .strip_prefix("import (")
            .or_else(|| trimmed.strip_prefix("import("))
        {
            // Entries may sit on the opening line, including a whole
            // one-line group like 'import ( _ "p" )'.
            let rest = match rest.find("//") {
                Some(pos) => rest[..pos].trim(),
                None => rest.trim(),
            };
            let (inner, closed) = match rest.find(')') {
                Some(pos) => (rest[..pos].trim(), true),
                None => (rest, false),
            };
            for entry in inner.split(';').map(str::trim).filter(|e| !e.is_empty()) {
                match grouped_import.captures(entry) {
                    Some(captures) => imports.push(captures[1].to_string()),
                    None => {
                        return Err(Error::ParseError {
                            file: path.to_path_buf(),
                            message: format!("malformed import entry: {:?}", entry),
                        })
                    }
                }
            }
            in_import_block = !closed;
        } else if let Some(captures) = single_import.captures(trimmed) {
            imports.push(captures[1].to_string());
        }
    }

    if in_import_block {
        return Err(Error::ParseError {
            file: path.to_path_buf(),
            message: "unterminated import block".to_string(),
        });
    }
    if in_comment_block {
        return Err(Error::ParseError {
            file: path.to_path_buf(),
            message: "unterminated block comment".to_string(),
        });
    }

    debug!(
        "manifest has {} comment lines, {} imports",
        comment_lines.len(),
        imports.len()
    );

    Ok(ManifestFile {
        path: path.to_path_buf(),
        comment_lines,
        imports,
    })
}
