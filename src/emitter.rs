//! Emission of the finished document.
//!
//! The single write of a run happens here, after the document is complete.
//! Serialization happens before any file is touched, and the bytes go
//! through a temporary file that is atomically renamed into place, so a
//! concurrent reader never observes a partial document and no file is left
//! behind on failure.

use crate::document::Document;
use crate::error::{Error, Result};
use log::{debug, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Fixed output file name for JSON emission.
pub const JSON_FILE: &str = "swagger.json";
/// Fixed output file name for YAML emission.
pub const YAML_FILE: &str = "swagger.yaml";

/// Serialize `doc` in the requested format and write it into `output_dir`.
///
/// `format` must be `"json"` or `"yaml"`; anything else fails with
/// [`Error::UnsupportedFormat`] without writing. Returns the path of the
/// written file.
pub fn emit(doc: &Document, output_dir: &Path, format: &str) -> Result<PathBuf> {
    let (file_name, content) = match format {
        "json" => (JSON_FILE, serde_json::to_string_pretty(doc)?),
        "yaml" => (YAML_FILE, serde_yaml::to_string(doc)?),
        other => return Err(Error::UnsupportedFormat(other.to_string())),
    };

    let target = output_dir.join(file_name);
    debug!("emitting {} bytes to {}", content.len(), target.display());

    let mut tmp = NamedTempFile::new_in(output_dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(&target).map_err(|e| Error::IoError(e.error))?;

    info!("wrote {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::{self, Tag};
    use std::fs;
    use tempfile::TempDir;

    fn sample_document() -> Document {
        let mut doc = Document::new();
        directive::apply(&mut doc, Tag::Title, "Demo");
        directive::apply(&mut doc, Tag::Version, "1.0");
        doc
    }

    #[test]
    fn test_emit_json_writes_fixed_filename() {
        let dir = TempDir::new().unwrap();
        let written = emit(&sample_document(), dir.path(), "json").unwrap();

        assert_eq!(written, dir.path().join("swagger.json"));
        let content = fs::read_to_string(&written).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["openapi"], "3.0.1");
        assert_eq!(value["info"]["title"], "Demo");
    }

    #[test]
    fn test_emit_yaml_writes_fixed_filename() {
        let dir = TempDir::new().unwrap();
        let written = emit(&sample_document(), dir.path(), "yaml").unwrap();

        assert_eq!(written, dir.path().join("swagger.yaml"));
        let content = fs::read_to_string(&written).unwrap();
        assert!(content.contains("openapi: 3.0.1"));
        assert!(content.contains("title: Demo"));
    }

    #[test]
    fn test_unsupported_format_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let err = emit(&sample_document(), dir.path(), "xml").unwrap_err();

        assert!(matches!(err, Error::UnsupportedFormat(_)));
        // Nothing, not even a temp file, remains in the output directory.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_output_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-dir");

        let err = emit(&sample_document(), &missing, "json").unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_emit_overwrites_previous_output() {
        let dir = TempDir::new().unwrap();
        emit(&sample_document(), dir.path(), "json").unwrap();

        let mut updated = sample_document();
        directive::apply(&mut updated, Tag::Version, "2.0");
        emit(&updated, dir.path(), "json").unwrap();

        let content = fs::read_to_string(dir.path().join("swagger.json")).unwrap();
        assert!(content.contains("\"version\": \"2.0\""));
    }
}
