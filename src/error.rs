use std::path::PathBuf;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the application
#[derive(Debug)]
pub enum Error {
    /// Process configuration could not be determined (GOPATH / GOROOT).
    Config(String),
    /// A toolchain query failed. Surfaced by the `Toolchain` trait; callers
    /// downgrade it to a warning for the descriptor query.
    Toolchain(String),
    /// An import path matched no vendor entry, replacement, search root or
    /// the library root.
    Resolution { import: String },
    ParseError { file: PathBuf, message: String },
    /// Output format other than "json" or "yaml".
    UnsupportedFormat(String),
    IoError(std::io::Error),
    SerializationError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
            Error::Toolchain(msg) => write!(f, "toolchain query failed: {}", msg),
            Error::Resolution { import } => {
                write!(f, "unresolved import path: {}", import)
            }
            Error::ParseError { file, message } => {
                write!(f, "parse error in {}: {}", file.display(), message)
            }
            Error::UnsupportedFormat(format) => {
                write!(
                    f,
                    "unsupported output format {:?}, only json and yaml are supported",
                    format
                )
            }
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::SerializationError(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML serialization error: {}", err))
    }
}
