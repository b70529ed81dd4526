//! Error types for msync-fs

use std::path::PathBuf;

/// Result type for msync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in msync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid target name '{name}': {reason}")]
    InvalidTargetName { name: String, reason: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_target(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTargetName {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
