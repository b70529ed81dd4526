//! Error types for msync-core
//!
//! Resolution itself never fails. Every variant here is raised while
//! building layers at the boundary, before a resolver exists.

use std::path::PathBuf;

/// Result type for msync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in msync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required layer file was not found at the expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// A layer did not have the shape `target -> mapping`
    #[error("Invalid {layer} layer: {message}")]
    InvalidLayer { layer: String, message: String },

    /// A layer used a key that is not a valid target name
    #[error("Invalid target '{name}' in {layer} layer: {reason}")]
    InvalidTarget {
        layer: String,
        name: String,
        reason: String,
    },

    /// A `KEY=VALUE` additional setting could not be parsed
    #[error("Invalid setting '{entry}': {reason}")]
    InvalidOverride { entry: String, reason: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from msync-fs
    #[error(transparent)]
    Fs(#[from] msync_fs::Error),
}

impl Error {
    pub(crate) fn invalid_layer(layer: &str, message: impl Into<String>) -> Self {
        Self::InvalidLayer {
            layer: layer.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_override(entry: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOverride {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }
}
