//! Errors raised while persisting descriptors.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors arising from descriptor I/O and validation.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// A descriptor file could not be read.
    #[error("failed to read descriptor '{path}': {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A descriptor file could not be written.
    #[error("failed to write descriptor '{path}': {source}")]
    Write {
        /// File that was written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A descriptor file does not match the descriptor shape.
    #[error("invalid descriptor '{path}': {message}")]
    Schema {
        /// Offending file.
        path: PathBuf,
        /// Description of the mismatch.
        message: String,
    },

    /// A descriptor could not be encoded.
    #[error("failed to encode descriptor '{id}': {message}")]
    Encode {
        /// Id of the descriptor.
        id: String,
        /// Description of the failure.
        message: String,
    },
}

impl DescriptorError {
    /// Creates a read error.
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a write error.
    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a schema error.
    #[must_use]
    pub fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}
