//! Errors raised while reading and writing legacy configurations.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors arising from the legacy configuration codec.
#[derive(Debug, Clone, Error)]
pub enum LegacyError {
    /// A configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A configuration file could not be written.
    #[error("failed to write configuration '{path}': {source}")]
    Write {
        /// File that was written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A line could not be parsed.
    #[error("line {line}: {message}")]
    Syntax {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },
}

impl LegacyError {
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

    /// Creates a syntax error for a one-based line number.
    #[must_use]
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}
