//! Errors raised while driving the batch executable.

use std::path::PathBuf;
use std::sync::Arc;

use ibp_legacy::LegacyError;
use thiserror::Error;

/// Errors arising from batch processing, documentation and tuning.
#[derive(Debug, Clone, Error)]
pub enum BatchError {
    /// The executable could not be started.
    #[error("failed to start '{executable}': {source}")]
    Spawn {
        /// Executable that was launched.
        executable: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The executable ran but reported failure.
    #[error("'{executable}' failed with {status}: {stderr}")]
    NonZeroExit {
        /// Executable that was launched.
        executable: PathBuf,
        /// Rendered exit status.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// A directory could not be listed.
    #[error("failed to list '{path}': {source}")]
    List {
        /// Directory that was listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// An artifact could not be written.
    #[error("failed to write '{path}': {source}")]
    Write {
        /// File that was written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A legacy configuration could not be read, parsed or written.
    #[error(transparent)]
    Legacy(#[from] LegacyError),
}

impl BatchError {
    /// Creates a spawn error.
    #[must_use]
    pub fn spawn(executable: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Spawn {
            executable: executable.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a listing error.
    #[must_use]
    pub fn list(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::List {
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
}
