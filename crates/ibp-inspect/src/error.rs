//! Errors raised while inspecting plugin sources.
//!
//! Inspection failures are never fatal to a run: the scanner logs them and
//! degrades the affected file to an empty contribution. The variants still
//! carry structured context so the log lines name the file and the cause.

use std::path::PathBuf;
use std::sync::Arc;

use ibp_syntax::SyntaxError;
use thiserror::Error;

/// Errors arising from source inspection.
#[derive(Debug, Error)]
pub enum InspectError {
    /// A plugin file could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The structural front end failed.
    #[error("structural parse failed: {0}")]
    Syntax(#[from] SyntaxError),

    /// The structural front end produced a tree too broken to trust.
    #[error("source contains {count} syntax error(s), first at line {line}")]
    BrokenTree {
        /// Number of error nodes in the tree.
        count: usize,
        /// One-based line of the first error node.
        line: u32,
    },

    /// A scanning pattern failed to compile.
    #[error("invalid scanning pattern: {message}")]
    Pattern {
        /// Description of the failure.
        message: String,
    },

    /// A UI layout file is not well-formed XML.
    #[error("malformed UI layout at byte {position}: {message}")]
    Layout {
        /// Byte offset reported by the XML reader.
        position: usize,
        /// Description of the failure.
        message: String,
    },
}

impl InspectError {
    /// Creates a read error for `path`.
    #[must_use]
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a pattern compilation error.
    #[must_use]
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern {
            message: message.into(),
        }
    }
}
