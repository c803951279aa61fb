//! Errors raised while loading settings.

use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::OrthoError;
use thiserror::Error;

/// Errors arising from loading the layered settings.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The settings file named on the command line does not exist.
    #[error("configuration file '{path}' does not exist")]
    Missing {
        /// Requested file.
        path: Utf8PathBuf,
    },

    /// A layer could not be read or does not match the settings shape.
    #[error(transparent)]
    Load(#[from] Arc<OrthoError>),
}
