//! Layered settings discovery.
//!
//! `ortho_config` merges the layers. This module decides which settings file
//! takes part and hands the command line layer over as arguments.

use std::env;
use std::ffi::OsString;
use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;

use crate::defaults::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
use crate::error::ConfigError;
use crate::settings::{LogFormat, Settings};

/// Program name placed ahead of the layer's flags.
const PROGRAM: &str = "ibp-plugins";

/// Settings given on the command line. Each one wins over every other layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliLayer {
    /// Settings file named with `--config-path`.
    pub config_path: Option<Utf8PathBuf>,
    /// Tracing filter expression.
    pub log_filter: Option<String>,
    /// Log output format.
    pub log_format: Option<LogFormat>,
    /// Worker pool size.
    pub workers: Option<NonZeroUsize>,
}

impl CliLayer {
    fn to_args(&self, config_file: Option<&Utf8Path>) -> Vec<OsString> {
        let mut args = vec![OsString::from(PROGRAM)];
        let mut push = |flag: &str, value: String| {
            args.push(OsString::from(flag));
            args.push(OsString::from(value));
        };
        if let Some(path) = config_file {
            push("--config-path", path.to_string());
        }
        if let Some(filter) = &self.log_filter {
            push("--log-filter", filter.clone());
        }
        if let Some(format) = self.log_format {
            push("--log-format", format.to_string());
        }
        if let Some(workers) = self.workers {
            push("--workers", workers.to_string());
        }
        args
    }
}

impl Settings {
    /// Loads the layered settings.
    ///
    /// The settings file is the one named by `cli`, else the one named by
    /// `IBP_CONFIG_PATH`, else [`DEFAULT_CONFIG_FILE`] in `dir` when it
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the file named on the command line
    /// does not exist, and [`ConfigError::Load`] if any layer is malformed.
    pub fn discover(cli: &CliLayer, dir: &Utf8Path) -> Result<Self, ConfigError> {
        let config_file = settings_file(cli, dir)?;
        Self::load_from_iter(cli.to_args(config_file.as_deref())).map_err(ConfigError::from)
    }
}

fn settings_file(cli: &CliLayer, dir: &Utf8Path) -> Result<Option<Utf8PathBuf>, ConfigError> {
    if let Some(path) = &cli.config_path {
        if !path.is_file() {
            return Err(ConfigError::Missing { path: path.clone() });
        }
        return Ok(Some(path.clone()));
    }
    if env::var_os(CONFIG_PATH_ENV).is_some() {
        return Ok(None);
    }
    let fallback = dir.join(DEFAULT_CONFIG_FILE);
    Ok(fallback.is_file().then_some(fallback))
}
