//! The settings record.

use std::num::NonZeroUsize;

use camino::Utf8PathBuf;
use ibp_descriptor::ValueTable;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::defaults::{
    self, DEFAULT_DOCS_DIR, DEFAULT_EXECUTABLE, DEFAULT_INPUT_IMAGES_DIR,
    DEFAULT_OUTPUT_IMAGES_DIR, DEFAULT_PLUGINS_DIR, DEFAULT_SETTINGS_FILE, DEFAULT_TUNING_IMAGE,
};

/// How log events are written to standard error.
///
/// Parsed case-insensitively from `--log-format` and from the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Flattened JSON, one object per line.
    Json,
    /// Single line text for terminals.
    Compact,
}

/// Settings shared by every command.
///
/// Layers merge in this order, later ones winning: the built-in defaults, the
/// settings file, `IBP_*` environment variables and command line flags.
/// Missing fields keep their defaults. The value tables only come from the
/// settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "IBP")]
pub struct Settings {
    /// Directory holding the `imagefilter_*` plugin sources.
    #[ortho_config(default = defaults::path(DEFAULT_PLUGINS_DIR))]
    pub plugins_dir: Utf8PathBuf,
    /// Documentation root.
    #[ortho_config(default = defaults::path(DEFAULT_DOCS_DIR))]
    pub docs_dir: Utf8PathBuf,
    /// Sample images fed to every plugin.
    #[ortho_config(default = defaults::path(DEFAULT_INPUT_IMAGES_DIR))]
    pub input_images_dir: Utf8PathBuf,
    /// Where processed images are written.
    #[ortho_config(default = defaults::path(DEFAULT_OUTPUT_IMAGES_DIR))]
    pub output_images_dir: Utf8PathBuf,
    /// The batch executable.
    #[ortho_config(default = defaults::path(DEFAULT_EXECUTABLE))]
    pub executable: Utf8PathBuf,
    /// Live settings the executable saves on exit.
    #[ortho_config(default = defaults::path(DEFAULT_SETTINGS_FILE))]
    pub settings_file: Utf8PathBuf,
    /// Image opened while tuning.
    #[ortho_config(default = defaults::path(DEFAULT_TUNING_IMAGE))]
    pub tuning_image: Utf8PathBuf,
    /// Worker pool size; unset uses the available parallelism.
    pub workers: Option<NonZeroUsize>,
    /// Tracing filter expression.
    #[ortho_config(default = defaults::log_filter())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = defaults::log_format())]
    pub log_format: LogFormat,
    /// Interesting value overrides; unset uses the built-in table.
    #[ortho_config(skip_cli)]
    pub overrides: Option<ValueTable>,
    /// Curated example values.
    #[ortho_config(skip_cli)]
    pub examples: ValueTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plugins_dir: defaults::path(DEFAULT_PLUGINS_DIR),
            docs_dir: defaults::path(DEFAULT_DOCS_DIR),
            input_images_dir: defaults::path(DEFAULT_INPUT_IMAGES_DIR),
            output_images_dir: defaults::path(DEFAULT_OUTPUT_IMAGES_DIR),
            executable: defaults::path(DEFAULT_EXECUTABLE),
            settings_file: defaults::path(DEFAULT_SETTINGS_FILE),
            tuning_image: defaults::path(DEFAULT_TUNING_IMAGE),
            workers: None,
            log_filter: defaults::log_filter(),
            log_format: defaults::log_format(),
            overrides: None,
            examples: ValueTable::new(),
        }
    }
}

impl Settings {
    /// Returns the override table in force.
    #[must_use]
    pub fn override_table(&self) -> ValueTable {
        self.overrides
            .clone()
            .unwrap_or_else(ValueTable::builtin_overrides)
    }

    /// Directory receiving generated configurations and plugin pages.
    #[must_use]
    pub fn docs_plugins_dir(&self) -> Utf8PathBuf {
        self.docs_dir.join("plugins")
    }

    /// Path of the generated configuration for plugin `short_id`.
    #[must_use]
    pub fn config_path(&self, short_id: &str) -> Utf8PathBuf {
        self.docs_plugins_dir().join(format!("{short_id}.ifl"))
    }

    /// Path of the documentation page for plugin `short_id`.
    #[must_use]
    pub fn page_path(&self, short_id: &str) -> Utf8PathBuf {
        self.docs_plugins_dir().join(format!("{short_id}.md"))
    }

    /// Path of the documentation index.
    #[must_use]
    pub fn index_path(&self) -> Utf8PathBuf {
        self.docs_dir.join("index.md")
    }
}
