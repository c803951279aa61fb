//! Settings for the plugin metadata toolchain.
//!
//! [`Settings`] is loaded once at startup through `ortho_config`, layering
//! an optional YAML file, `IBP_*` environment variables and command line
//! flags over the built-in defaults. It names the directories the
//! toolchain reads and writes, the batch executable, logging preferences and
//! the value tables that steer descriptor generation.

pub mod defaults;
mod error;
mod loader;
mod settings;

pub use defaults::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILTER};
pub use error::ConfigError;
pub use loader::CliLayer;
pub use settings::{LogFormat, Settings};
