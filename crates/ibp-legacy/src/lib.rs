//! Legacy `.ifl` configurations for the batch executable.
//!
//! The executable only understands a sectioned `key=value` text format. A
//! generated file holds one `imageFilter1` section with the plugin id,
//! `bypass=false` and one key per property, followed by an `info` section.
//!
//! [`from_descriptor`] projects a canonical descriptor; [`DirectGenerator`]
//! builds the same shape straight from a source scan for plugins that have
//! no descriptor yet. [`LegacyConfig`] parses and renders the format and
//! merges live settings written back by the executable.

mod config;
mod error;
mod generate;

pub use config::{FILTER_SECTION_PREFIX, LegacyConfig, Section};
pub use error::LegacyError;
pub use generate::{
    DirectGenerator, FILE_TYPE, FILTER_SECTION, INFO_SECTION, ValueSource, from_descriptor,
};

/// File name of the configuration written next to each plugin's sources.
pub const SIMPLE_CONFIG_FILE: &str = "example.ifl";

/// Extension of legacy configuration files.
pub const CONFIG_EXTENSION: &str = "ifl";
