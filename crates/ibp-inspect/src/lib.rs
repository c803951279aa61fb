//! Source inspection for image filter plugins.
//!
//! A plugin lives in an `imagefilter_<short>` directory with a filter
//! implementation (`filter.cpp`), an entry point declaring its metadata
//! (`main.cpp`) and, optionally, a header (`filter.h`) and a Qt Designer
//! layout (`filterwidget.ui`). This crate recovers, per plugin:
//!
//! - the declared `name` and `description`,
//! - every one-parameter `set*` mutator with its declared type,
//! - primitive data members the header declares without a mutator,
//! - literal values the filter constructor assigns to members, and
//! - numeric bounds and current values from spin and slider widgets.
//!
//! Recovery is best effort. The [`StructuralInspector`] walks a Tree-sitter
//! syntax tree; the [`PatternInspector`] matches regular expressions over
//! raw text. [`FallbackInspector::standard`] tries the former and falls back
//! to the latter. [`PluginScanner`] reads the files of one plugin and merges
//! their contributions into a [`PluginScan`], degrading unreadable or broken
//! files to empty contributions.

mod constructor;
mod discovery;
mod error;
mod header;
mod inspector;
mod model;
pub mod normalize;
mod scan;
mod ui;

#[cfg(test)]
mod tests;

pub use constructor::constructor_defaults;
pub use discovery::{
    FILTER_HEADER, FILTER_SOURCE, METADATA_SOURCE, PLUGIN_DIR_PREFIX, PluginSources, UI_LAYOUT,
    discover_plugins,
};
pub use error::InspectError;
pub use header::{augment_with_members, header_members};
pub use inspector::{FallbackInspector, Inspector, PatternInspector, StructuralInspector};
pub use model::{
    ConstructorDefaults, PluginMetadata, PluginScan, RawProperties, RawProperty, UiHints,
};
pub use scan::PluginScanner;
pub use ui::layout_hints;

/// The inspector used by the command line front end.
pub type StandardInspector = FallbackInspector<StructuralInspector, PatternInspector>;
