//! Canonical descriptors for image filter plugins.
//!
//! Raw inspection results from `ibp-inspect` are classified into typed
//! [`PropertyDescriptor`]s, assembled into a [`PluginDescriptor`] per plugin
//! and persisted as `filter.yaml`. Persisted output is a pure function of the
//! descriptor's content: every mapping level is sorted and absent optional
//! fields are omitted, so regenerating an unchanged plugin rewrites the same
//! bytes.
//!
//! Two read-only [`ValueTable`]s steer generation. The override table
//! replaces a property's interesting value; the curated example table
//! replaces a descriptor's example value.

mod builder;
mod classifier;
mod error;
mod model;
mod serializer;
mod table;
mod value;

#[cfg(test)]
mod tests;

pub use builder::DescriptorBuilder;
pub use classifier::{Classifier, INTERESTING_FRACTION, classify_kind, enum_tokens};
pub use error::DescriptorError;
pub use model::{PLUGIN_ID_PREFIX, PluginDescriptor, PropertyDescriptor, plugin_id};
pub use serializer::{
    DESCRIPTOR_FILE, discover_descriptors, from_yaml, read_descriptor, to_yaml, write_descriptor,
};
pub use table::{PluginValues, ValueTable, short_key};
pub use value::{PropertyKind, PropertyValue};
