//! Canonical descriptor records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{PropertyKind, PropertyValue};

/// Namespace shared by every filter plugin id.
pub const PLUGIN_ID_PREFIX: &str = "ibp.imagefilter.";

/// Builds the full plugin id for a short id.
#[must_use]
pub fn plugin_id(short_id: &str) -> String {
    format!("{PLUGIN_ID_PREFIX}{short_id}")
}

/// One tunable parameter of a plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Normalized property name.
    pub name: String,
    /// Value shape.
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    /// Value the plugin starts with.
    pub default_value: PropertyValue,
    /// Value chosen to differ visibly from the default.
    pub interesting_value: PropertyValue,
    /// Free text description.
    #[serde(default)]
    pub description: String,
    /// Generated hint about the accepted values.
    #[serde(default)]
    pub comment: String,
    /// Lower bound for numeric kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<PropertyValue>,
    /// Upper bound for numeric kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<PropertyValue>,
    /// Allowed tokens for enum kinds, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

/// One filter plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Dotted id, `ibp.imagefilter.<short>`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Human description.
    pub description: String,
    /// Value per property used to seed a runnable configuration.
    #[serde(default)]
    pub example: BTreeMap<String, PropertyValue>,
    /// Properties keyed by name.
    pub properties: BTreeMap<String, PropertyDescriptor>,
}

impl PluginDescriptor {
    /// Returns the last segment of the id.
    #[must_use]
    pub fn short_id(&self) -> &str {
        crate::table::short_key(&self.id)
    }
}
