//! Read-only per-plugin value tables.
//!
//! Two tables feed generation: the override table, whose entries replace a
//! property's interesting value, and the curated example table, whose entries
//! replace a descriptor's example value. Both are loaded once and never
//! mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::PropertyValue;

/// Values for one plugin, keyed by property name.
pub type PluginValues = BTreeMap<String, PropertyValue>;

/// Mapping of short plugin id to property values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTable(BTreeMap<String, PluginValues>);

impl ValueTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the table with `value` recorded for `plugin`/`property`.
    #[must_use]
    pub fn with_value(
        mut self,
        plugin: &str,
        property: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.0
            .entry(short_key(plugin).to_owned())
            .or_default()
            .insert(property.into(), value.into());
        self
    }

    /// Returns every value recorded for `plugin`.
    ///
    /// `plugin` may be a short id (`blur`) or a full id
    /// (`ibp.imagefilter.blur`).
    #[must_use]
    pub fn plugin(&self, plugin: &str) -> Option<&PluginValues> {
        self.0.get(short_key(plugin))
    }

    /// Returns the value recorded for `plugin`/`property`.
    #[must_use]
    pub fn get(&self, plugin: &str, property: &str) -> Option<&PropertyValue> {
        self.plugin(plugin)?.get(property)
    }

    /// Returns `true` when the table holds no plugins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The override table shipped with the tool.
    ///
    /// These plugins default to settings with no visible effect, so their
    /// samples would be indistinguishable from the input.
    #[must_use]
    pub fn builtin_overrides() -> Self {
        let rows: [(&str, &[(&str, &str)]); 3] = [
            (
                "brightnesscontrast",
                &[
                    ("alphabrightnesscontrast", "0 0"),
                    ("bluebrightnesscontrast", "0 0"),
                    ("greenbrightnesscontrast", "0 0"),
                    ("redbrightnesscontrast", "0 0"),
                    ("rgbbrightnesscontrast", "17 17"),
                    ("usesoftmode", "false"),
                    ("workingchannel", "rgb"),
                ],
            ),
            (
                "autolevels",
                &[
                    ("enhancechannelsseparately", "false"),
                    ("adjustmidtones", "false"),
                    ("targetcolorhighlights", "#ffffff"),
                    ("targetcolormidtones", "#808080"),
                    ("targetcolorshadows", "#000000"),
                    ("clippinghighlights", "0.1"),
                    ("clippingshadows", "0.1"),
                ],
            ),
            (
                "colorbalance",
                &[
                    ("preserveluminosity", "false"),
                    ("shadowsred", "0"),
                    ("shadowsgreen", "0"),
                    ("shadowsblue", "0"),
                    ("midtonesred", "0"),
                    ("midtonesgreen", "17"),
                    ("midtonesblue", "0"),
                    ("highlightsred", "17"),
                    ("highlightsgreen", "0"),
                    ("highlightsblue", "0"),
                ],
            ),
        ];

        rows.iter()
            .flat_map(|(plugin, values)| values.iter().map(move |value| (*plugin, *value)))
            .fold(Self::new(), |table, (plugin, (property, value))| {
                table.with_value(plugin, property, PropertyValue::text(value))
            })
    }
}

/// Reduces a dotted plugin id to its last segment.
#[must_use]
pub fn short_key(plugin: &str) -> &str {
    plugin.rsplit('.').next().unwrap_or(plugin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_accept_short_and_full_ids() {
        let table = ValueTable::builtin_overrides();
        let expected = Some(&PropertyValue::text("17 17"));
        assert_eq!(table.get("brightnesscontrast", "rgbbrightnesscontrast"), expected);
        assert_eq!(
            table.get("ibp.imagefilter.brightnesscontrast", "rgbbrightnesscontrast"),
            expected
        );
    }

    #[test]
    fn builtin_overrides_cover_three_plugins() {
        let table = ValueTable::builtin_overrides();
        assert_eq!(table.plugin("autolevels").map(BTreeMap::len), Some(7));
        assert_eq!(table.plugin("colorbalance").map(BTreeMap::len), Some(10));
        assert!(table.plugin("blur").is_none());
    }

    #[test]
    fn tables_deserialize_from_nested_maps() {
        let table: ValueTable =
            serde_json::from_str(r#"{"blur": {"radius": 9, "invert": true}}"#).expect("parse");
        assert_eq!(table.get("blur", "radius"), Some(&PropertyValue::Int(9)));
        assert_eq!(table.get("blur", "invert"), Some(&PropertyValue::Bool(true)));
    }
}
