//! Projection of descriptors and raw scans into legacy configurations.

use std::collections::BTreeMap;

use ibp_descriptor::{
    Classifier, PluginDescriptor, PropertyDescriptor, PropertyKind, PropertyValue, ValueTable,
    plugin_id,
};
use ibp_inspect::{PluginScan, UiHints};

use crate::config::LegacyConfig;

/// Name of the single filter section a generated configuration carries.
pub const FILTER_SECTION: &str = "imageFilter1";
/// Name of the metadata section.
pub const INFO_SECTION: &str = "info";
/// Fixed `fileType` of a filter list.
pub const FILE_TYPE: &str = "ibp.imagefilterlist";
/// Fraction of the UI range used for unset numeric starting values.
pub const STARTING_FRACTION: f64 = 0.25;

/// Which descriptor value seeds each property line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueSource {
    /// The descriptor's example map, falling back to the interesting value.
    #[default]
    Example,
    /// Each property's interesting value.
    Interesting,
}

/// Builds the configuration for `descriptor`.
///
/// The filter section lists `id`, `bypass=false` and then one key per
/// property in sorted order.
#[must_use]
pub fn from_descriptor(descriptor: &PluginDescriptor, source: ValueSource) -> LegacyConfig {
    let values = descriptor.properties.values().map(|property| {
        let value = match source {
            ValueSource::Example => descriptor
                .example
                .get(&property.name)
                .unwrap_or(&property.interesting_value),
            ValueSource::Interesting => &property.interesting_value,
        };
        (property.name.clone(), value.to_string())
    });

    assemble(
        &descriptor.id,
        values,
        &descriptor.description,
        &descriptor.name,
    )
}

/// Generates configurations straight from source scans.
///
/// This path skips the canonical descriptor. Every override recorded for
/// the plugin is emitted. Each scanned property starts from, in order, its
/// override, `true` for booleans, the literal its constructor assigns, the
/// UI current value, a quarter of the way into its UI range, and the
/// classifier's baseline.
#[derive(Debug, Clone, Copy)]
pub struct DirectGenerator<'a> {
    overrides: &'a ValueTable,
}

impl<'a> DirectGenerator<'a> {
    /// Creates a generator consulting `overrides`.
    #[must_use]
    pub const fn new(overrides: &'a ValueTable) -> Self {
        Self { overrides }
    }

    /// Builds the configuration for the plugin in directory `dir_name`.
    #[must_use]
    pub fn generate(&self, dir_name: &str, short_id: &str, scan: &PluginScan) -> LegacyConfig {
        let mut values: BTreeMap<String, String> = self
            .overrides
            .plugin(short_id)
            .into_iter()
            .flatten()
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();

        let classifier = Classifier::new(self.overrides);
        for raw in scan.properties.values() {
            let hints = scan.hints_for(&raw.name);
            let property = classifier.classify(short_id, &raw.name, &raw.declared_type, hints);
            let value = self.starting_value(short_id, property, scan, hints);
            values.insert(raw.name.clone(), value.to_string());
        }

        let description = scan.metadata.description.clone().unwrap_or_else(|| {
            format!("This is a single filter configuration for {dir_name}.")
        });
        let name = scan.metadata.name.as_deref().unwrap_or(dir_name);

        assemble(&plugin_id(short_id), values, &description, name)
    }

    fn starting_value(
        &self,
        short_id: &str,
        property: PropertyDescriptor,
        scan: &PluginScan,
        hints: UiHints,
    ) -> PropertyValue {
        let forced = self.overrides.get(short_id, &property.name).is_some();
        if forced || property.kind == PropertyKind::Bool {
            return property.default_value;
        }
        if let Some(literal) = scan.constructor_default(&property.name) {
            return PropertyValue::text(literal).coerce(property.kind);
        }
        if hints.value.is_some() {
            return property.default_value;
        }
        quarter_into_range(property.kind, hints).unwrap_or(property.default_value)
    }
}

/// The point a quarter of the way into a numeric UI range.
///
/// Ranges spanning zero start a quarter of the way from zero to the
/// maximum. Ranges entirely below zero have no starting point.
#[expect(
    clippy::float_arithmetic,
    reason = "starting values interpolate the UI range"
)]
fn quarter_into_range(kind: PropertyKind, hints: UiHints) -> Option<PropertyValue> {
    let (min, max) = hints.bounds()?;
    let start = if min < 0.0 && max > 0.0 {
        max * STARTING_FRACTION
    } else if min >= 0.0 {
        min + STARTING_FRACTION * (max - min)
    } else {
        return None;
    };
    match kind {
        PropertyKind::Int => Some(PropertyValue::Int(truncate(start))),
        PropertyKind::Double => Some(PropertyValue::Double((start * 100.0).round() / 100.0)),
        _ => None,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "UI ranges are far inside the i64 range"
)]
fn truncate(number: f64) -> i64 {
    number.trunc() as i64
}

fn assemble(
    id: &str,
    values: impl IntoIterator<Item = (String, String)>,
    description: &str,
    name: &str,
) -> LegacyConfig {
    let mut config = LegacyConfig::new();

    let filter = config.section_mut(FILTER_SECTION);
    filter.set("id", id);
    filter.set("bypass", "false");
    for (key, value) in values {
        filter.set(key, value);
    }

    let info = config.section_mut(INFO_SECTION);
    info.set("description", description);
    info.set("fileType", FILE_TYPE);
    info.set("nFilters", "1");
    info.set("name", name);

    config
}
