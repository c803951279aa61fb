//! Descriptor assembly from inspection results.

use std::collections::BTreeMap;

use ibp_inspect::{PluginMetadata, PluginScan};

use crate::classifier::Classifier;
use crate::model::{PluginDescriptor, PropertyDescriptor, plugin_id};
use crate::table::ValueTable;

/// Assembles [`PluginDescriptor`]s.
///
/// The builder holds only borrowed, read-only tables and performs no I/O, so
/// it can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct DescriptorBuilder<'a> {
    overrides: &'a ValueTable,
    examples: &'a ValueTable,
}

impl<'a> DescriptorBuilder<'a> {
    /// Creates a builder consulting the override and curated example tables.
    #[must_use]
    pub const fn new(overrides: &'a ValueTable, examples: &'a ValueTable) -> Self {
        Self {
            overrides,
            examples,
        }
    }

    /// Classifies every scanned property and assembles the descriptor.
    #[must_use]
    pub fn build(&self, short_id: &str, scan: &PluginScan) -> PluginDescriptor {
        let classifier = Classifier::new(self.overrides);
        let properties = scan.properties.values().map(|raw| {
            classifier.classify(
                short_id,
                &raw.name,
                &raw.declared_type,
                scan.hints_for(&raw.name),
            )
        });
        self.assemble(short_id, &scan.metadata, properties)
    }

    /// Assembles a descriptor from already classified properties.
    ///
    /// Missing metadata defaults from the short id. Each example entry comes
    /// from the curated table when it has one, and from the property's
    /// interesting value otherwise.
    #[must_use]
    pub fn assemble(
        &self,
        short_id: &str,
        metadata: &PluginMetadata,
        classified: impl IntoIterator<Item = PropertyDescriptor>,
    ) -> PluginDescriptor {
        let properties: BTreeMap<String, PropertyDescriptor> = classified
            .into_iter()
            .map(|property| (property.name.clone(), property))
            .collect();

        let example = properties
            .values()
            .map(|property| {
                let value = self
                    .examples
                    .get(short_id, &property.name)
                    .unwrap_or(&property.interesting_value)
                    .clone();
                (property.name.clone(), value)
            })
            .collect();

        PluginDescriptor {
            id: plugin_id(short_id),
            name: metadata
                .name
                .clone()
                .unwrap_or_else(|| short_id.to_owned()),
            description: metadata
                .description
                .clone()
                .unwrap_or_else(|| format!("Image filter plugin for {short_id}")),
            example,
            properties,
        }
    }
}
