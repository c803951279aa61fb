//! Raw inspection results.

use std::collections::BTreeMap;

/// Plugin-level text recovered from the metadata source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginMetadata {
    /// Display name, when declared.
    pub name: Option<String>,
    /// Human description, when declared.
    pub description: Option<String>,
}

impl PluginMetadata {
    /// Returns `true` when neither field was recovered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// Records `value` under `key` unless the key was already seen.
    ///
    /// Keys other than `name` and `description` are ignored.
    pub(crate) fn record(&mut self, key: &str, value: &str) {
        let slot = match key {
            "name" => &mut self.name,
            "description" => &mut self.description,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value.to_owned());
        }
    }
}

/// One settable parameter recovered from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty {
    /// Normalized property name.
    pub name: String,
    /// Declared parameter type with whitespace collapsed.
    pub declared_type: String,
}

impl RawProperty {
    /// Creates a raw property.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// Raw properties keyed by normalized name.
pub type RawProperties = BTreeMap<String, RawProperty>;

/// Literal constructor initialisers keyed by normalized property name.
pub type ConstructorDefaults = BTreeMap<String, String>;

/// Numeric hints recovered from a UI layout for one parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiHints {
    /// Declared `minimum`.
    pub minimum: Option<f64>,
    /// Declared `maximum`.
    pub maximum: Option<f64>,
    /// Declared current `value`.
    pub value: Option<f64>,
}

impl UiHints {
    /// Returns both bounds when the layout declared them.
    #[must_use]
    pub const fn bounds(&self) -> Option<(f64, f64)> {
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }
}

/// Everything recovered for one plugin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginScan {
    /// Plugin-level name and description.
    pub metadata: PluginMetadata,
    /// Properties from mutators and header members.
    pub properties: RawProperties,
    /// UI hints keyed by normalized property name.
    pub ui_hints: BTreeMap<String, UiHints>,
    /// Literal values the filter constructor assigns.
    pub constructor_defaults: ConstructorDefaults,
}

impl PluginScan {
    /// Returns the UI hints for `name`, or empty hints.
    #[must_use]
    pub fn hints_for(&self, name: &str) -> UiHints {
        self.ui_hints.get(name).copied().unwrap_or_default()
    }

    /// Returns the literal the constructor assigns to `name`, if any.
    #[must_use]
    pub fn constructor_default(&self, name: &str) -> Option<&str> {
        self.constructor_defaults.get(name).map(String::as_str)
    }
}
