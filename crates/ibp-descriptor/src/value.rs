//! Property kinds and typed values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value shape of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// `true` or `false`.
    Bool,
    /// Whole number.
    Int,
    /// Floating point number.
    Double,
    /// `#RRGGBB` color.
    Color,
    /// One token out of a fixed set.
    Enum,
    /// Free text.
    String,
}

impl PropertyKind {
    /// Returns `true` for [`Self::Int`] and [`Self::Double`].
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Double)
    }
}

/// A typed property value.
///
/// Persisted untagged: YAML scalars read back into the natural variant and
/// sequences into [`Self::List`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Double(f64),
    /// Text, color or enum token.
    Text(String),
    /// Multi-component value rendered space separated.
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns the value as a float when it is numeric.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "property integers are small UI quantities"
    )]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Reinterprets textual values according to `kind`.
    ///
    /// Override tables hold plain strings. `"false"` becomes a boolean for a
    /// bool property and `"17 17"` a two-component list for a numeric one.
    /// Text that does not parse for the kind is kept as text.
    #[must_use]
    pub fn coerce(self, kind: PropertyKind) -> Self {
        let Self::Text(text) = &self else {
            return self;
        };
        let trimmed = text.trim();
        match kind {
            PropertyKind::Bool => trimmed.parse::<bool>().map_or(self, Self::Bool),
            PropertyKind::Int | PropertyKind::Double if trimmed.contains(char::is_whitespace) => {
                let parts: Option<Vec<Self>> = trimmed
                    .split_whitespace()
                    .map(|part| parse_number(part, kind))
                    .collect();
                parts.map_or(self, Self::List)
            }
            PropertyKind::Int | PropertyKind::Double => parse_number(trimmed, kind).unwrap_or(self),
            PropertyKind::Color | PropertyKind::Enum | PropertyKind::String => self,
        }
    }
}

fn parse_number(text: &str, kind: PropertyKind) -> Option<PropertyValue> {
    match kind {
        PropertyKind::Int => text.parse().ok().map(PropertyValue::Int),
        _ => text.parse().ok().map(PropertyValue::Double),
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Double(value) if value.is_finite() && value.fract() == 0.0 => {
                write!(f, "{value:.1}")
            }
            Self::Double(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::List(values) => {
                let mut first = true;
                for value in values {
                    if !first {
                        f.write_str(" ")?;
                    }
                    first = false;
                    write!(f, "{value}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PropertyValue::Bool(false), "false")]
    #[case(PropertyValue::Int(75), "75")]
    #[case(PropertyValue::Double(75.0), "75.0")]
    #[case(PropertyValue::Double(0.75), "0.75")]
    #[case(PropertyValue::text("#00FF00"), "#00FF00")]
    #[case(
        PropertyValue::List(vec![PropertyValue::Int(17), PropertyValue::Int(17)]),
        "17 17"
    )]
    fn values_render_in_their_natural_form(#[case] value: PropertyValue, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    #[case(PropertyKind::Bool, "false", PropertyValue::Bool(false))]
    #[case(PropertyKind::Int, "17", PropertyValue::Int(17))]
    #[case(
        PropertyKind::Int,
        "17 17",
        PropertyValue::List(vec![PropertyValue::Int(17), PropertyValue::Int(17)])
    )]
    #[case(PropertyKind::Double, "0.1", PropertyValue::Double(0.1))]
    #[case(PropertyKind::Enum, "rgb", PropertyValue::text("rgb"))]
    #[case(PropertyKind::Int, "lots", PropertyValue::text("lots"))]
    fn coerce_follows_the_kind(
        #[case] kind: PropertyKind,
        #[case] text: &str,
        #[case] expected: PropertyValue,
    ) {
        assert_eq!(PropertyValue::text(text).coerce(kind), expected);
    }

    #[test]
    fn coerced_list_keeps_its_rendering() {
        let value = PropertyValue::text("17 17").coerce(PropertyKind::Int);
        assert_eq!(value.to_string(), "17 17");
    }
}
