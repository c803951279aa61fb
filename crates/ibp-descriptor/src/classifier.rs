//! Declared type to property descriptor classification.
//!
//! The kind comes from an ordered table matched against the declared type;
//! the first matching entry wins. An override table entry fixes both the
//! default and the interesting value. Otherwise defaults come from the UI
//! layout when it declares a current value and from a per-kind baseline
//! when it does not, and the interesting value is the point three quarters
//! of the way through the UI range or a per-kind baseline distinct from the
//! default.

use ibp_inspect::UiHints;

use crate::model::PropertyDescriptor;
use crate::table::ValueTable;
use crate::value::{PropertyKind, PropertyValue};

/// Fraction of the UI range used for bounded interesting values.
pub const INTERESTING_FRACTION: f64 = 0.75;

const INT_WORDS: [&str; 3] = ["int", "long", "short"];
const DOUBLE_WORDS: [&str; 3] = ["double", "float", "qreal"];

/// Enumerated types the plugins use, with the token each defaults to.
const KNOWN_ENUMS: [(&str, &str); 16] = [
    ("Filter::WorkingChannel", "rgb"),
    ("Filter::Position", "front"),
    ("Filter::Direction", "horizontal"),
    ("Filter::Angle", "90clockwise"),
    ("Filter::InterpolationMode", "linear"),
    ("Filter::OutputMode", "normal"),
    ("Filter::Distribution", "uniform"),
    ("Filter::ColorMode", "rgb"),
    ("Filter::SizeMode", "pixels"),
    ("Filter::ResamplingMode", "bicubic"),
    ("Filter::MorphologyOp", "erosion"),
    ("Filter::KernelShape", "rectangle"),
    ("Filter::Reference", "topleft"),
    ("Filter::ResizeMode", "absolute"),
    ("ColorCompositionMode", "normal"),
    ("QPainter::CompositionMode", "source-over"),
];

/// Maps a declared C++ type to a property kind.
///
/// Primitive names match whole words, so `QPoint` is not an int and
/// `unsigned int` is.
#[must_use]
pub fn classify_kind(declared_type: &str) -> PropertyKind {
    let has_word = |words: &[&str]| type_words(declared_type).any(|word| words.contains(&word));

    if has_word(&["bool"]) {
        PropertyKind::Bool
    } else if has_word(&INT_WORDS) {
        PropertyKind::Int
    } else if has_word(&DOUBLE_WORDS) {
        PropertyKind::Double
    } else if has_word(&["QColor"]) {
        PropertyKind::Color
    } else if has_word(&["enum"]) || known_enum_token(declared_type).is_some() {
        PropertyKind::Enum
    } else {
        PropertyKind::String
    }
}

fn type_words(declared_type: &str) -> impl Iterator<Item = &str> {
    declared_type
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
}

fn known_enum_token(declared_type: &str) -> Option<&'static str> {
    KNOWN_ENUMS
        .iter()
        .find(|(name, _)| declared_type.contains(name))
        .map(|(_, token)| *token)
}

/// Recovers the tokens of an inline `enum [Name] { a, b = 2, c }`.
///
/// Initialisers are dropped. Returns `None` when the type holds no inline
/// enumeration or the enumeration is empty.
#[must_use]
pub fn enum_tokens(declared_type: &str) -> Option<Vec<String>> {
    let after_keyword = declared_type
        .match_indices("enum")
        .map(|(index, keyword)| index + keyword.len())
        .find_map(|end| declared_type.get(end..))?;
    let open = after_keyword.find('{')?;
    let body = after_keyword.get(open + 1..)?;
    let close = body.find('}')?;

    let tokens: Vec<String> = body
        .get(..close)?
        .split(',')
        .filter_map(|item| item.split('=').next())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect();
    (!tokens.is_empty()).then_some(tokens)
}

/// Classifies raw properties against an override table.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    overrides: &'a ValueTable,
}

impl<'a> Classifier<'a> {
    /// Creates a classifier consulting `overrides`.
    #[must_use]
    pub const fn new(overrides: &'a ValueTable) -> Self {
        Self { overrides }
    }

    /// Builds the descriptor of property `name` of plugin `plugin`.
    #[must_use]
    pub fn classify(
        &self,
        plugin: &str,
        name: &str,
        declared_type: &str,
        hints: UiHints,
    ) -> PropertyDescriptor {
        let kind = classify_kind(declared_type);
        let tokens = match kind {
            PropertyKind::Enum => enum_tokens(declared_type),
            _ => None,
        };
        let range = NumericRange::for_kind(kind, hints);

        let (default_value, interesting_value) = self.overrides.get(plugin, name).map_or_else(
            || {
                let default = default_value(kind, declared_type, tokens.as_deref(), hints, range);
                let interesting = interesting_value(kind, tokens.as_deref(), range, &default);
                (default, interesting)
            },
            |value| {
                let forced = value.clone().coerce(kind);
                (forced.clone(), forced)
            },
        );

        PropertyDescriptor {
            name: name.to_owned(),
            kind,
            default_value,
            interesting_value,
            description: String::new(),
            comment: comment(kind, tokens.as_deref(), range),
            min_value: range.minimum.map(|bound| range.value(kind, bound)),
            max_value: range.maximum.map(|bound| range.value(kind, bound)),
            enum_values: tokens,
        }
    }
}

/// UI bounds of a numeric property.
#[derive(Debug, Clone, Copy, Default)]
struct NumericRange {
    minimum: Option<f64>,
    maximum: Option<f64>,
}

impl NumericRange {
    fn for_kind(kind: PropertyKind, hints: UiHints) -> Self {
        match kind {
            PropertyKind::Int => Self {
                minimum: hints.minimum.map(f64::round),
                maximum: hints.maximum.map(f64::round),
            },
            PropertyKind::Double => Self {
                minimum: hints.minimum,
                maximum: hints.maximum,
            },
            _ => Self::default(),
        }
    }

    const fn both(self) -> Option<(f64, f64)> {
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    fn clamp(self, value: f64) -> f64 {
        let raised = self.minimum.map_or(value, |min| value.max(min));
        self.maximum.map_or(raised, |max| raised.min(max))
    }

    fn value(self, kind: PropertyKind, number: f64) -> PropertyValue {
        match kind {
            PropertyKind::Int => PropertyValue::Int(to_int(number)),
            _ => PropertyValue::Double(number),
        }
    }
}

fn default_value(
    kind: PropertyKind,
    declared_type: &str,
    tokens: Option<&[String]>,
    hints: UiHints,
    range: NumericRange,
) -> PropertyValue {
    match kind {
        PropertyKind::Bool => PropertyValue::Bool(true),
        PropertyKind::Int => {
            PropertyValue::Int(to_int(range.clamp(hints.value.map_or(3.0, f64::round))))
        }
        PropertyKind::Double => PropertyValue::Double(range.clamp(hints.value.unwrap_or(0.3))),
        PropertyKind::Color => PropertyValue::text("#FF0000"),
        PropertyKind::Enum => {
            let token = known_enum_token(declared_type)
                .or_else(|| tokens.and_then(<[String]>::first).map(String::as_str))
                .unwrap_or("0");
            PropertyValue::text(token)
        }
        PropertyKind::String => PropertyValue::text("normal"),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "interesting values interpolate the UI range"
)]
fn interesting_value(
    kind: PropertyKind,
    tokens: Option<&[String]>,
    range: NumericRange,
    default: &PropertyValue,
) -> PropertyValue {
    match (kind, range.both()) {
        (PropertyKind::Int, Some((min, max))) => {
            PropertyValue::Int(to_int(min + INTERESTING_FRACTION * (max - min)))
        }
        (PropertyKind::Double, Some((min, max))) => {
            PropertyValue::Double(round_to_hundredths(min + INTERESTING_FRACTION * (max - min)))
        }
        (PropertyKind::Int, None) => {
            let baseline = match default {
                PropertyValue::Int(75) => 76.0,
                _ => 75.0,
            };
            PropertyValue::Int(to_int(range.clamp(baseline)))
        }
        (PropertyKind::Double, None) => {
            let baseline = match default.as_f64() {
                Some(current) if (current - INTERESTING_FRACTION).abs() < f64::EPSILON => 1.0,
                _ => INTERESTING_FRACTION,
            };
            PropertyValue::Double(range.clamp(baseline))
        }
        (PropertyKind::Bool, _) => match default {
            PropertyValue::Bool(value) => PropertyValue::Bool(!value),
            _ => PropertyValue::Bool(false),
        },
        (PropertyKind::Color, _) => PropertyValue::text("#00FF00"),
        (PropertyKind::Enum, _) => {
            let token = tokens.and_then(|all| all.get(1)).map_or("1", String::as_str);
            PropertyValue::text(token)
        }
        (PropertyKind::String, _) => PropertyValue::text("inverted"),
    }
}

fn comment(kind: PropertyKind, tokens: Option<&[String]>, range: NumericRange) -> String {
    match (kind, range.both()) {
        (PropertyKind::Bool, _) => "Toggle between true/false states".to_owned(),
        (PropertyKind::Int, Some((min, max))) => {
            format!("Integer value between {} and {}", to_int(min), to_int(max))
        }
        (PropertyKind::Int, None) => "Integer value".to_owned(),
        (PropertyKind::Double, Some((min, max))) => {
            format!("Floating point value between {min:.1} and {max:.1}")
        }
        (PropertyKind::Double, None) => "Floating point value".to_owned(),
        (PropertyKind::Color, _) => "Color in hex format (#RRGGBB)".to_owned(),
        (PropertyKind::Enum, _) => tokens.map_or_else(
            || "Enumerated value".to_owned(),
            |all| format!("Possible values: {}", all.join(", ")),
        ),
        (PropertyKind::String, _) => "Text value".to_owned(),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "UI ranges are far inside the i64 range"
)]
fn to_int(number: f64) -> i64 {
    number.round() as i64
}

#[expect(clippy::float_arithmetic, reason = "rounding to two decimals")]
fn round_to_hundredths(number: f64) -> f64 {
    (number * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn hints(minimum: Option<f64>, maximum: Option<f64>, value: Option<f64>) -> UiHints {
        UiHints {
            minimum,
            maximum,
            value,
        }
    }

    fn classify(name: &str, declared_type: &str, ui: UiHints) -> PropertyDescriptor {
        let overrides = ValueTable::new();
        Classifier::new(&overrides).classify("sample", name, declared_type, ui)
    }

    #[rstest]
    #[case("bool", PropertyKind::Bool)]
    #[case("int", PropertyKind::Int)]
    #[case("unsigned int", PropertyKind::Int)]
    #[case("long", PropertyKind::Int)]
    #[case("double", PropertyKind::Double)]
    #[case("const qreal &", PropertyKind::Double)]
    #[case("float", PropertyKind::Double)]
    #[case("const QColor &", PropertyKind::Color)]
    #[case("Filter::WorkingChannel", PropertyKind::Enum)]
    #[case("QPainter::CompositionMode", PropertyKind::Enum)]
    #[case("enum Mode { a, b }", PropertyKind::Enum)]
    #[case("QPoint", PropertyKind::String)]
    #[case("const QString &", PropertyKind::String)]
    fn kinds_follow_the_type_table(#[case] declared_type: &str, #[case] expected: PropertyKind) {
        assert_eq!(classify_kind(declared_type), expected);
    }

    #[rstest]
    #[case(0.0, 100.0, 75)]
    #[case(1.0, 50.0, 38)]
    #[case(-100.0, 100.0, 50)]
    #[case(0.0, 255.0, 191)]
    fn bounded_ints_land_three_quarters_through(
        #[case] min: f64,
        #[case] max: f64,
        #[case] expected: i64,
    ) {
        let property = classify("radius", "int", hints(Some(min), Some(max), None));
        assert_eq!(property.interesting_value, PropertyValue::Int(expected));
        assert_eq!(property.comment, format!("Integer value between {min} and {max}"));
    }

    #[test]
    fn bounded_doubles_round_to_hundredths() {
        let property = classify("strength", "double", hints(Some(0.0), Some(2.5), Some(1.0)));
        assert_eq!(property.interesting_value, PropertyValue::Double(1.88));
        assert_eq!(property.default_value, PropertyValue::Double(1.0));
        assert_eq!(property.min_value, Some(PropertyValue::Double(0.0)));
        assert_eq!(property.max_value, Some(PropertyValue::Double(2.5)));
        assert_eq!(property.comment, "Floating point value between 0.0 and 2.5");
    }

    #[test]
    fn defaults_are_clamped_into_the_ui_range() {
        let property = classify("radius", "int", hints(Some(5.0), Some(9.0), None));
        assert_eq!(property.default_value, PropertyValue::Int(5));
    }

    #[rstest]
    #[case("bool", PropertyValue::Bool(true), PropertyValue::Bool(false))]
    #[case("int", PropertyValue::Int(3), PropertyValue::Int(75))]
    #[case("double", PropertyValue::Double(0.3), PropertyValue::Double(0.75))]
    #[case("QColor", PropertyValue::text("#FF0000"), PropertyValue::text("#00FF00"))]
    #[case("QString", PropertyValue::text("normal"), PropertyValue::text("inverted"))]
    #[case(
        "Filter::WorkingChannel",
        PropertyValue::text("rgb"),
        PropertyValue::text("1")
    )]
    fn unbounded_baselines_differ_from_defaults(
        #[case] declared_type: &str,
        #[case] default_value: PropertyValue,
        #[case] interesting_value: PropertyValue,
    ) {
        let property = classify("value", declared_type, UiHints::default());
        assert_eq!(property.default_value, default_value);
        assert_eq!(property.interesting_value, interesting_value);
        assert_ne!(property.default_value, property.interesting_value);
    }

    #[test]
    fn unbounded_ui_value_at_the_baseline_still_differs() {
        let property = classify("radius", "int", hints(None, None, Some(75.0)));
        assert_eq!(property.default_value, PropertyValue::Int(75));
        assert_eq!(property.interesting_value, PropertyValue::Int(76));
    }

    #[test]
    fn inline_enums_list_their_tokens() {
        let property = classify("mode", "enum Mode { fast, exact = 4, lazy }", UiHints::default());
        assert_eq!(
            property.enum_values,
            Some(vec!["fast".to_owned(), "exact".to_owned(), "lazy".to_owned()])
        );
        assert_eq!(property.default_value, PropertyValue::text("fast"));
        assert_eq!(property.interesting_value, PropertyValue::text("exact"));
        assert_eq!(property.comment, "Possible values: fast, exact, lazy");
    }

    #[test]
    fn overrides_take_absolute_precedence() {
        let overrides = ValueTable::builtin_overrides();
        let classifier = Classifier::new(&overrides);

        let contrast = classifier.classify(
            "ibp.imagefilter.brightnesscontrast",
            "rgbbrightnesscontrast",
            "const QString &",
            hints(Some(0.0), Some(100.0), None),
        );
        assert_eq!(contrast.default_value.to_string(), "17 17");
        assert_eq!(contrast.interesting_value.to_string(), "17 17");

        let soft = classifier.classify(
            "brightnesscontrast",
            "usesoftmode",
            "bool",
            UiHints::default(),
        );
        assert_eq!(soft.default_value, PropertyValue::Bool(false));
        assert_eq!(soft.interesting_value, PropertyValue::Bool(false));
    }

    #[test]
    fn overrides_replace_ui_current_values() {
        let overrides = ValueTable::new().with_value("blur", "radius", PropertyValue::Int(12));
        let property = Classifier::new(&overrides).classify(
            "blur",
            "radius",
            "int",
            hints(Some(0.0), Some(100.0), Some(1.0)),
        );

        assert_eq!(property.default_value, PropertyValue::Int(12));
        assert_eq!(property.interesting_value, PropertyValue::Int(12));
        assert_eq!(property.min_value, Some(PropertyValue::Int(0)));
    }

    #[test]
    fn non_numeric_kinds_ignore_ui_bounds() {
        let property = classify("invert", "bool", hints(Some(0.0), Some(1.0), Some(1.0)));
        assert_eq!(property.min_value, None);
        assert_eq!(property.max_value, None);
    }
}
