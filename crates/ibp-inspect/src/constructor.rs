//! Constructor initialiser scanning.
//!
//! A filter constructor that sets a member to a literal, either in its
//! initialiser list or by assignment in its body, records the value the
//! plugin starts with. Body assignments run after the list and win.

use regex::Regex;

use crate::error::InspectError;
use crate::inspector::compile_pattern;
use crate::model::ConstructorDefaults;
use crate::normalize;

/// `Class::Class(<params>) [: <initialisers>] {`
const CONSTRUCTOR_PATTERN: &str = r"\b(\w+)\s*::\s*(\w+)\s*\([^()]*\)\s*(?::([^{;]*))?\{";

/// `mMember(<literal>)` inside an initialiser list.
const INITIALISER_PATTERN: &str =
    r"\b(\w+)\s*\(\s*(true|false|[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)[fFlLuU]*\s*\)";

/// `mMember = <literal>;` inside a constructor body.
const ASSIGNMENT_PATTERN: &str =
    r"\b(\w+)\s*=\s*(true|false|[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)[fFlLuU]*\s*;";

/// Collects literal member initialisers from every constructor in `source`.
///
/// Numeric suffixes such as `f` are dropped; values are otherwise kept as
/// written.
///
/// # Errors
///
/// Returns [`InspectError::Pattern`] if a pattern fails to compile.
pub fn constructor_defaults(source: &str) -> Result<ConstructorDefaults, InspectError> {
    let constructor = compile_pattern(CONSTRUCTOR_PATTERN)?;
    let initialiser = compile_pattern(INITIALISER_PATTERN)?;
    let assignment = compile_pattern(ASSIGNMENT_PATTERN)?;

    let mut defaults = ConstructorDefaults::new();
    for captures in constructor.captures_iter(source) {
        let (Some(whole), Some(class), Some(method)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };
        if class.as_str() != method.as_str() {
            continue;
        }
        if let Some(list) = captures.get(3) {
            record(&initialiser, list.as_str(), &mut defaults);
        }
        record(&assignment, block_body(source, whole.end()), &mut defaults);
    }
    Ok(defaults)
}

fn record(pattern: &Regex, text: &str, defaults: &mut ConstructorDefaults) {
    for captures in pattern.captures_iter(text) {
        let (Some(member), Some(value)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        if let Some(name) = normalize::member_name(member.as_str()) {
            defaults.insert(name, value.as_str().to_owned());
        }
    }
}

/// Text from `start` up to the brace closing the block opened just before it.
fn block_body(source: &str, start: usize) -> &str {
    let rest = source.get(start..).unwrap_or_default();
    let mut depth = 0_usize;
    for (index, c) in rest.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => return rest.get(..index).unwrap_or(rest),
            '}' => depth -= 1,
            _ => {}
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FILTER: &str = r"
Filter::Filter(QObject *parent)
    : ImageFilter(parent), mRadius(5), mStrength(0.5f), mInvert(false)
{
    mColor = QColor(Qt::red);
    if (enabled()) {
        m_threshold = -12;
    }
    mStrength = 1.25;
}

Filter::~Filter()
{
    mRadius = 99;
}

void Filter::setRadius(int radius)
{
    mLevel = 7;
}
";

    #[test]
    fn initialisers_and_body_assignments_are_collected() {
        let defaults = constructor_defaults(FILTER).expect("scan");

        assert_eq!(defaults.get("radius").map(String::as_str), Some("5"));
        assert_eq!(defaults.get("invert").map(String::as_str), Some("false"));
        assert_eq!(defaults.get("threshold").map(String::as_str), Some("-12"));
        assert_eq!(defaults.get("strength").map(String::as_str), Some("1.25"));
    }

    #[test]
    fn other_methods_and_non_literals_are_ignored() {
        let defaults = constructor_defaults(FILTER).expect("scan");

        assert!(!defaults.contains_key("level"));
        assert!(!defaults.contains_key("color"));
        assert_eq!(defaults.len(), 4);
    }

    #[rstest]
    #[case("Filter::Filter() : mGamma(2.2f) {}", "gamma", "2.2")]
    #[case("Filter::Filter() { this->mCount = 3u; }", "count", "3")]
    #[case("ns::Filter::Filter() : m_enabled(true) {}", "enabled", "true")]
    fn literal_spellings_are_normalized(
        #[case] source: &str,
        #[case] name: &str,
        #[case] expected: &str,
    ) {
        let defaults = constructor_defaults(source).expect("scan");
        assert_eq!(defaults.get(name).map(String::as_str), Some(expected));
    }

    #[test]
    fn sources_without_constructors_yield_nothing() {
        let defaults = constructor_defaults("void Filter::setRadius(int r) { mRadius = r; }")
            .expect("scan");
        assert!(defaults.is_empty());
    }
}
