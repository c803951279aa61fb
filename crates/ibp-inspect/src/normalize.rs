//! Parameter name normalization.
//!
//! Mutators, data members and UI widgets all name the same parameter in
//! different styles (`setBrightnessContrast`, `mBrightnessContrast`,
//! `mSpinBrightnessContrast`). Each normalizer reduces its style to the same
//! key: prefix stripped, underscores dropped, lowercased, nothing inserted.

const MUTATOR_PREFIX: &str = "set";
const WIDGET_PREFIXES: [&str; 2] = ["mspin", "mslider"];

/// Normalizes a mutator identifier such as `setBrightnessContrast`.
///
/// Returns `None` unless the identifier is `set` followed by an upper-case
/// letter or an underscore, and something remains after normalization.
#[must_use]
pub fn mutator_name(identifier: &str) -> Option<String> {
    let rest = identifier.strip_prefix(MUTATOR_PREFIX)?;
    let first = rest.chars().next()?;
    if !(first.is_ascii_uppercase() || first == '_') {
        return None;
    }
    non_empty(fold(rest))
}

/// Normalizes a data member name such as `mRadius` or `m_radius`.
#[must_use]
pub fn member_name(identifier: &str) -> Option<String> {
    let rest = identifier
        .strip_prefix("m_")
        .or_else(|| {
            identifier
                .strip_prefix('m')
                .filter(|tail| tail.starts_with(|c: char| c.is_ascii_uppercase()))
        })
        .unwrap_or(identifier);
    non_empty(fold(rest))
}

/// Normalizes a UI widget name such as `mSpinRadius` or `mSliderRadius`.
///
/// The prefix match ignores case. Widgets without a recognized prefix yield
/// `None`.
#[must_use]
pub fn widget_name(widget: &str) -> Option<String> {
    WIDGET_PREFIXES.iter().find_map(|prefix| {
        let head = widget.get(..prefix.len())?;
        if !head.eq_ignore_ascii_case(prefix) {
            return None;
        }
        widget.get(prefix.len()..).map(fold).and_then(non_empty)
    })
}

fn fold(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn non_empty(name: String) -> Option<String> {
    (!name.is_empty()).then_some(name)
}
