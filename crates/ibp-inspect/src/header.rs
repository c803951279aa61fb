//! Companion header scanning.

use crate::error::InspectError;
use crate::inspector::compile_pattern;
use crate::model::{RawProperties, RawProperty};
use crate::normalize;

const MEMBER_PATTERN: &str = r"\b(bool|int|double)\s+(m[A-Z]\w*)\s*;";

/// Collects `bool`, `int` and `double` data members named `m<Name>`.
///
/// # Errors
///
/// Returns [`InspectError::Pattern`] if the member pattern fails to compile.
pub fn header_members(source: &str) -> Result<RawProperties, InspectError> {
    let pattern = compile_pattern(MEMBER_PATTERN)?;
    let mut members = RawProperties::new();
    for captures in pattern.captures_iter(source) {
        let (Some(kind), Some(member)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        if let Some(name) = normalize::member_name(member.as_str()) {
            members
                .entry(name.clone())
                .or_insert_with(|| RawProperty::new(name, kind.as_str()));
        }
    }
    Ok(members)
}

/// Adds header members to `properties` without replacing mutator entries.
pub fn augment_with_members(properties: &mut RawProperties, members: RawProperties) {
    for (name, member) in members {
        properties.entry(name).or_insert(member);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = r"
class Filter : public ImageFilter
{
public:
    void setRadius(int radius);

private:
    int mRadius;
    bool mUseSoftMode;
    double mStrength ;
    QColor mColor;
    int counter;
    static int mCache = 0;
};
";

    #[test]
    fn header_members_collects_primitive_members() {
        let members = header_members(HEADER).expect("scan");
        let names: Vec<&str> = members.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["radius", "strength", "usesoftmode"]);
        assert_eq!(
            members.get("usesoftmode"),
            Some(&RawProperty::new("usesoftmode", "bool"))
        );
    }

    #[test]
    fn augmentation_keeps_mutator_types() {
        let mut properties = RawProperties::new();
        properties.insert("radius".into(), RawProperty::new("radius", "unsigned int"));

        augment_with_members(&mut properties, header_members(HEADER).expect("scan"));

        assert_eq!(
            properties.get("radius"),
            Some(&RawProperty::new("radius", "unsigned int"))
        );
        assert!(properties.contains_key("strength"));
    }
}
