//! Unit tests for the inspection strategies.

use ibp_syntax::SyntaxError;
use rstest::{fixture, rstest};

use super::*;
use crate::model::RawProperty;

const FILTER_SOURCE: &str = r#"#include "filter.h"

Filter::Filter() : mRadius(3) {}

void Filter::setRadius(int radius)
{
    if (radius == mRadius)
        return;
    mRadius = radius;
}

void Filter::setColor(const QColor &color)
{
    mColor = color;
}

void Filter::setWorkingChannel(Filter::WorkingChannel channel)
{
    mWorkingChannel = channel;
}

void Filter::setBounds(int lower, int upper)
{
    mLower = lower;
    mUpper = upper;
}
"#;

const METADATA_SOURCE: &str = r#"#include "plugin.h"

QMap<QString, QString> Plugin::info()
{
    QMap<QString, QString> info;
    info.insert("name", QObject::tr("Brightness/Contrast"));
    info.insert("description", QObject::tr("Adjusts brightness and contrast"));
    info.insert("name", QObject::tr("Shadowed"));
    return info;
}
"#;

/// Inspector double whose front end always fails.
struct UnavailableInspector;

impl Inspector for UnavailableInspector {
    fn metadata(&self, _source: &str) -> Result<PluginMetadata, InspectError> {
        Err(SyntaxError::parse("no tree").into())
    }

    fn mutators(&self, _source: &str) -> Result<RawProperties, InspectError> {
        Err(SyntaxError::parse("no tree").into())
    }
}

#[fixture]
fn pattern() -> PatternInspector {
    PatternInspector::new().expect("patterns compile")
}

fn expected_properties() -> RawProperties {
    [
        RawProperty::new("color", "const QColor &"),
        RawProperty::new("radius", "int"),
        RawProperty::new("workingchannel", "Filter::WorkingChannel"),
    ]
    .into_iter()
    .map(|property| (property.name.clone(), property))
    .collect()
}

#[test]
fn structural_recovers_single_parameter_mutators() {
    let found = StructuralInspector::new()
        .mutators(FILTER_SOURCE)
        .expect("inspect");
    assert_eq!(found, expected_properties());
}

#[rstest]
fn pattern_recovers_single_parameter_mutators(pattern: PatternInspector) {
    let found = pattern.mutators(FILTER_SOURCE).expect("inspect");
    assert_eq!(found, expected_properties());
}

#[rstest]
fn both_strategies_agree_on_metadata(pattern: PatternInspector) {
    let structural = StructuralInspector::new()
        .metadata(METADATA_SOURCE)
        .expect("inspect");
    let patterned = pattern.metadata(METADATA_SOURCE).expect("inspect");

    assert_eq!(structural.name.as_deref(), Some("Brightness/Contrast"));
    assert_eq!(
        structural.description.as_deref(),
        Some("Adjusts brightness and contrast")
    );
    assert_eq!(structural, patterned);
}

#[test]
fn structural_sees_declarations_with_default_arguments() {
    let source = "class Filter {\npublic:\n    void setStrength(double strength = 0.5);\n};\n";
    let found = StructuralInspector::new().mutators(source).expect("inspect");
    assert_eq!(
        found.get("strength"),
        Some(&RawProperty::new("strength", "double"))
    );
}

#[test]
fn structural_ignores_lowercase_set_prefixes() {
    let source = "void Filter::setup(int value) {}\nvoid Filter::settings(bool on) {}\n";
    let found = StructuralInspector::new().mutators(source).expect("inspect");
    assert!(found.is_empty(), "unexpected mutators: {found:?}");
}

#[test]
fn structural_rejects_broken_sources_without_matches() {
    let result = StructuralInspector::new().metadata("}}}} (((( info.insert(");
    assert!(
        matches!(result, Err(InspectError::BrokenTree { .. })),
        "expected broken tree, got {result:?}"
    );
}

#[test]
fn inspection_is_deterministic() {
    let inspector = FallbackInspector::standard().expect("inspector");
    let first = inspector.mutators(FILTER_SOURCE).expect("inspect");
    let second = inspector.mutators(FILTER_SOURCE).expect("inspect");
    assert_eq!(first, second);
}

#[rstest]
fn fallback_substitutes_patterns_when_the_front_end_fails(pattern: PatternInspector) {
    let fallback = FallbackInspector::new(UnavailableInspector, pattern);
    let structural = StructuralInspector::new();

    assert_eq!(
        fallback.metadata(METADATA_SOURCE).expect("metadata"),
        structural.metadata(METADATA_SOURCE).expect("metadata"),
    );
    assert_eq!(
        fallback.mutators(FILTER_SOURCE).expect("mutators"),
        structural.mutators(FILTER_SOURCE).expect("mutators"),
    );
}

#[rstest]
fn fallback_keeps_a_non_empty_primary_result(pattern: PatternInspector) {
    let source = "void setRadius(int radius = 3);";
    let fallback = FallbackInspector::new(StructuralInspector::new(), pattern);
    let found = fallback.mutators(source).expect("inspect");
    assert_eq!(found.get("radius"), Some(&RawProperty::new("radius", "int")));
}

#[test]
fn collapse_whitespace_trims_and_joins() {
    assert_eq!(collapse_whitespace("  const\tQColor \n &  "), "const QColor &");
}
