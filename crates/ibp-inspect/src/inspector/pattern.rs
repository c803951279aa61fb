//! Regular-expression based inspection over raw source text.

use regex::Regex;

use super::{Inspector, collapse_whitespace};
use crate::error::InspectError;
use crate::model::{PluginMetadata, RawProperties, RawProperty};
use crate::normalize;

/// `.insert("name"|"description", [wrapper(]"literal"`
const METADATA_PATTERN: &str =
    r#"\.insert\(\s*"(name|description)"\s*,\s*(?:[\w:]+\(\s*)?"((?:[^"\\]|\\.)*)""#;

/// `set<Name>(<type tokens> <identifier>)`
const MUTATOR_PATTERN: &str =
    r"\b(set[A-Z_]\w*)\s*\(\s*([\w:]+(?:\s+[\w:]+)*\s*[&*]*)\s*\b(\w+)\s*\)";

/// Inspector that matches line-oriented patterns over raw text.
///
/// Used when the structural front end fails or finds nothing. It recognises
/// the common spellings only: a mutator with a default argument or a
/// templated parameter type is invisible to it.
#[derive(Debug, Clone)]
pub struct PatternInspector {
    metadata: Regex,
    mutator: Regex,
}

impl PatternInspector {
    /// Compiles the scanning patterns.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Pattern`] if a pattern fails to compile.
    pub fn new() -> Result<Self, InspectError> {
        Ok(Self {
            metadata: compile_pattern(METADATA_PATTERN)?,
            mutator: compile_pattern(MUTATOR_PATTERN)?,
        })
    }
}

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, InspectError> {
    Regex::new(pattern).map_err(|e| InspectError::pattern(e.to_string()))
}

impl Inspector for PatternInspector {
    fn metadata(&self, source: &str) -> Result<PluginMetadata, InspectError> {
        let mut metadata = PluginMetadata::default();
        for captures in self.metadata.captures_iter(source) {
            if let (Some(key), Some(value)) = (captures.get(1), captures.get(2)) {
                metadata.record(key.as_str(), value.as_str());
            }
        }
        Ok(metadata)
    }

    fn mutators(&self, source: &str) -> Result<RawProperties, InspectError> {
        let mut properties = RawProperties::new();
        for captures in self.mutator.captures_iter(source) {
            let (Some(identifier), Some(declared)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            let Some(name) = normalize::mutator_name(identifier.as_str()) else {
                continue;
            };
            let declared_type = collapse_whitespace(declared.as_str());
            properties
                .entry(name.clone())
                .or_insert_with(|| RawProperty::new(name, declared_type));
        }
        Ok(properties)
    }
}
