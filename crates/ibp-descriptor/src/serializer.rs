//! Deterministic YAML persistence.
//!
//! Writing goes through [`serde_json::Value`], whose objects keep their keys
//! sorted, so every mapping level is emitted alphabetically and absent
//! optional fields disappear. Reading validates the whole record against the
//! descriptor shape and rejects the file on the first mismatch.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DescriptorError;
use crate::model::PluginDescriptor;

/// File name of the canonical descriptor in each plugin directory.
pub const DESCRIPTOR_FILE: &str = "filter.yaml";

/// Tracing target for descriptor persistence.
const SERIALIZER_TARGET: &str = "ibp_descriptor::serializer";

/// Renders `descriptor` as YAML with sorted keys at every level.
///
/// # Errors
///
/// Returns [`DescriptorError::Encode`] if the descriptor cannot be encoded.
pub fn to_yaml(descriptor: &PluginDescriptor) -> Result<String, DescriptorError> {
    let encode = |message: String| DescriptorError::Encode {
        id: descriptor.id.clone(),
        message,
    };
    let sorted = serde_json::to_value(descriptor).map_err(|e| encode(e.to_string()))?;
    serde_saphyr::to_string(&sorted).map_err(|e| encode(e.to_string()))
}

/// Parses a descriptor read from `path`.
///
/// # Errors
///
/// Returns [`DescriptorError::Schema`] naming `path` if the text is not YAML
/// or does not match the descriptor shape.
pub fn from_yaml(text: &str, path: &Path) -> Result<PluginDescriptor, DescriptorError> {
    let document: serde_json::Value =
        serde_saphyr::from_str(text).map_err(|e| DescriptorError::schema(path, e.to_string()))?;
    serde_json::from_value(document).map_err(|e| DescriptorError::schema(path, e.to_string()))
}

/// Reads and validates the descriptor at `path`.
///
/// # Errors
///
/// Returns [`DescriptorError::Read`] if the file cannot be read and
/// [`DescriptorError::Schema`] if it is invalid.
pub fn read_descriptor(path: &Path) -> Result<PluginDescriptor, DescriptorError> {
    let text = fs::read_to_string(path).map_err(|e| DescriptorError::read(path, e))?;
    from_yaml(&text, path)
}

/// Writes `descriptor` to `path`.
///
/// # Errors
///
/// Returns [`DescriptorError::Encode`] or [`DescriptorError::Write`].
pub fn write_descriptor(path: &Path, descriptor: &PluginDescriptor) -> Result<(), DescriptorError> {
    let text = to_yaml(descriptor)?;
    fs::write(path, text).map_err(|e| DescriptorError::write(path, e))?;
    debug!(
        target: SERIALIZER_TARGET,
        id = %descriptor.id,
        path = %path.display(),
        "wrote descriptor"
    );
    Ok(())
}

/// Finds every `filter.yaml` below `root`, sorted by path.
///
/// # Errors
///
/// Returns [`DescriptorError::Read`] if `root` cannot be listed. Unreadable
/// subdirectories are skipped.
pub fn discover_descriptors(root: &Path) -> Result<Vec<PathBuf>, DescriptorError> {
    let mut found = Vec::new();
    let entries = fs::read_dir(root).map_err(|e| DescriptorError::read(root, e))?;
    let mut pending: Vec<PathBuf> = entries.filter_map(Result::ok).map(|e| e.path()).collect();

    while let Some(path) = pending.pop() {
        if path.is_dir() {
            if let Ok(children) = fs::read_dir(&path) {
                pending.extend(children.filter_map(Result::ok).map(|e| e.path()));
            }
        } else if path.file_name().is_some_and(|name| name == DESCRIPTOR_FILE) {
            found.push(path);
        }
    }

    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tempfile::TempDir;

    use super::*;
    use crate::model::PropertyDescriptor;
    use crate::value::{PropertyKind, PropertyValue};

    fn property(
        name: &str,
        kind: PropertyKind,
        default: PropertyValue,
        interesting: PropertyValue,
    ) -> PropertyDescriptor {
        PropertyDescriptor {
            name: name.to_owned(),
            kind,
            default_value: default,
            interesting_value: interesting,
            description: String::new(),
            comment: "generated".to_owned(),
            min_value: None,
            max_value: None,
            enum_values: None,
        }
    }

    fn descriptor() -> PluginDescriptor {
        let mut strength = property(
            "strength",
            PropertyKind::Double,
            PropertyValue::Double(0.3),
            PropertyValue::Double(1.88),
        );
        strength.min_value = Some(PropertyValue::Double(0.5));
        strength.max_value = Some(PropertyValue::Double(2.5));
        let mode = PropertyDescriptor {
            enum_values: Some(vec!["fast".to_owned(), "exact".to_owned()]),
            ..property(
                "mode",
                PropertyKind::Enum,
                PropertyValue::text("fast"),
                PropertyValue::text("exact"),
            )
        };
        let invert = property(
            "invert",
            PropertyKind::Bool,
            PropertyValue::Bool(true),
            PropertyValue::Bool(false),
        );

        let properties: BTreeMap<String, PropertyDescriptor> = [strength, mode, invert]
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();
        let example = properties
            .values()
            .map(|p| (p.name.clone(), p.interesting_value.clone()))
            .collect();

        PluginDescriptor {
            id: "ibp.imagefilter.blur".to_owned(),
            name: "Blur".to_owned(),
            description: "Softens the image".to_owned(),
            example,
            properties,
        }
    }

    fn top_level_keys(yaml: &str) -> Vec<&str> {
        yaml.lines()
            .filter(|line| !line.starts_with([' ', '-']))
            .filter_map(|line| line.split(':').next())
            .filter(|key| !key.is_empty())
            .collect()
    }

    #[test]
    fn yaml_round_trip_is_byte_identical() {
        let first = to_yaml(&descriptor()).expect("encode");
        let parsed = from_yaml(&first, Path::new("filter.yaml")).expect("decode");
        let second = to_yaml(&parsed).expect("encode");

        assert_eq!(parsed, descriptor());
        assert_eq!(first, second);
    }

    #[test]
    fn yaml_keys_are_sorted_at_every_level() {
        let yaml = to_yaml(&descriptor()).expect("encode");
        assert_eq!(
            top_level_keys(&yaml),
            vec!["description", "example", "id", "name", "properties"]
        );

        let position = |needle: &str| {
            yaml.find(needle)
                .unwrap_or_else(|| panic!("{needle} missing from {yaml}"))
        };
        assert!(position("invert:") < position("mode:"));
        assert!(position("mode:") < position("strength:"));
        assert!(position("default_value:") < position("enum_values:"));
        assert!(position("max_value:") < position("min_value:"));
    }

    #[test]
    fn absent_optional_fields_are_omitted() {
        let mut plain = descriptor();
        plain.properties.retain(|name, _| name == "invert");
        let yaml = to_yaml(&plain).expect("encode");

        assert!(!yaml.contains("enum_values"), "unexpected field in {yaml}");
        assert!(!yaml.contains("min_value"), "unexpected field in {yaml}");
    }

    #[test]
    fn example_is_optional_on_read() {
        let yaml = "\
id: ibp.imagefilter.blur
name: Blur
description: Softens
properties:
  radius:
    name: radius
    type: int
    default_value: 3
    interesting_value: 75
";
        let parsed = from_yaml(yaml, Path::new("filter.yaml")).expect("decode");

        assert!(parsed.example.is_empty());
        let radius = parsed.properties.get("radius").expect("radius");
        assert_eq!(radius.kind, PropertyKind::Int);
        assert_eq!(radius.interesting_value, PropertyValue::Int(75));
    }

    #[test]
    fn missing_fields_fail_closed_naming_the_file() {
        let yaml = "name: Blur\ndescription: Softens\nproperties: {}\n";
        let error = from_yaml(yaml, Path::new("plugins/imagefilter_blur/filter.yaml"))
            .expect_err("missing id");

        assert!(matches!(error, DescriptorError::Schema { .. }));
        let message = error.to_string();
        assert!(message.contains("imagefilter_blur/filter.yaml"), "{message}");
        assert!(message.contains("id"), "{message}");
    }

    #[test]
    fn mistyped_fields_fail_closed() {
        let yaml = "id: ibp.imagefilter.blur\nname: Blur\ndescription: x\nproperties: [1, 2]\n";
        let result = from_yaml(yaml, Path::new("filter.yaml"));
        assert!(matches!(result, Err(DescriptorError::Schema { .. })));
    }

    #[test]
    fn descriptors_are_discovered_recursively_and_sorted() {
        let root = TempDir::new().expect("temp dir");
        for dir in ["imagefilter_sharpen", "imagefilter_blur", "nested/imagefilter_curves"] {
            let plugin = root.path().join(dir);
            fs::create_dir_all(&plugin).expect("create dir");
            write_descriptor(&plugin.join(DESCRIPTOR_FILE), &descriptor()).expect("write");
        }
        fs::write(root.path().join("imagefilter_blur/notes.yaml"), "x: 1").expect("write");

        let found = discover_descriptors(root.path()).expect("discover");
        let relative: Vec<PathBuf> = found
            .iter()
            .map(|path| path.strip_prefix(root.path()).expect("under root").to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("imagefilter_blur/filter.yaml"),
                PathBuf::from("imagefilter_sharpen/filter.yaml"),
                PathBuf::from("nested/imagefilter_curves/filter.yaml"),
            ]
        );
        let read = read_descriptor(found.first().expect("first")).expect("read");
        assert_eq!(read, descriptor());
    }
}
