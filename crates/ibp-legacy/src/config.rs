//! The sectioned `key=value` format read by the batch executable.
//!
//! Sections and keys keep their insertion order and their case. Rendering
//! writes `key=value` without padding and ends every section with a blank
//! line, which is the layout the executable itself writes back.

use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::LegacyError;

/// Prefix shared by the filter sections of a configuration.
pub const FILTER_SECTION_PREFIX: &str = "imageFilter";

const LEGACY_TARGET: &str = "ibp_legacy::config";

/// One named section with ordered, case-sensitive keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    /// Creates an empty section.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Returns the section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Stores `value` under `key`.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let owned_key = key.into();
        let owned_value = value.into();
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == owned_key)
        {
            entry.1 = owned_value;
            return;
        }
        self.entries.push((owned_key, owned_value));
    }

    /// Iterates the entries in order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// An ordered sequence of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyConfig {
    sections: Vec<Section>,
}

impl LegacyConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Returns the section called `name`.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Returns the section called `name`, appending it when absent.
    #[expect(
        clippy::indexing_slicing,
        reason = "the index was just found or pushed"
    )]
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let found = self.sections.iter().position(|section| section.name == name);
        let index = found.unwrap_or_else(|| {
            self.sections.push(Section::new(name));
            self.sections.len() - 1
        });
        &mut self.sections[index]
    }

    /// Iterates the sections in order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Looks up `key` in section `section`.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Renders the configuration in the executable's layout.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Parses configuration text.
    ///
    /// Keys may be separated from values by `=` or `:` with optional
    /// surrounding whitespace. Blank lines and lines starting with `#` or `;`
    /// are ignored. A repeated key replaces the earlier value in place.
    ///
    /// # Errors
    ///
    /// Returns [`LegacyError::Syntax`] for a key outside any section, an
    /// empty section name or key, or a line with no delimiter.
    pub fn parse(text: &str) -> Result<Self, LegacyError> {
        let mut config = Self::new();
        let mut current: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_number = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with(['#', ';']) {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = header.trim();
                if name.is_empty() {
                    return Err(LegacyError::syntax(line_number, "empty section name"));
                }
                config.section_mut(name);
                current = Some(name.to_owned());
                continue;
            }

            let Some((raw_key, raw_value)) = line.split_once(['=', ':']) else {
                return Err(LegacyError::syntax(
                    line_number,
                    format!("expected `key=value`, found `{line}`"),
                ));
            };
            let key = raw_key.trim();
            if key.is_empty() {
                return Err(LegacyError::syntax(line_number, "empty key"));
            }
            let Some(section) = current.as_deref() else {
                return Err(LegacyError::syntax(
                    line_number,
                    format!("key `{key}` appears before any section"),
                ));
            };
            config.section_mut(section).set(key, raw_value.trim());
        }

        Ok(config)
    }

    /// Reads and parses the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LegacyError::Read`] or [`LegacyError::Syntax`].
    pub fn read(path: &Path) -> Result<Self, LegacyError> {
        let text = fs::read_to_string(path).map_err(|e| LegacyError::read(path, e))?;
        Self::parse(&text)
    }

    /// Renders and writes the configuration to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LegacyError::Write`] if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), LegacyError> {
        fs::write(path, self.render()).map_err(|e| LegacyError::write(path, e))?;
        debug!(target: LEGACY_TARGET, path = %path.display(), "wrote configuration");
        Ok(())
    }

    /// Copies filter settings from `live` into matching filter sections.
    ///
    /// Every key of every `imageFilter*` section in `live` except `id` is
    /// stored in the section of the same name here. Sections missing here are
    /// not created. Returns the number of keys copied.
    pub fn merge_filter_settings(&mut self, live: &Self) -> usize {
        let mut copied = 0;
        for source in live.sections_with_prefix(FILTER_SECTION_PREFIX) {
            let Some(target) = self
                .sections
                .iter_mut()
                .find(|section| section.name == source.name)
            else {
                continue;
            };
            for (key, value) in source.entries().filter(|(key, _)| *key != "id") {
                target.set(key, value);
                copied += 1;
            }
        }
        copied
    }

    fn sections_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections
            .iter()
            .filter(move |section| section.name.starts_with(prefix))
    }
}

impl fmt::Display for LegacyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in section.entries() {
                writeln!(f, "{key}={value}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const LIVE: &str = "\
[imageFilter1]
id=ibp.imagefilter.blur
bypass=false
radius=9

[imageFilter2]
id=ibp.imagefilter.sharpen
amount=2

[info]
name=Live
";

    #[test]
    fn render_writes_unpadded_keys_and_blank_separators() {
        let mut config = LegacyConfig::new();
        config.section_mut("imageFilter1").set("id", "ibp.imagefilter.blur");
        config.section_mut("imageFilter1").set("bypass", "false");
        config.section_mut("info").set("nFilters", "1");

        assert_eq!(
            config.render(),
            "[imageFilter1]\nid=ibp.imagefilter.blur\nbypass=false\n\n[info]\nnFilters=1\n\n"
        );
    }

    #[rstest]
    #[case("key=value")]
    #[case("key = value")]
    #[case("key: value")]
    #[case("  key :value  ")]
    fn parse_accepts_both_delimiters(#[case] line: &str) {
        let config = LegacyConfig::parse(&format!("[s]\n{line}\n")).expect("parse");
        assert_eq!(config.get("s", "key"), Some("value"));
    }

    #[test]
    fn parse_keeps_case_order_and_skips_comments() {
        let text = "# header\n[info]\nnFilters=1\n; note\nfileType=ibp.imagefilterlist\n";
        let config = LegacyConfig::parse(text).expect("parse");
        let info = config.section("info").expect("info");

        let keys: Vec<&str> = info.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["nFilters", "fileType"]);
        assert_eq!(config.get("info", "nfilters"), None);
    }

    #[test]
    fn parse_round_trips_rendered_text() {
        let config = LegacyConfig::parse(LIVE).expect("parse");
        let again = LegacyConfig::parse(&config.render()).expect("reparse");
        assert_eq!(config, again);
    }

    #[test]
    fn values_keep_delimiters_after_the_first() {
        let config = LegacyConfig::parse("[s]\ncolor=#ff:00\n").expect("parse");
        assert_eq!(config.get("s", "color"), Some("#ff:00"));
    }

    #[rstest]
    #[case("orphan=1\n[s]\n", 1)]
    #[case("[s]\nno delimiter\n", 2)]
    #[case("[s]\n\n[ ]\n", 3)]
    #[case("[s]\n=value\n", 2)]
    fn parse_errors_report_the_line(#[case] text: &str, #[case] expected: usize) {
        let error = LegacyConfig::parse(text).expect_err("invalid text");
        assert!(
            matches!(error, LegacyError::Syntax { line, .. } if line == expected),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn set_replaces_in_place() {
        let mut section = Section::new("s");
        section.set("a", "1");
        section.set("b", "2");
        section.set("a", "3");

        let entries: Vec<(&str, &str)> = section.entries().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn merge_copies_filter_keys_except_id() {
        let mut generated = LegacyConfig::new();
        generated
            .section_mut("imageFilter1")
            .set("id", "ibp.imagefilter.original");
        generated.section_mut("imageFilter1").set("radius", "3");
        generated.section_mut("info").set("name", "Generated");
        let live = LegacyConfig::parse(LIVE).expect("parse");

        let copied = generated.merge_filter_settings(&live);

        assert_eq!(copied, 2);
        assert_eq!(
            generated.get("imageFilter1", "id"),
            Some("ibp.imagefilter.original")
        );
        assert_eq!(generated.get("imageFilter1", "radius"), Some("9"));
        assert_eq!(generated.get("imageFilter1", "bypass"), Some("false"));
        assert!(generated.section("imageFilter2").is_none());
        assert_eq!(generated.get("info", "name"), Some("Generated"));
    }

    #[test]
    fn write_then_read_preserves_content() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("blur.ifl");
        let config = LegacyConfig::parse(LIVE).expect("parse");

        config.write(&path).expect("write");
        assert_eq!(LegacyConfig::read(&path).expect("read"), config);
    }

    #[test]
    fn read_reports_missing_files() {
        let dir = TempDir::new().expect("temp dir");
        let result = LegacyConfig::read(&dir.path().join("missing.ifl"));
        assert!(matches!(result, Err(LegacyError::Read { .. })));
    }
}
