//! Parsing of the `nixtrobed.distros` list.
//!
//! One distro per line, `name,box,playbook`. A line whose name starts with
//! `#` is a comment. The playbook column may be left blank, in which case
//! [`DEFAULT_PLAYBOOK_NAME`] is used.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use nixtrobed_core::error::{MissingField, Result, TestbedError};
use nixtrobed_core::file_system::read_file;
use serde::Serialize;
use tracing::{debug, info};

use crate::layout::DEFAULT_PLAYBOOK_NAME;

pub const HEADER: &str = "#name,box,playbook";

/// One declared testbed machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistroRecord {
    pub name: String,
    pub r#box: String,
    pub playbook: String,
}

impl DistroRecord {
    pub fn new(name: impl Into<String>, r#box: impl Into<String>, playbook: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#box: r#box.into(),
            playbook: playbook.into(),
        }
    }

    /// A record using the default playbook.
    pub fn with_default_playbook(name: impl Into<String>, r#box: impl Into<String>) -> Self {
        Self::new(name, r#box, DEFAULT_PLAYBOOK_NAME)
    }

    fn to_line(&self) -> String {
        [&self.name, &self.r#box, &self.playbook]
            .iter()
            .map(|field| quote_field(field))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The ordered contents of a distro list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistroConfig {
    records: Vec<DistroRecord>,
}

impl DistroConfig {
    pub fn from_records(records: Vec<DistroRecord>) -> Self {
        Self { records }
    }

    /// Read and parse the distro list at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_file(path)?;
        let config = Self::parse_str(&content, path)?;
        info!(path = %path.display(), distros = config.len(), "loaded distro list");
        Ok(config)
    }

    /// Parse distro list text. `path` is only used in error messages.
    pub fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let mut records = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            if line.is_empty() {
                continue;
            }

            let fields = split_fields(line).ok_or_else(|| TestbedError::UnterminatedQuote {
                path: path.to_path_buf(),
                line: line_number,
            })?;
            // Only a `#` in the very first column marks a comment.
            let raw_name = fields.first().map(String::as_str).unwrap_or_default();
            if raw_name.starts_with('#') {
                continue;
            }

            let name = raw_name.trim();
            if name.is_empty() {
                return Err(malformed(path, line_number, MissingField::Name));
            }

            let r#box = fields.get(1).map(|f| f.trim()).unwrap_or_default();
            if r#box.is_empty() {
                return Err(malformed(path, line_number, MissingField::Box));
            }

            let playbook = match fields.get(2).map(|f| f.trim()) {
                Some(playbook) if !playbook.is_empty() => playbook,
                _ => DEFAULT_PLAYBOOK_NAME,
            };

            if fields.len() > 3 {
                debug!(line = line_number, "ignoring {} extra fields", fields.len() - 3);
            }

            if let Some(&first_line) = seen.get(name) {
                return Err(TestbedError::DuplicateDistro {
                    path: path.to_path_buf(),
                    line: line_number,
                    first_line,
                    name: name.to_string(),
                });
            }
            seen.insert(name.to_string(), line_number);

            records.push(DistroRecord::new(name, r#box, playbook));
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[DistroRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DistroRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&DistroRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize back to the on-disk format, header line first.
    pub fn to_file_contents(&self) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for record in &self.records {
            out.push_str(&record.to_line());
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a DistroConfig {
    type Item = &'a DistroRecord;
    type IntoIter = std::slice::Iter<'a, DistroRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn malformed(path: &Path, line: usize, field: MissingField) -> TestbedError {
    TestbedError::MalformedConfig {
        path: PathBuf::from(path),
        line,
        field,
    }
}

/// Split one line on commas, honoring double-quoted fields and `""` escapes.
///
/// Returns `None` when a quoted field is never closed.
fn split_fields(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if in_quotes {
        return None;
    }
    fields.push(current);
    Some(fields)
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<DistroConfig> {
        DistroConfig::parse_str(content, Path::new("nixtrobed.distros"))
    }

    #[test]
    fn test_parse_defaults_blank_playbook() {
        let config = parse(
            "#name,box,playbook\nfed,generic/fedora33,\ndeb,debian/bullseye64,custom.yml\n",
        )
        .unwrap();

        assert_eq!(
            config.records(),
            &[
                DistroRecord::new("fed", "generic/fedora33", "default.yml"),
                DistroRecord::new("deb", "debian/bullseye64", "custom.yml"),
            ]
        );
    }

    #[test]
    fn test_missing_playbook_column_uses_default() {
        let config = parse("alma8,almalinux/8\n").unwrap();
        assert_eq!(config.records()[0].playbook, DEFAULT_PLAYBOOK_NAME);
    }

    #[test]
    fn test_comment_lines_never_produce_records() {
        let config = parse("#name,box,playbook\n#,,\n#old,generic/fedora32,\nfed,generic/fedora33,\n")
            .unwrap();
        assert_eq!(config.names(), vec!["fed"]);
    }

    #[test]
    fn test_indented_hash_is_not_a_comment() {
        let config = parse("  #old,generic/fedora32,\nfed,generic/fedora33,\n").unwrap();
        assert_eq!(config.names(), vec!["#old", "fed"]);
        assert_eq!(config.records()[0].r#box, "generic/fedora32");
    }

    #[test]
    fn test_unterminated_quote_is_reported() {
        let err = parse("fed,generic/fedora33,\n\"deb,debian/bullseye64,\n").unwrap_err();
        assert!(matches!(err, TestbedError::UnterminatedQuote { line: 2, .. }));
        assert_eq!(
            err.to_string(),
            "Malformed line in nixtrobed.distros. Line 2 has an unterminated quote."
        );
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let config = parse("\nfed,generic/fedora33,\n\n").unwrap();
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn test_empty_name_reports_line_number() {
        let err = parse("#name,box,playbook\nfed,generic/fedora33,\n,debian/bullseye64,\n")
            .unwrap_err();
        match err {
            TestbedError::MalformedConfig { line, field, .. } => {
                assert_eq!(line, 3);
                assert_eq!(field, MissingField::Name);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_whitespace_only_name_is_malformed() {
        let err = parse("   ,debian/bullseye64,\n").unwrap_err();
        assert!(matches!(
            err,
            TestbedError::MalformedConfig {
                line: 1,
                field: MissingField::Name,
                ..
            }
        ));
    }

    #[test]
    fn test_blank_box_is_malformed() {
        let err = parse("#header\nfed, ,default.yml\n").unwrap_err();
        assert!(matches!(
            err,
            TestbedError::MalformedConfig {
                line: 2,
                field: MissingField::Box,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "Malformed line in nixtrobed.distros. Line 2 contains no box name."
        );
    }

    #[test]
    fn test_name_only_line_is_missing_box() {
        let err = parse("fed\n").unwrap_err();
        assert!(matches!(
            err,
            TestbedError::MalformedConfig {
                field: MissingField::Box,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = parse("fed,generic/fedora33,\ndeb,debian/bullseye64,\nfed,fedora/34,\n")
            .unwrap_err();
        match err {
            TestbedError::DuplicateDistro {
                line,
                first_line,
                name,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(first_line, 1);
                assert_eq!(name, "fed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fields_are_trimmed_and_extra_fields_ignored() {
        let config = parse(" fed , generic/fedora33 , web.yml , extra\n").unwrap();
        assert_eq!(
            config.records()[0],
            DistroRecord::new("fed", "generic/fedora33", "web.yml")
        );
    }

    #[test]
    fn test_quoted_fields() {
        let config = parse("\"odd,name\",\"box \"\"x\"\"\",\n").unwrap();
        assert_eq!(config.records()[0].name, "odd,name");
        assert_eq!(config.records()[0].r#box, "box \"x\"");
    }

    #[test]
    fn test_crlf_line_endings() {
        let config = parse("#name,box,playbook\r\nfed,generic/fedora33,\r\n").unwrap();
        assert_eq!(
            config.records()[0],
            DistroRecord::new("fed", "generic/fedora33", "default.yml")
        );
    }

    #[test]
    fn test_file_contents_parse_back() {
        let config = DistroConfig::from_records(vec![
            DistroRecord::with_default_playbook("fed", "generic/fedora33"),
            DistroRecord::new("odd,one", "local/box", "custom.yml"),
        ]);
        let text = config.to_file_contents();
        assert!(text.starts_with("#name,box,playbook\n"));
        assert_eq!(parse(&text).unwrap(), config);
    }

    #[test]
    fn test_lookup_helpers() {
        let config = parse("fed,generic/fedora33,\ndeb,debian/bullseye64,\n").unwrap();
        assert!(config.contains("deb"));
        assert!(!config.contains("arch"));
        assert_eq!(config.get("fed").map(|r| r.r#box.as_str()), Some("generic/fedora33"));
        assert_eq!((&config).into_iter().count(), 2);
        assert!(!config.is_empty());
    }
}
