//! Tag-by-version table

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::fingerprint::error::BackfillError;
use crate::persist::{to_json_string, write_atomic};

const TABLE_INDENT: &[u8] = b"  ";

/// Fingerprint -> ascending, deduplicated release tags.
///
/// Fingerprints keep the order they were first recorded in. Tags are only
/// ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagTable(IndexMap<String, Vec<String>>);

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the table, or an empty one if `path` does not exist
    pub fn load(path: &Path) -> Result<Self, BackfillError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|e| BackfillError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| BackfillError::Json {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Atomically replaces the table file with this table
    pub fn save(&self, path: &Path) -> Result<(), BackfillError> {
        let json = to_json_string(self, TABLE_INDENT).map_err(|e| BackfillError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        write_atomic(path, &json).map_err(|e| BackfillError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Returns true if `tag` is listed under any fingerprint
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.0.values().flatten().any(|t| t == tag)
    }

    /// Returns the tags recorded for `fingerprint`
    pub fn tags(&self, fingerprint: &str) -> Option<&[String]> {
        self.0.get(fingerprint).map(Vec::as_slice)
    }

    /// Returns the table with `tag` recorded under `fingerprint`
    pub fn merge(mut self, fingerprint: &str, tag: &str) -> Self {
        let tags = self.0.entry(fingerprint.to_string()).or_default();
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
        tags.sort();
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BANNER: &str = "Swift version 6.1 (swift-6.1-RELEASE)";

    #[test]
    fn merge_inserts_new_fingerprint() {
        let table = TagTable::new().merge(BANNER, "swift-6.1-RELEASE");

        assert_eq!(table.tags(BANNER), Some(&["swift-6.1-RELEASE".to_string()][..]));
    }

    #[test]
    fn merge_keeps_tags_sorted_and_unique() {
        let table = TagTable::new()
            .merge(BANNER, "swift-6.1.2-RELEASE")
            .merge(BANNER, "swift-6.1-RELEASE")
            .merge(BANNER, "swift-6.1.2-RELEASE");

        assert_eq!(
            table.tags(BANNER).unwrap(),
            &["swift-6.1-RELEASE".to_string(), "swift-6.1.2-RELEASE".to_string()]
        );
    }

    #[test]
    fn contains_tag_searches_every_fingerprint() {
        let table = TagTable::new()
            .merge(BANNER, "swift-6.1-RELEASE")
            .merge("Apple Swift version 6.0", "swift-6.0-RELEASE");

        assert!(table.contains_tag("swift-6.0-RELEASE"));
        assert!(table.contains_tag("swift-6.1-RELEASE"));
        assert!(!table.contains_tag("swift-5.10-RELEASE"));
    }

    #[test]
    fn load_returns_empty_table_when_file_is_missing() {
        let temp_dir = TempDir::new().unwrap();

        let table = TagTable::load(&temp_dir.path().join("tag-by-version.json")).unwrap();

        assert!(table.is_empty());
    }

    #[test]
    fn save_writes_two_space_json_and_load_reads_it_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tag-by-version.json");
        let table = TagTable::new()
            .merge(BANNER, "swift-6.1-RELEASE")
            .merge(&format!("Apple {}", BANNER), "swift-6.1-RELEASE");

        table.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(
            "{\n  \"Swift version 6.1 (swift-6.1-RELEASE)\": [\n    \"swift-6.1-RELEASE\"\n  ],"
        ));
        assert_eq!(TagTable::load(&path).unwrap(), table);
    }

    #[test]
    fn load_preserves_fingerprint_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tag-by-version.json");
        std::fs::write(&path, r#"{"z": ["b"], "a": ["a"]}"#).unwrap();

        let table = TagTable::load(&path).unwrap().merge("m", "c");

        let keys: Vec<&String> = table.0.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn load_rejects_malformed_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tag-by-version.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(TagTable::load(&path), Err(BackfillError::Json { .. })));
    }
}
