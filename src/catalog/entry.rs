//! Catalog entry document

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::error::CatalogError;
use crate::catalog::versions::{ComponentVersions, SWIFT_COMPONENT};
use crate::persist::to_json_string;

/// Schema reference written into every entry, relative to `v1/builds/`
pub const BUILD_SCHEMA_REF: &str = "../build.schema.json";

const ENTRY_INDENT: &[u8] = b"    ";

/// One release's SDK artifacts, stored as `v1/builds/<swift-version>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEntry {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub metadata: BuildMetadata,
    /// Target identifier -> SDK record
    #[serde(rename = "swift-sdks", default)]
    pub swift_sdks: IndexMap<String, SdkRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMetadata {
    pub versions: ComponentVersions,
}

/// A downloadable SDK for one target platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkRecord {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl BuildEntry {
    /// Creates an entry with no SDKs yet
    pub fn new(versions: ComponentVersions) -> Self {
        Self {
            schema: BUILD_SCHEMA_REF.to_string(),
            metadata: BuildMetadata { versions },
            swift_sdks: IndexMap::new(),
        }
    }

    /// Returns the compiler release tag this entry was built from
    pub fn swift_tag(&self) -> Option<&str> {
        self.metadata
            .versions
            .get(SWIFT_COMPONENT)
            .map(String::as_str)
    }

    /// Reads an entry from disk
    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| CatalogError::json(path, e))
    }

    /// Serializes the entry with 4-space indentation
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        to_json_string(self, ENTRY_INDENT)
    }

    /// Writes the entry to `path`, which must not exist yet.
    ///
    /// Entries are immutable once published; an existing file is reported as
    /// an `AlreadyExists` I/O error and left untouched.
    pub fn write_new(&self, path: &Path) -> Result<(), CatalogError> {
        use std::io::Write;

        let json = self.to_json().map_err(|e| CatalogError::json(path, e))?;
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| CatalogError::io(path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| CatalogError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_entry() -> BuildEntry {
        let mut versions = ComponentVersions::new();
        versions.insert("swift".to_string(), "swift-6.1-RELEASE".to_string());
        versions.insert("swiftwasm-build".to_string(), "5b2e1a9c".to_string());

        let mut entry = BuildEntry::new(versions);
        entry.swift_sdks.insert(
            "wasm32-unknown-wasi".to_string(),
            SdkRecord {
                id: "6.1-RELEASE-wasm32-unknown-wasi".to_string(),
                url: "https://example.com/wasi.zip".to_string(),
                checksum: None,
            },
        );
        entry
    }

    #[test]
    fn serializes_with_four_space_indent_and_renamed_keys() {
        let json = sample_entry().to_json().unwrap();

        assert_eq!(
            json,
            r#"{
    "$schema": "../build.schema.json",
    "metadata": {
        "versions": {
            "swift": "swift-6.1-RELEASE",
            "swiftwasm-build": "5b2e1a9c"
        }
    },
    "swift-sdks": {
        "wasm32-unknown-wasi": {
            "id": "6.1-RELEASE-wasm32-unknown-wasi",
            "url": "https://example.com/wasi.zip"
        }
    }
}"#
        );
    }

    #[test]
    fn absent_checksum_is_omitted_not_null() {
        let value: serde_json::Value =
            serde_json::from_str(&sample_entry().to_json().unwrap()).unwrap();

        let record = &value["swift-sdks"]["wasm32-unknown-wasi"];
        assert!(record.as_object().unwrap().get("checksum").is_none());
    }

    #[test]
    fn write_new_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("swift-6.1-RELEASE.json");
        std::fs::write(&path, "existing").unwrap();

        let result = sample_entry().write_new(&path);

        assert!(matches!(
            result,
            Err(CatalogError::Io { ref source, .. })
                if source.kind() == std::io::ErrorKind::AlreadyExists
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn read_round_trips_written_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("swift-6.1-RELEASE.json");
        sample_entry().write_new(&path).unwrap();

        let entry = BuildEntry::read(&path).unwrap();

        assert_eq!(entry, sample_entry());
        assert_eq!(entry.swift_tag(), Some("swift-6.1-RELEASE"));
    }
}
