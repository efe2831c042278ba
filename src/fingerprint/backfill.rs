//! Tag table backfill from the build catalog

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::catalog::CatalogError;
use crate::catalog::entry::BuildMetadata;
use crate::catalog::versions::SWIFT_COMPONENT;
use crate::fingerprint::derive::derive_fingerprints;
use crate::fingerprint::error::BackfillError;
use crate::fingerprint::table::TagTable;
use crate::fingerprint::toolchain::ToolchainManager;

/// Outcome counts of one backfill run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    /// Tags whose fingerprints were derived and recorded
    pub recorded: usize,
    /// Tags already present in the table
    pub known: usize,
}

/// Lists catalog entry files in lexicographic order.
///
/// A missing directory has no entries.
pub fn catalog_files(builds_dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let entries = match std::fs::read_dir(builds_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(CatalogError::io(builds_dir, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CatalogError::io(builds_dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// The part of a catalog entry the backfill reads; other keys are ignored
#[derive(Debug, Deserialize)]
struct EntryVersions {
    metadata: BuildMetadata,
}

/// Reads the swift release tag recorded in a catalog entry
pub fn read_release_tag(path: &Path) -> Result<String, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let mut entry: EntryVersions =
        serde_json::from_str(&content).map_err(|e| CatalogError::json(path, e))?;
    entry
        .metadata
        .versions
        .swap_remove(SWIFT_COMPONENT)
        .ok_or_else(|| CatalogError::MissingTag(path.to_path_buf()))
}

/// Records the fingerprints of every catalogued release missing from the table.
///
/// The table is saved after each release, so an interrupted run keeps what it
/// derived. Any toolchain failure stops the run.
pub fn backfill<M: ToolchainManager + ?Sized>(
    builds_dir: &Path,
    table_path: &Path,
    manager: &M,
) -> Result<BackfillSummary, BackfillError> {
    let mut table = TagTable::load(table_path)?;
    let mut summary = BackfillSummary::default();

    let files = catalog_files(builds_dir)?;
    for (i, path) in files.iter().enumerate() {
        info!("Processing {}/{}: {}", i + 1, files.len(), path.display());
        let tag = read_release_tag(path)?;

        if table.contains_tag(&tag) {
            summary.known += 1;
            continue;
        }

        for fingerprint in derive_fingerprints(manager, &tag)? {
            table = table.merge(&fingerprint, &tag);
            info!("Derived fingerprint for {}: {}", tag, fingerprint);
        }

        table.save(table_path)?;
        summary.recorded += 1;
    }

    Ok(summary)
}
