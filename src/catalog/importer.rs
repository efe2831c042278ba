//! Catalog directory update

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::catalog::assets::process_release;
use crate::catalog::error::CatalogError;
use crate::catalog::versions::{SWIFT_COMPONENT, extract_versions};
use crate::release::{Release, ReleaseSource};

/// Outcome counts of one catalog update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// New entries written
    pub written: usize,
    /// Releases whose entry already existed
    pub existing: usize,
    /// Releases skipped for incomplete component versions
    pub missing_versions: usize,
    /// Releases skipped for having no artifact bundles
    pub empty: usize,
    /// Releases skipped because their swift version is not a usable file name
    pub invalid_versions: usize,
}

impl ImportSummary {
    fn absorb(&mut self, other: ImportSummary) {
        self.written += other.written;
        self.existing += other.existing;
        self.missing_versions += other.missing_versions;
        self.empty += other.empty;
        self.invalid_versions += other.invalid_versions;
    }
}

/// Returns whether a swift version can name a file directly inside the catalog
pub fn is_valid_entry_name(swift_version: &str) -> bool {
    !swift_version.is_empty()
        && swift_version != "."
        && swift_version != ".."
        && !swift_version.contains(['/', '\\'])
}

/// Returns the catalog path of the entry for a swift version
pub fn entry_path(builds_dir: &Path, swift_version: &str) -> PathBuf {
    builds_dir.join(format!("{}.json", swift_version))
}

/// Writes a catalog entry for every new release.
///
/// Existing entries are never rewritten. Releases with incomplete versions or
/// without SDKs are skipped, as are swift versions that are not a plain file
/// name. Any fetch failure aborts the update.
pub async fn update_builds_directory<S: ReleaseSource>(
    source: &S,
    releases: &[Release],
    builds_dir: &Path,
) -> Result<ImportSummary, CatalogError> {
    std::fs::create_dir_all(builds_dir).map_err(|e| CatalogError::io(builds_dir, e))?;

    let mut summary = ImportSummary::default();

    for release in releases {
        let Some(versions) = extract_versions(release) else {
            warn!(
                "Skipping release {} due to missing version info",
                release.tag_name
            );
            summary.missing_versions += 1;
            continue;
        };

        let swift_version = &versions[SWIFT_COMPONENT];
        if !is_valid_entry_name(swift_version) {
            warn!(
                "Skipping release {} due to unusable swift version {:?}",
                release.tag_name, swift_version
            );
            summary.invalid_versions += 1;
            continue;
        }

        let path = entry_path(builds_dir, swift_version);
        if path.exists() {
            summary.existing += 1;
            continue;
        }

        let entry = process_release(source, release, versions).await?;

        if entry.swift_sdks.is_empty() {
            info!("Skipping {} because it has no SDKs", path.display());
            summary.empty += 1;
            continue;
        }

        info!("Writing {}", path.display());
        entry.write_new(&path)?;
        summary.written += 1;
    }

    Ok(summary)
}

/// Imports the first `pages` pages of releases into `builds_dir`.
///
/// Pages are fetched one after another; an empty page ends the run early.
pub async fn run_import<S: ReleaseSource>(
    source: &S,
    pages: u32,
    builds_dir: &Path,
) -> Result<ImportSummary, CatalogError> {
    let mut summary = ImportSummary::default();

    for page in 1..=pages {
        let releases = source.fetch_releases(page).await?;
        info!("Number of releases retrieved: {}", releases.len());

        if releases.is_empty() {
            break;
        }

        summary.absorb(update_builds_directory(source, &releases, builds_dir).await?);
        info!("{} directory update completed", builds_dir.display());
    }

    Ok(summary)
}
