//! Release asset handling

use tracing::{debug, warn};

use crate::catalog::entry::{BuildEntry, SdkRecord};
use crate::catalog::versions::ComponentVersions;
use crate::release::{Release, ReleaseError, ReleaseSource};

/// File suffix of a packaged SDK asset
pub const ARTIFACT_BUNDLE_SUFFIX: &str = ".artifactbundle.zip";

/// Vendor prefix dropped from asset names to form SDK ids
pub const ARTIFACT_ID_PREFIX: &str = "swift-wasm-";

/// Identifies the target platform from an asset name.
///
/// e.g. with tag `swift-wasm-6.1-RELEASE`:
/// * `swift-wasm-6.1-RELEASE-wasm32-unknown-wasi.artifactbundle.zip` -> `wasm32-unknown-wasi`
/// * `swift-wasm-6.1-RELEASE-wasm32-unknown-wasip1-threads.artifactbundle.zip`
///   -> `wasm32-unknown-wasip1-threads`
///
/// Names that do not start with the tag keep their prefix.
pub fn identify_target<'a>(asset_name: &'a str, release_tag: &str) -> &'a str {
    let name = asset_name
        .strip_prefix(release_tag)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(asset_name);
    name.strip_suffix(ARTIFACT_BUNDLE_SUFFIX).unwrap_or(name)
}

/// Derives the SDK id from an asset name
pub fn artifact_id(asset_name: &str) -> &str {
    let name = asset_name
        .strip_suffix(ARTIFACT_BUNDLE_SUFFIX)
        .unwrap_or(asset_name);
    name.strip_prefix(ARTIFACT_ID_PREFIX).unwrap_or(name)
}

/// Builds the catalog entry for a release.
///
/// Every artifact bundle becomes an SDK record keyed by its target; a later
/// asset with the same target replaces an earlier one.
pub async fn process_release<S: ReleaseSource>(
    source: &S,
    release: &Release,
    versions: ComponentVersions,
) -> Result<BuildEntry, ReleaseError> {
    let mut entry = BuildEntry::new(versions);

    for asset in &release.assets {
        if !asset.name.ends_with(ARTIFACT_BUNDLE_SUFFIX) {
            continue;
        }

        let target = identify_target(&asset.name, &release.tag_name);
        let checksum = source.fetch_checksum(&asset.browser_download_url).await?;
        if checksum.is_none() {
            debug!("No checksum for {}", asset.name);
        }

        let record = SdkRecord {
            id: artifact_id(&asset.name).to_string(),
            url: asset.browser_download_url.clone(),
            checksum,
        };

        if entry.swift_sdks.insert(target.to_string(), record).is_some() {
            warn!(
                "Release {} has more than one SDK for {}; keeping {}",
                release.tag_name, target, asset.name
            );
        }
    }

    Ok(entry)
}
