//! Build catalog layer
//! - entry.rs: Catalog entry document (one file per release)
//! - versions.rs: Component version extraction from release notes
//! - assets.rs: Asset name handling and release processing
//! - importer.rs: Catalog directory update driven by a ReleaseSource
//! - error.rs: Catalog errors

pub mod assets;
pub mod entry;
pub mod error;
pub mod importer;
pub mod versions;

pub use assets::{ARTIFACT_BUNDLE_SUFFIX, artifact_id, identify_target, process_release};
pub use entry::{BuildEntry, SdkRecord};
pub use error::CatalogError;
pub use importer::{ImportSummary, run_import, update_builds_directory};
pub use versions::{ComponentVersions, extract_versions};
