//! Version fingerprint layer
//! - table.rs: Tag-by-version table (fingerprint -> release tags)
//! - toolchain.rs: ToolchainManager trait and the swiftly implementation
//! - derive.rs: Tag normalization and fingerprint derivation
//! - backfill.rs: Table backfill from the build catalog
//! - error.rs: Toolchain and table errors

pub mod backfill;
pub mod derive;
pub mod error;
pub mod table;
pub mod toolchain;

pub use backfill::{BackfillSummary, backfill, catalog_files};
pub use derive::{TAG_RULES, TagRule, derive_fingerprints, fingerprints_from_banner, normalize_tag};
pub use error::{BackfillError, ToolchainError};
pub use table::TagTable;
pub use toolchain::{InstalledToolchain, Swiftly, ToolchainManager};
