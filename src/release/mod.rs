//! Release source layer
//! - types.rs: Release and asset records returned by the hosting API
//! - source.rs: ReleaseSource trait definition
//! - github.rs: GitHub Releases API implementation
//! - error.rs: Transport and API errors

pub mod error;
pub mod github;
pub mod source;
pub mod types;

pub use error::ReleaseError;
pub use github::GitHubReleases;
pub use source::ReleaseSource;
pub use types::{Asset, Release};
