//! ReleaseSource trait for reading releases and their checksum companions

use crate::release::error::ReleaseError;
use crate::release::types::Release;
use std::future::Future;

/// Trait for fetching releases from a hosting service
pub trait ReleaseSource: Send + Sync {
    /// Fetches one page of releases
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    ///
    /// # Returns
    /// * `Ok(Vec<Release>)` - Releases in the order returned by the service
    /// * `Err(ReleaseError)` - If the request fails or the status is not a success
    fn fetch_releases(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<Vec<Release>, ReleaseError>> + Send;

    /// Fetches the `.sha256` companion of an asset download URL
    ///
    /// # Returns
    /// * `Ok(Some(checksum))` - Trimmed checksum text
    /// * `Ok(None)` - The companion does not exist (404) or is empty
    /// * `Err(ReleaseError)` - Any other failure
    fn fetch_checksum(
        &self,
        download_url: &str,
    ) -> impl Future<Output = Result<Option<String>, ReleaseError>> + Send;
}
