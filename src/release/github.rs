//! GitHub Releases API implementation

use crate::release::error::ReleaseError;
use crate::release::source::ReleaseSource;
use crate::release::types::Release;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, warn};

const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// ReleaseSource backed by the GitHub REST API
pub struct GitHubReleases {
    client: reqwest::Client,
    base_url: String,
    repository: String,
    token: Option<String>,
}

impl GitHubReleases {
    /// Creates a client for `repository` (`owner/repo`) against a custom API base URL
    pub fn new(
        base_url: &str,
        repository: &str,
        token: Option<String>,
    ) -> Result<Self, ReleaseError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sdk-catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            repository: repository.to_string(),
            token,
        })
    }

    fn api_headers(&self) -> Result<HeaderMap, ReleaseError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_V3));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ReleaseError::InvalidResponse(format!("invalid token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn releases_url(&self, page: u32) -> String {
        format!(
            "{}/repos/{}/releases?page={}",
            self.base_url, self.repository, page
        )
    }
}

impl ReleaseSource for GitHubReleases {
    async fn fetch_releases(&self, page: u32) -> Result<Vec<Release>, ReleaseError> {
        let url = self.releases_url(page);
        debug!("Fetching releases from {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.api_headers()?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(ReleaseError::UnexpectedStatus { url, status });
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub releases response: {}", e);
            ReleaseError::InvalidResponse(e.to_string())
        })
    }

    async fn fetch_checksum(&self, download_url: &str) -> Result<Option<String>, ReleaseError> {
        let url = format!("{}.sha256", download_url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!("No checksum published at {}", url);
            return Ok(None);
        }

        if !status.is_success() {
            warn!("Checksum request returned status {}: {}", status, url);
            return Err(ReleaseError::UnexpectedStatus { url, status });
        }

        let checksum = response.text().await?;
        let checksum = checksum.trim();
        Ok((!checksum.is_empty()).then(|| checksum.to_string()))
    }
}
