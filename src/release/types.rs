//! Release records as served by the hosting API

use serde::Deserialize;

/// A tagged publication with its notes and downloadable assets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    /// Release notes; the API sends `null` for releases without notes
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A single downloadable file attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// Returns the release notes, treating missing notes as empty
    pub fn notes(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}
