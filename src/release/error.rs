use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
