use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },

    #[error("Toolchain {0} printed no version banner")]
    EmptyBanner(String),
}

#[derive(Debug, Error)]
pub enum BackfillError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid tag table {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
