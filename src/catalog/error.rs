use std::path::PathBuf;

use thiserror::Error;

use crate::release::ReleaseError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog entry {0:?} has no swift version in metadata.versions")]
    MissingTag(PathBuf),

    #[error(transparent)]
    Release(#[from] ReleaseError),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
