use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the manifest or an individual asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("asset '{path}' is empty")]
    Empty { path: PathBuf },
}
