use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact path has no parent directory: {path}")]
    NoParent { path: PathBuf },

    #[error("failed to publish {path}: {reason}")]
    PublishFailed { path: PathBuf, reason: String },
}
