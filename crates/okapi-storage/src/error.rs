/// Errors from the content-addressed store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("compression failed: {reason}")]
    Compression { reason: String },

    #[error("no blob found for hash {hash}")]
    NotFound { hash: String },

    #[error("corrupted blob for hash {hash}: {reason}")]
    Corruption { hash: String, reason: String },
}
