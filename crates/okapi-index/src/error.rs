use std::path::PathBuf;

use okapi_core::DocId;

/// Indexer errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    #[error("extraction error: {0}")]
    Extract(#[from] okapi_extract::ExtractError),

    #[error("storage error: {0}")]
    Storage(#[from] okapi_storage::StorageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build index: root directory {root:?} does not exist or is not a directory")]
    IndexBuildFailed { root: PathBuf },

    #[error("index snapshot is corrupt: {reason}")]
    IndexCorruption { reason: String },

    #[error("document {docid} not found")]
    DocumentNotFound { docid: DocId },
}
