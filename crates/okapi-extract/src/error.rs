use std::path::PathBuf;

/// Errors from resolving and running a [`crate::ContentStrategy`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported file extension: {ext}")]
    UnsupportedExtension { ext: String },

    #[error("failed to extract content from {path}: {cause}")]
    ExtractionFailed { path: PathBuf, cause: String },
}
