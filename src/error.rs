use std::path::PathBuf;

/// Errors surfaced across the library boundary.
///
/// Parse errors in queries, unknown terms, decode fallbacks and cleanup
/// failures never reach this type: they degrade silently or are logged.
/// Only input-not-found and fatal I/O during build/merge are modeled here.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("input directory not found: {0}")]
    InputDirNotFound(PathBuf),

    #[error("index file not found: {0}")]
    IndexFileNotFound(PathBuf),

    #[error("I/O error while building index: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt block file {path}: {reason}")]
    CorruptBlock { path: PathBuf, reason: String },

    #[error("corrupt compressed dictionary: {0}")]
    CorruptDictionary(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
