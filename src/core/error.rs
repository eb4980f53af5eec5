//! Error types.

use thiserror::Error;

/// Roster precondition violations.
///
/// The session controller never triggers these; they surface only when the
/// roster is driven directly with a name or index it does not hold.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("'{name}' is not a current survivor")]
    NotASurvivor { name: String },
    #[error("index {index} out of range for roster of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures of the snapshot store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}
