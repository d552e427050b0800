//! Error types for the score store

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the persistence boundary.
///
/// Reading a record never fails outward: unreadable or malformed data falls
/// back to the default record. These surface only from writes and from the
/// raw [`KeyValue`](crate::KeyValue) backends.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem access failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record could not be encoded as JSON
    #[error("Failed to encode record for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key cannot be mapped to a file name
    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
