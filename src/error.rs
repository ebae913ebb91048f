//! Error types for trie_node

use thiserror::Error;

/// Result type alias for trie_node operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when trees cross a serialization or file boundary.
///
/// Structural operations on [`crate::Node`] never fail; they report
/// rejected insertions and missed lookups through `bool` and `Option`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate child value: {0}")]
    DuplicateChild(String),

    #[error("Invalid tree file: {0}")]
    InvalidFile(String),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Tree exceeds the maximum depth of {0} levels")]
    TooDeep(usize),
}
