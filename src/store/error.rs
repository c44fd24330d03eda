use thiserror::Error;

/// Error type for record store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A write (or an id) broke the record invariants. Nothing was stored.
    #[error("{0}")]
    Validation(String),
    /// No record has this id.
    #[error("menu not found: {id}")]
    NotFound { id: String },
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// The document could not be encoded or decoded.
    #[error("document serialization error: {0}")]
    Serde(String),
    /// The backing file could not be read or replaced.
    #[error("store i/o error: {0}")]
    Io(String),
    #[error("unsupported store uri {0:?} (expected memory:// or file://<path>)")]
    InvalidUri(String),
}

impl StoreError {
    pub(crate) fn not_found(id: impl ToString) -> Self {
        StoreError::NotFound { id: id.to_string() }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
