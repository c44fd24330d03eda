//! Error type for catalog operations.

use thiserror::Error;

use crate::store::StoreError;

/// Failure of a catalog call. The `Display` text is what callers see, so it
/// stays human-readable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// Missing or out-of-range field, or a malformed id.
    #[error("{0}")]
    Validation(String),
    /// No record has the requested id (carried for logging only).
    #[error("Menu not found")]
    NotFound(String),
    /// Connectivity or internal failure of the record store.
    #[error("{0}")]
    Store(String),
}

impl MenuError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            MenuError::Validation(_) => "validation",
            MenuError::NotFound(_) => "not_found",
            MenuError::Store(_) => "store",
        }
    }
}

impl From<StoreError> for MenuError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => MenuError::Validation(msg),
            StoreError::NotFound { id } => MenuError::NotFound(id),
            other => MenuError::Store(other.to_string()),
        }
    }
}
