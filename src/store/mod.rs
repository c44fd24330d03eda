//! Record store: the persistent menu collection behind the catalog service.
//!
//! The store owns identity and time: it generates ids and the
//! `created_at`/`updated_at` stamps, and it refuses writes that break the
//! record invariants. Everything above it is backend-agnostic.
//!
//! ## Backends
//!
//! - [`InMemoryRecordStore`]: `memory://`, for tests and throwaway runs.
//! - [`JsonFileRecordStore`]: `file://<path>`, a JSON document file
//!   rewritten atomically on every write.
//!
//! ```ignore
//! let store = store::connect(&"memory://".parse()?).await?;
//! let record = store.insert(MenuDraft::new("Pad Thai", 13.0)).await?;
//! let page = store.find_page(PageRequest::new(1, 10)).await?;
//! ```

mod collection;
mod error;
mod file;
mod in_memory;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::pagination::{paginate, Page, PageRequest};
use crate::record::{MenuDraft, MenuId, MenuRecord};

pub use error::StoreError;
pub use file::JsonFileRecordStore;
pub use in_memory::InMemoryRecordStore;

/// CRUD access to the menu collection.
///
/// Every method is one atomic interaction with the backend. Implementations
/// must be safe to share across concurrent calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records, newest `created_at` first.
    async fn find_all(&self) -> Result<Vec<MenuRecord>, StoreError>;

    /// One window of [`find_all`](Self::find_all) plus the full count.
    async fn find_page(&self, request: PageRequest) -> Result<Page<MenuRecord>, StoreError> {
        Ok(paginate(self.find_all().await?, request))
    }

    async fn find_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError>;

    /// Validate and persist a new record, assigning id and timestamps.
    async fn insert(&self, draft: MenuDraft) -> Result<MenuRecord, StoreError>;

    /// Replace `name` and `price`, refreshing `updated_at` only.
    async fn update_by_id(&self, id: &MenuId, draft: MenuDraft)
        -> Result<MenuRecord, StoreError>;

    /// Remove a record for good and hand it back.
    async fn delete_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn find_all(&self) -> Result<Vec<MenuRecord>, StoreError> {
        (**self).find_all().await
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<MenuRecord>, StoreError> {
        (**self).find_page(request).await
    }

    async fn find_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn insert(&self, draft: MenuDraft) -> Result<MenuRecord, StoreError> {
        (**self).insert(draft).await
    }

    async fn update_by_id(
        &self,
        id: &MenuId,
        draft: MenuDraft,
    ) -> Result<MenuRecord, StoreError> {
        (**self).update_by_id(id, draft).await
    }

    async fn delete_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        (**self).delete_by_id(id).await
    }
}

/// Where the collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUri {
    Memory,
    File(PathBuf),
}

impl FromStr for StoreUri {
    type Err = StoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw == "memory://" || raw == "memory" {
            return Ok(StoreUri::Memory);
        }
        match raw.strip_prefix("file://") {
            Some(path) if !path.is_empty() => Ok(StoreUri::File(PathBuf::from(path))),
            _ => Err(StoreError::InvalidUri(raw.to_string())),
        }
    }
}

impl fmt::Display for StoreUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreUri::Memory => f.write_str("memory://"),
            StoreUri::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Open the backend named by `uri`. A failure here is meant to be fatal for
/// the server process.
pub async fn connect(uri: &StoreUri) -> Result<Arc<dyn RecordStore>, StoreError> {
    match uri {
        StoreUri::Memory => Ok(Arc::new(InMemoryRecordStore::new())),
        StoreUri::File(path) => Ok(Arc::new(JsonFileRecordStore::open(path.clone()).await?)),
    }
}
