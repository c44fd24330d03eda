//! InMemoryRecordStore - RwLock-backed record store for tests and development.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::collection::Collection;
use super::{RecordStore, StoreError};
use crate::record::{MenuDraft, MenuId, MenuRecord};

/// In-memory menu collection. Clone-friendly via Arc; clones share state.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    collection: Arc<RwLock<Collection>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read("len")?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, Collection>, StoreError> {
        self.collection
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, Collection>, StoreError> {
        self.collection
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_all(&self) -> Result<Vec<MenuRecord>, StoreError> {
        Ok(self.read("find_all")?.newest_first())
    }

    async fn find_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        self.read("find_by_id")?.get(id)
    }

    async fn insert(&self, draft: MenuDraft) -> Result<MenuRecord, StoreError> {
        let draft = draft.validated()?;
        Ok(self.write("insert")?.insert(draft, Utc::now()))
    }

    async fn update_by_id(
        &self,
        id: &MenuId,
        draft: MenuDraft,
    ) -> Result<MenuRecord, StoreError> {
        let draft = draft.validated()?;
        self.write("update_by_id")?.update(id, draft, Utc::now())
    }

    async fn delete_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        self.write("delete_by_id")?.remove(id)
    }
}
