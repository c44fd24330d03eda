//! Backend-neutral record bookkeeping shared by the store implementations.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::record::{MenuDraft, MenuId, MenuRecord};

/// The menu collection in insertion order. Serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Collection {
    records: Vec<MenuRecord>,
}

impl Collection {
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Newest `created_at` first; records created in the same instant keep
    /// reverse insertion order.
    pub(crate) fn newest_first(&self) -> Vec<MenuRecord> {
        let mut records: Vec<MenuRecord> = self.records.iter().rev().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    pub(crate) fn get(&self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        self.position(id)
            .map(|idx| self.records[idx].clone())
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// `draft` must already be validated.
    pub(crate) fn insert(&mut self, draft: MenuDraft, now: DateTime<Utc>) -> MenuRecord {
        let mut id = MenuId::generate();
        while self.position(&id).is_some() {
            id = MenuId::generate();
        }

        let record = MenuRecord {
            id,
            name: draft.name,
            price: draft.price,
            created_at: now,
            updated_at: now,
        };
        self.records.push(record.clone());
        record
    }

    /// `draft` must already be validated.
    pub(crate) fn update(
        &mut self,
        id: &MenuId,
        draft: MenuDraft,
        now: DateTime<Utc>,
    ) -> Result<MenuRecord, StoreError> {
        let idx = self.position(id).ok_or_else(|| StoreError::not_found(id))?;
        let record = &mut self.records[idx];
        record.name = draft.name;
        record.price = draft.price;
        record.updated_at = advance(record.updated_at, now);
        Ok(record.clone())
    }

    pub(crate) fn remove(&mut self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        let idx = self.position(id).ok_or_else(|| StoreError::not_found(id))?;
        Ok(self.records.remove(idx))
    }

    fn position(&self, id: &MenuId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }
}

/// `updated_at` strictly increases on every update, even when the clock
/// has not ticked since the previous write.
fn advance(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}
