//! MenuRecord: the single entity persisted by the record store.
//!
//! Identifiers and timestamps are assigned by the store. Callers only ever
//! hand the store a [`MenuDraft`], which is validated before any write.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::StoreError;

/// Opaque, store-generated identifier of a menu record.
///
/// Rendered as 32 lowercase hex digits. Parsing accepts any UUID form and
/// normalizes it, so `"67e55044-10b1-426f-9247-bb680e5fe0c8"` and
/// `"67e5504410b1426f9247bb680e5fe0c8"` name the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(String);

impl MenuId {
    /// Generate a fresh identifier. Only stores call this.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for MenuId {
    type Err = StoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(raw.trim())
            .map(|uuid| Self(uuid.simple().to_string()))
            .map_err(|_| StoreError::Validation(format!("malformed menu id: {raw:?}")))
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted menu entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub id: MenuId,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a create or a full-replace update.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuDraft {
    pub name: String,
    pub price: f64,
}

impl MenuDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Check the write invariants and return the draft with its name trimmed.
    pub fn validated(self) -> Result<Self, StoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("name is required".into()));
        }
        if !self.price.is_finite() {
            return Err(StoreError::Validation("price must be a finite number".into()));
        }
        if self.price < 0.0 {
            return Err(StoreError::Validation("price must be >= 0".into()));
        }
        Ok(Self {
            name: name.to_string(),
            price: self.price,
        })
    }
}
