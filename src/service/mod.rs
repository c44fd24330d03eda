//! Catalog service: the five menu operations over an injected record store.
//!
//! `CatalogService<S>` validates inbound fields, calls the store once per
//! operation and applies the configured [`PricePolicy`] to everything it
//! writes and returns. It knows nothing about wire formats; the transports
//! in [`crate::grpc`] shape its results per [`ReplyConvention`].
//!
//! ```ignore
//! let catalog = CatalogService::new(
//!     InMemoryRecordStore::new(),
//!     ReplyPolicy::new(ReplyConvention::Status, None),
//! );
//! let record = catalog.create("Pad Thai", 13.0).await?;
//! let same = catalog.get(record.id.as_str()).await?;
//! ```
//!
//! [`PricePolicy`]: crate::reply::PricePolicy
//! [`ReplyConvention`]: crate::reply::ReplyConvention

mod error;

use tracing::{debug, info, warn};

use crate::pagination::{Page, PageRequest};
use crate::record::{MenuDraft, MenuId, MenuRecord};
use crate::reply::ReplyPolicy;
use crate::store::RecordStore;

pub use error::MenuError;

/// The CRUD handlers. Generic over `S`, the store backend.
pub struct CatalogService<S> {
    store: S,
    policy: ReplyPolicy,
}

impl<S: RecordStore> CatalogService<S> {
    pub fn new(store: S, policy: ReplyPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> ReplyPolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn create(&self, name: &str, price: f64) -> Result<MenuRecord, MenuError> {
        let draft = self.draft(name, price);
        let record = self.store.insert(draft).await.map_err(|e| failed("create", e))?;
        info!(id = %record.id, name = %record.name, price = record.price, "menu created");
        Ok(self.present(record))
    }

    pub async fn get(&self, id: &str) -> Result<MenuRecord, MenuError> {
        let id = parse_id(id)?;
        let record = self.store.find_by_id(&id).await.map_err(|e| failed("get", e))?;
        debug!(id = %record.id, "menu fetched");
        Ok(self.present(record))
    }

    /// Full replace of `name` and `price`.
    pub async fn update(&self, id: &str, name: &str, price: f64) -> Result<MenuRecord, MenuError> {
        let id = parse_id(id)?;
        let draft = self.draft(name, price);
        let record = self
            .store
            .update_by_id(&id, draft)
            .await
            .map_err(|e| failed("update", e))?;
        info!(id = %record.id, name = %record.name, price = record.price, "menu updated");
        Ok(self.present(record))
    }

    /// Returns the record as it was just before removal.
    pub async fn delete(&self, id: &str) -> Result<MenuRecord, MenuError> {
        let id = parse_id(id)?;
        let record = self.store.delete_by_id(&id).await.map_err(|e| failed("delete", e))?;
        info!(id = %record.id, "menu deleted");
        Ok(self.present(record))
    }

    /// Every record, newest first.
    pub async fn list_all(&self) -> Result<Vec<MenuRecord>, MenuError> {
        let records = self.store.find_all().await.map_err(|e| failed("list", e))?;
        debug!(count = records.len(), "menus listed");
        Ok(records.into_iter().map(|r| self.present(r)).collect())
    }

    pub async fn list_page(&self, request: PageRequest) -> Result<Page<MenuRecord>, MenuError> {
        let page = self
            .store
            .find_page(request)
            .await
            .map_err(|e| failed("list", e))?;
        debug!(
            page = request.page(),
            limit = request.limit(),
            returned = page.items.len(),
            total = page.total,
            "menu page listed"
        );
        Ok(page.map(|r| self.present(r)))
    }

    fn draft(&self, name: &str, price: f64) -> MenuDraft {
        MenuDraft::new(name, self.policy.prices.apply(price))
    }

    fn present(&self, mut record: MenuRecord) -> MenuRecord {
        record.price = self.policy.prices.apply(record.price);
        record
    }
}

fn parse_id(raw: &str) -> Result<MenuId, MenuError> {
    raw.parse::<MenuId>().map_err(MenuError::from)
}

fn failed(operation: &'static str, err: crate::store::StoreError) -> MenuError {
    let err = MenuError::from(err);
    match &err {
        MenuError::Store(msg) => warn!(operation, error = %msg, "record store failure"),
        other => debug!(operation, kind = other.kind(), error = %other, "menu call rejected"),
    }
    err
}
