mod pagination;
mod record;
mod reply;

pub mod config;
pub mod service;
pub mod shutdown;
pub mod store;
pub mod telemetry;

#[cfg(feature = "grpc")]
pub mod grpc;

#[cfg(feature = "http")]
pub mod web;

pub use pagination::{paginate, Page, PageRequest, DEFAULT_LIMIT};
pub use record::{MenuDraft, MenuId, MenuRecord};
pub use reply::{Envelope, Fault, FaultCode, PricePolicy, ReplyConvention, ReplyPolicy};
pub use service::{CatalogService, MenuError};
pub use shutdown::{drain, ServeError, Shutdown};
pub use store::{InMemoryRecordStore, JsonFileRecordStore, RecordStore, StoreError, StoreUri};
