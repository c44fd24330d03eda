//! gRPC transport: maps the two menu schemas onto the catalog service.
//!
//! Requires the `grpc` feature. Uses tonic for the server and prost for
//! message serialization; service stubs come from `build.rs`.
//!
//! ## Services (package `menu`)
//!
//! - `RestaurantService`: `Insert`, `Get`, `Update`, `Remove`,
//!   `GetAllMenu`. Status convention.
//! - `MenuService`: `createMenu`, `getMenu`, `updateMenu`, `deleteMenu`,
//!   `listMenus`. Envelope convention.
//!
//! A server only ever mounts the one matching its [`ReplyConvention`].
//!
//! ```ignore
//! let catalog = Arc::new(CatalogService::new(store, policy));
//! let listener = TcpListener::bind("0.0.0.0:50051").await?;
//! grpc::serve(catalog, listener, shutdown, Duration::from_secs(3)).await?;
//! ```

pub mod messages;
mod menus;
mod restaurant;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::metadata::MetadataValue;
use tonic::Status;
use tracing::info;

use crate::record::MenuRecord;
use crate::reply::{Fault, FaultCode, ReplyConvention};
use crate::service::{CatalogService, MenuError};
use crate::shutdown::{drain, CallDeadline, ServeError, Shutdown};
use crate::store::RecordStore;

pub use menus::MenuHandler;
pub use restaurant::RestaurantHandler;

// ---------------------------------------------------------------------------
// Generated service traits + server/client
// ---------------------------------------------------------------------------

include!(concat!(env!("OUT_DIR"), "/menu.RestaurantService.rs"));
include!(concat!(env!("OUT_DIR"), "/menu.MenuService.rs"));

pub use menu_service_client::MenuServiceClient;
pub use menu_service_server::{MenuService, MenuServiceServer};
pub use restaurant_service_client::RestaurantServiceClient;
pub use restaurant_service_server::{RestaurantService, RestaurantServiceServer};

// ---------------------------------------------------------------------------
// Reply mapping
// ---------------------------------------------------------------------------

/// Metadata key naming the [`MenuError`] kind behind a failed call, so
/// clients can tell a refused request from a store outage under the same
/// `INTERNAL` code.
pub const ERROR_KIND_KEY: &str = "menu-error-kind";

impl From<Fault> for Status {
    fn from(fault: Fault) -> Self {
        let mut status = match fault.code {
            FaultCode::NotFound => Status::not_found(fault.message),
            FaultCode::Internal => Status::internal(fault.message),
        };
        status
            .metadata_mut()
            .insert(ERROR_KIND_KEY, MetadataValue::from_static(fault.kind));
        status
    }
}

pub(crate) fn status(err: MenuError) -> Status {
    Fault::from(err).into()
}

/// Run a handler body under `deadline`; an expired deadline answers
/// `UNAVAILABLE` and drops the work.
pub(crate) async fn guarded<T>(
    deadline: &CallDeadline,
    call: impl Future<Output = Result<T, Status>>,
) -> Result<T, Status> {
    match deadline.run(call).await {
        Some(out) => out,
        None => Err(Status::unavailable("server shutting down")),
    }
}

impl From<MenuRecord> for messages::MenuItem {
    fn from(record: MenuRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            price: record.price,
        }
    }
}

impl From<MenuRecord> for messages::Menu {
    fn from(record: MenuRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            price: record.price,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

pub fn restaurant_server<S: RecordStore + 'static>(
    catalog: Arc<CatalogService<S>>,
    deadline: CallDeadline,
) -> RestaurantServiceServer<RestaurantHandler<S>> {
    RestaurantServiceServer::new(RestaurantHandler::new(catalog, deadline))
}

pub fn menu_server<S: RecordStore + 'static>(
    catalog: Arc<CatalogService<S>>,
    deadline: CallDeadline,
) -> MenuServiceServer<MenuHandler<S>> {
    MenuServiceServer::new(MenuHandler::new(catalog, deadline))
}

/// Serve the schema matching the catalog's reply convention on `listener`
/// until `shutdown` fires, then give in-flight calls `grace` to finish.
/// Calls still running after that answer `UNAVAILABLE`.
pub async fn serve<S: RecordStore + 'static>(
    catalog: Arc<CatalogService<S>>,
    listener: TcpListener,
    shutdown: Shutdown,
    grace: Duration,
) -> Result<(), ServeError> {
    let addr = listener.local_addr()?;
    let policy = catalog.policy();

    let deadline = CallDeadline::new(shutdown.clone(), grace);

    let mut builder = tonic::transport::Server::builder();
    let router = match policy.convention {
        ReplyConvention::Status => builder.add_service(restaurant_server(catalog, deadline)),
        ReplyConvention::Envelope => builder.add_service(menu_server(catalog, deadline)),
    };

    info!(
        %addr,
        convention = %policy.convention,
        prices = %policy.prices,
        "gRPC menu server listening"
    );

    let server = router.serve_with_incoming_shutdown(
        TcpListenerStream::new(listener),
        shutdown.cancelled_owned(),
    );
    drain(server, &shutdown, grace).await??;

    info!("gRPC menu server stopped");
    Ok(())
}
