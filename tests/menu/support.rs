//! Shared fixtures: an in-process catalog served over gRPC on port 0.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use menu_rpc::grpc::{self, MenuServiceClient, RestaurantServiceClient};
use menu_rpc::shutdown::{ServeError, Shutdown};
use menu_rpc::{CatalogService, InMemoryRecordStore, PricePolicy, RecordStore, ReplyConvention, ReplyPolicy};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tonic::transport::Channel;

pub type Catalog = Arc<CatalogService<InMemoryRecordStore>>;

pub fn catalog(convention: ReplyConvention, prices: Option<PricePolicy>) -> Catalog {
    Arc::new(CatalogService::new(
        InMemoryRecordStore::new(),
        ReplyPolicy::new(convention, prices),
    ))
}

/// A running gRPC server plus the handles needed to stop it.
pub struct Running {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), ServeError>>,
}

impl Running {
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn channel(&self) -> Channel {
        Channel::from_shared(self.endpoint())
            .unwrap()
            .connect()
            .await
            .unwrap()
    }

    pub async fn stop(self) -> Result<(), ServeError> {
        self.shutdown.cancel();
        self.task.await.unwrap()
    }
}

/// Bind to port 0 and spawn `grpc::serve` for `catalog`.
pub async fn start<S: RecordStore + 'static>(catalog: Arc<CatalogService<S>>) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();

    let task = tokio::spawn(grpc::serve(
        catalog,
        listener,
        shutdown.clone(),
        Duration::from_secs(3),
    ));

    Running {
        addr,
        shutdown,
        task,
    }
}

pub async fn status_client(running: &Running) -> RestaurantServiceClient<Channel> {
    RestaurantServiceClient::new(running.channel().await)
}

pub async fn envelope_client(running: &Running) -> MenuServiceClient<Channel> {
    MenuServiceClient::new(running.channel().await)
}
