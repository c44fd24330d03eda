//! Server start/stop and persistence across restarts.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use menu_rpc::grpc::messages::{Empty, MenuItem};
use menu_rpc::grpc;
use menu_rpc::shutdown::{ServeError, Shutdown};
use menu_rpc::{
    store, CatalogService, InMemoryRecordStore, MenuDraft, MenuId, MenuRecord, RecordStore,
    ReplyConvention, ReplyPolicy, StoreError, StoreUri,
};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tonic::Code;

use crate::support::{catalog, start, status_client};

#[tokio::test]
async fn cancel_stops_an_idle_server() {
    let running = start(catalog(ReplyConvention::Status, None)).await;
    let mut client = status_client(&running).await;
    client.get_all_menu(Empty {}).await.unwrap();
    drop(client);

    let addr = running.addr;
    running.stop().await.unwrap();

    // The listener is gone once serve returns.
    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn file_store_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let uri: StoreUri = format!("file://{}", dir.path().join("menu_db.json").display())
        .parse()
        .unwrap();
    let policy = ReplyPolicy::new(ReplyConvention::Status, None);

    let first = start(Arc::new(CatalogService::new(
        store::connect(&uri).await.unwrap(),
        policy,
    )))
    .await;
    let mut client = status_client(&first).await;
    let created = client
        .insert(MenuItem {
            id: String::new(),
            name: "Pad Thai".into(),
            price: 13.0,
        })
        .await
        .unwrap()
        .into_inner();
    drop(client);
    first.stop().await.unwrap();

    let second = start(Arc::new(CatalogService::new(
        store::connect(&uri).await.unwrap(),
        policy,
    )))
    .await;
    let mut client = status_client(&second).await;
    let list = client.get_all_menu(Empty {}).await.unwrap().into_inner();
    assert_eq!(list.menu, vec![created]);
}

#[tokio::test]
async fn unreadable_store_fails_to_connect() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu_db.json");
    std::fs::write(&path, "{ not json").unwrap();

    let uri = StoreUri::File(path);
    assert!(store::connect(&uri).await.is_err());
}

/// Lists take far longer than any grace period used here.
struct StalledListStore(InMemoryRecordStore);

#[async_trait]
impl RecordStore for StalledListStore {
    async fn find_all(&self) -> Result<Vec<MenuRecord>, StoreError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        self.0.find_all().await
    }

    async fn find_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        self.0.find_by_id(id).await
    }

    async fn insert(&self, draft: MenuDraft) -> Result<MenuRecord, StoreError> {
        self.0.insert(draft).await
    }

    async fn update_by_id(&self, id: &MenuId, draft: MenuDraft) -> Result<MenuRecord, StoreError> {
        self.0.update_by_id(id, draft).await
    }

    async fn delete_by_id(&self, id: &MenuId) -> Result<MenuRecord, StoreError> {
        self.0.delete_by_id(id).await
    }
}

#[tokio::test]
async fn stuck_call_is_cut_off_once_grace_elapses() {
    let catalog = Arc::new(CatalogService::new(
        StalledListStore(InMemoryRecordStore::new()),
        ReplyPolicy::new(ReplyConvention::Status, None),
    ));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = tokio::spawn(grpc::serve(
        catalog,
        listener,
        shutdown.clone(),
        Duration::from_millis(200),
    ));

    let channel = tonic::transport::Channel::from_shared(format!("http://{addr}"))
        .unwrap()
        .connect()
        .await
        .unwrap();
    let mut client = grpc::RestaurantServiceClient::new(channel);
    let call = tokio::spawn(async move { client.get_all_menu(Empty {}).await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.cancel();

    let answer = tokio::time::timeout(Duration::from_secs(5), call)
        .await
        .expect("call should be answered shortly after the grace period")
        .unwrap();
    assert_eq!(answer.unwrap_err().code(), Code::Unavailable);

    let served = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("serve should return shortly after the grace period")
        .unwrap();
    assert!(matches!(served, Ok(()) | Err(ServeError::GraceElapsed(_))));
}
