//! `menu.RestaurantService` over a real tonic server.

use menu_rpc::grpc::messages::{Empty, MenuId, MenuItem};
use menu_rpc::{PricePolicy, ReplyConvention};
use tonic::Code;

use crate::support::{catalog, start, status_client};

fn item(id: &str, name: &str, price: f64) -> MenuItem {
    MenuItem {
        id: id.into(),
        name: name.into(),
        price,
    }
}

#[tokio::test]
async fn insert_then_get() {
    let running = start(catalog(ReplyConvention::Status, None)).await;
    let mut client = status_client(&running).await;

    let created = client
        .insert(item("", "Pad Thai", 13.0))
        .await
        .unwrap()
        .into_inner();
    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Pad Thai");
    assert_eq!(created.price, 13.0);

    let fetched = client
        .get(MenuId {
            id: created.id.clone(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn prices_are_floored_by_default() {
    let running = start(catalog(ReplyConvention::Status, None)).await;
    let mut client = status_client(&running).await;

    let created = client
        .insert(item("", "Green Curry", 15.99))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(created.price, 15.0);
}

#[tokio::test]
async fn prices_can_be_preserved() {
    let running = start(catalog(ReplyConvention::Status, Some(PricePolicy::Preserve))).await;
    let mut client = status_client(&running).await;

    let created = client
        .insert(item("", "Green Curry", 15.99))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(created.price, 15.99);
}

#[tokio::test]
async fn validation_failures_are_internal() {
    let running = start(catalog(ReplyConvention::Status, None)).await;
    let mut client = status_client(&running).await;

    let status = client.insert(item("", "", 3.0)).await.unwrap_err();
    assert_eq!(status.code(), Code::Internal);
    assert_eq!(status.message(), "name is required");

    let status = client.insert(item("", "Soup", -1.0)).await.unwrap_err();
    assert_eq!(status.code(), Code::Internal);
    assert_eq!(status.message(), "price must be >= 0");

    let list = client.get_all_menu(Empty {}).await.unwrap().into_inner();
    assert!(list.menu.is_empty());
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let running = start(catalog(ReplyConvention::Status, None)).await;
    let mut client = status_client(&running).await;
    let missing = menu_rpc::MenuId::generate().to_string();

    let status = client
        .get(MenuId {
            id: missing.clone(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "Menu not found");

    let status = client
        .update(item(&missing, "Soup", 4.0))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = client.remove(MenuId { id: missing }).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn malformed_ids_are_internal() {
    let running = start(catalog(ReplyConvention::Status, None)).await;
    let mut client = status_client(&running).await;

    let status = client
        .get(MenuId {
            id: "not-an-id".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Internal);
}

#[tokio::test]
async fn remove_acknowledges_with_empty() {
    let running = start(catalog(ReplyConvention::Status, None)).await;
    let mut client = status_client(&running).await;

    let created = client
        .insert(item("", "Soup", 4.0))
        .await
        .unwrap()
        .into_inner();
    let ack = client
        .remove(MenuId {
            id: created.id.clone(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(ack, Empty {});

    let status = client.get(MenuId { id: created.id }).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn envelope_schema_is_not_mounted() {
    let running = start(catalog(ReplyConvention::Status, None)).await;
    let mut client = crate::support::envelope_client(&running).await;

    let status = client
        .list_menus(menu_rpc::grpc::messages::ListMenusRequest { page: 1, limit: 10 })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Unimplemented);
}
