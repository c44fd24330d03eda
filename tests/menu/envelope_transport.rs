//! `menu.MenuService` over a real tonic server.

use menu_rpc::grpc::messages::{
    CreateMenuRequest, DeleteMenuRequest, GetMenuRequest, ListMenusRequest, UpdateMenuRequest,
};
use menu_rpc::ReplyConvention;
use tonic::transport::Channel;

use crate::support::{catalog, envelope_client, start};

type Client = menu_rpc::grpc::MenuServiceClient<Channel>;

async fn create(client: &mut Client, name: &str, price: f64) -> String {
    let reply = client
        .create_menu(CreateMenuRequest {
            name: name.into(),
            price,
        })
        .await
        .unwrap()
        .into_inner();
    assert!(reply.success, "{}", reply.message);
    reply.menu.unwrap().id
}

async fn list(client: &mut Client, page: i32, limit: i32) -> menu_rpc::grpc::messages::ListMenusResponse {
    client
        .list_menus(ListMenusRequest { page, limit })
        .await
        .unwrap()
        .into_inner()
}

#[tokio::test]
async fn empty_store_lists_an_empty_successful_page() {
    let running = start(catalog(ReplyConvention::Envelope, None)).await;
    let mut client = envelope_client(&running).await;

    let reply = list(&mut client, 1, 10).await;
    assert!(reply.success);
    assert!(reply.menus.is_empty());
    assert_eq!(reply.total, 0);
}

#[tokio::test]
async fn create_reply_carries_message_and_timestamps() {
    let running = start(catalog(ReplyConvention::Envelope, None)).await;
    let mut client = envelope_client(&running).await;

    let reply = client
        .create_menu(CreateMenuRequest {
            name: "Pad Thai".into(),
            price: 12.99,
        })
        .await
        .unwrap()
        .into_inner();
    assert!(reply.success);
    assert_eq!(reply.message, "Menu created successfully");

    let menu = reply.menu.unwrap();
    assert_eq!(menu.price, 12.99);
    assert_eq!(menu.created_at, menu.updated_at);
    assert!(chrono::DateTime::parse_from_rfc3339(&menu.created_at).is_ok());
}

#[tokio::test]
async fn failures_complete_the_call() {
    let running = start(catalog(ReplyConvention::Envelope, None)).await;
    let mut client = envelope_client(&running).await;

    let reply = client
        .create_menu(CreateMenuRequest {
            name: "   ".into(),
            price: 1.0,
        })
        .await
        .unwrap()
        .into_inner();
    assert!(!reply.success);
    assert_eq!(reply.message, "name is required");
    assert_eq!(reply.menu, None);

    let missing = menu_rpc::MenuId::generate().to_string();
    let reply = client
        .get_menu(GetMenuRequest { id: missing.clone() })
        .await
        .unwrap()
        .into_inner();
    assert!(!reply.success);
    assert_eq!(reply.message, "Menu not found");

    let reply = client
        .delete_menu(DeleteMenuRequest { id: missing })
        .await
        .unwrap()
        .into_inner();
    assert!(!reply.success);
    assert_eq!(reply.message, "Menu not found");

    assert_eq!(list(&mut client, 1, 10).await.total, 0);
}

#[tokio::test]
async fn update_moves_updated_at_only() {
    let running = start(catalog(ReplyConvention::Envelope, None)).await;
    let mut client = envelope_client(&running).await;
    let id = create(&mut client, "Soup", 4.0).await;

    let before = client
        .get_menu(GetMenuRequest { id: id.clone() })
        .await
        .unwrap()
        .into_inner()
        .menu
        .unwrap();

    let reply = client
        .update_menu(UpdateMenuRequest {
            id: id.clone(),
            name: "Soup of the day".into(),
            price: 4.5,
        })
        .await
        .unwrap()
        .into_inner();
    assert!(reply.success);
    assert_eq!(reply.message, "Menu updated successfully");
    let after = reply.menu.unwrap();

    assert_eq!(after.created_at, before.created_at);
    let before_at = chrono::DateTime::parse_from_rfc3339(&before.updated_at).unwrap();
    let after_at = chrono::DateTime::parse_from_rfc3339(&after.updated_at).unwrap();
    assert!(after_at > before_at);
    assert_eq!((after.name.as_str(), after.price), ("Soup of the day", 4.5));
}

#[tokio::test]
async fn delete_replies_and_removes() {
    let running = start(catalog(ReplyConvention::Envelope, None)).await;
    let mut client = envelope_client(&running).await;
    let id = create(&mut client, "Soup", 4.0).await;

    let reply = client
        .delete_menu(DeleteMenuRequest { id: id.clone() })
        .await
        .unwrap()
        .into_inner();
    assert!(reply.success);
    assert_eq!(reply.message, "Menu deleted successfully");

    let reply = client
        .get_menu(GetMenuRequest { id })
        .await
        .unwrap()
        .into_inner();
    assert!(!reply.success);
}

#[tokio::test]
async fn pages_partition_the_catalog() {
    let running = start(catalog(ReplyConvention::Envelope, None)).await;
    let mut client = envelope_client(&running).await;
    for i in 0..7 {
        create(&mut client, &format!("dish {i}"), 1.0).await;
    }

    for (page, limit, expected) in [(1, 3, 3), (2, 3, 3), (3, 3, 1), (4, 3, 0), (1, 10, 7)] {
        let reply = list(&mut client, page, limit).await;
        assert!(reply.success);
        assert_eq!(reply.total, 7);
        assert_eq!(reply.menus.len(), expected, "page {page} limit {limit}");
    }

    let first = list(&mut client, 1, 3).await;
    let names: Vec<_> = first.menus.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["dish 6", "dish 5", "dish 4"]);
}

#[tokio::test]
async fn zero_page_and_limit_use_defaults() {
    let running = start(catalog(ReplyConvention::Envelope, None)).await;
    let mut client = envelope_client(&running).await;
    for i in 0..12 {
        create(&mut client, &format!("dish {i}"), 1.0).await;
    }

    let reply = list(&mut client, 0, 0).await;
    assert!(reply.success);
    assert_eq!(reply.total, 12);
    assert_eq!(reply.menus.len(), menu_rpc::DEFAULT_LIMIT as usize);
}
