//! The Pad Thai / Green Curry walkthrough, once per schema.

use menu_rpc::grpc::messages::{
    CreateMenuRequest, DeleteMenuRequest, Empty, GetMenuRequest, ListMenusRequest, MenuId,
    MenuItem, UpdateMenuRequest,
};
use menu_rpc::ReplyConvention;
use tonic::Code;

use crate::support::{catalog, envelope_client, start, status_client};

#[tokio::test]
async fn status_schema_walkthrough() {
    let running = start(catalog(ReplyConvention::Status, None)).await;
    let mut client = status_client(&running).await;

    let pad_thai = client
        .insert(MenuItem {
            id: String::new(),
            name: "Pad Thai".into(),
            price: 13.0,
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(pad_thai.price, 13.0);

    client
        .insert(MenuItem {
            id: String::new(),
            name: "Green Curry".into(),
            price: 16.0,
        })
        .await
        .unwrap();

    let list = client.get_all_menu(Empty {}).await.unwrap().into_inner();
    let names: Vec<_> = list.menu.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Green Curry", "Pad Thai"]);

    client
        .update(MenuItem {
            id: pad_thai.id.clone(),
            name: "Pad Thai Special".into(),
            price: 15.0,
        })
        .await
        .unwrap();
    let fetched = client
        .get(MenuId {
            id: pad_thai.id.clone(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(fetched.name, "Pad Thai Special");
    assert_eq!(fetched.price, 15.0);

    client
        .remove(MenuId {
            id: pad_thai.id.clone(),
        })
        .await
        .unwrap();
    let status = client
        .get(MenuId {
            id: pad_thai.id.clone(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let list = client.get_all_menu(Empty {}).await.unwrap().into_inner();
    let names: Vec<_> = list.menu.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Green Curry"]);
}

#[tokio::test]
async fn envelope_schema_walkthrough() {
    let running = start(catalog(ReplyConvention::Envelope, None)).await;
    let mut client = envelope_client(&running).await;

    let pad_thai = client
        .create_menu(CreateMenuRequest {
            name: "Pad Thai".into(),
            price: 13.0,
        })
        .await
        .unwrap()
        .into_inner()
        .menu
        .unwrap();
    assert_eq!(pad_thai.price, 13.0);

    client
        .create_menu(CreateMenuRequest {
            name: "Green Curry".into(),
            price: 16.0,
        })
        .await
        .unwrap();

    let list = client
        .list_menus(ListMenusRequest { page: 1, limit: 10 })
        .await
        .unwrap()
        .into_inner();
    let names: Vec<_> = list.menus.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Green Curry", "Pad Thai"]);
    assert_eq!(list.total, 2);

    let reply = client
        .update_menu(UpdateMenuRequest {
            id: pad_thai.id.clone(),
            name: "Pad Thai Special".into(),
            price: 15.0,
        })
        .await
        .unwrap()
        .into_inner();
    assert!(reply.success);

    let fetched = client
        .get_menu(GetMenuRequest {
            id: pad_thai.id.clone(),
        })
        .await
        .unwrap()
        .into_inner()
        .menu
        .unwrap();
    assert_eq!(fetched.price, 15.0);

    let reply = client
        .delete_menu(DeleteMenuRequest {
            id: pad_thai.id.clone(),
        })
        .await
        .unwrap()
        .into_inner();
    assert!(reply.success);

    let reply = client
        .get_menu(GetMenuRequest {
            id: pad_thai.id.clone(),
        })
        .await
        .unwrap()
        .into_inner();
    assert!(!reply.success);
    assert_eq!(reply.message, "Menu not found");

    let list = client
        .list_menus(ListMenusRequest { page: 1, limit: 10 })
        .await
        .unwrap()
        .into_inner();
    let names: Vec<_> = list.menus.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Green Curry"]);
    assert_eq!(list.total, 1);
}
