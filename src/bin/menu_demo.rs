//! CRUD walkthrough against a running menu server.
//!
//! Creates two dishes, lists, updates one, removes it and lists again,
//! logging each reply. Speaks whichever schema `REPLY_CONVENTION` names.

use anyhow::{bail, Context, Result};
use clap::Parser;
use menu_rpc::config::DemoConfig;
use menu_rpc::grpc::messages::{
    CreateMenuRequest, DeleteMenuRequest, Empty, GetMenuRequest, ListMenusRequest, Menu, MenuId,
    MenuItem, UpdateMenuRequest,
};
use menu_rpc::grpc::{MenuServiceClient, RestaurantServiceClient};
use menu_rpc::telemetry::init_tracing;
use menu_rpc::ReplyConvention;
use tonic::transport::Channel;
use tonic::Code;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing("menu_rpc=info,menu_demo=info");

    let config = DemoConfig::parse();
    let channel = Channel::from_shared(config.rpc_endpoint.clone())
        .with_context(|| format!("invalid rpc endpoint {:?}", config.rpc_endpoint))?
        .connect()
        .await
        .with_context(|| format!("failed to connect to {}", config.rpc_endpoint))?;

    match config.convention.convention {
        ReplyConvention::Status => status_walkthrough(RestaurantServiceClient::new(channel)).await,
        ReplyConvention::Envelope => envelope_walkthrough(MenuServiceClient::new(channel)).await,
    }
}

fn names(items: &[MenuItem]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

async fn status_walkthrough(mut client: RestaurantServiceClient<Channel>) -> Result<()> {
    let pad_thai = client
        .insert(MenuItem {
            id: String::new(),
            name: "Pad Thai".into(),
            price: 13.0,
        })
        .await?
        .into_inner();
    info!(id = %pad_thai.id, price = pad_thai.price, "inserted Pad Thai");

    let curry = client
        .insert(MenuItem {
            id: String::new(),
            name: "Green Curry".into(),
            price: 16.0,
        })
        .await?
        .into_inner();
    info!(id = %curry.id, price = curry.price, "inserted Green Curry");

    let list = client.get_all_menu(Empty {}).await?.into_inner();
    info!(menu = ?names(&list.menu), "menu after inserts");

    let updated = client
        .update(MenuItem {
            id: pad_thai.id.clone(),
            name: "Pad Thai Special".into(),
            price: 15.0,
        })
        .await?
        .into_inner();
    info!(id = %updated.id, name = %updated.name, price = updated.price, "updated");

    let fetched = client
        .get(MenuId {
            id: pad_thai.id.clone(),
        })
        .await?
        .into_inner();
    info!(name = %fetched.name, price = fetched.price, "fetched after update");

    client
        .remove(MenuId {
            id: pad_thai.id.clone(),
        })
        .await?;
    info!(id = %pad_thai.id, "removed");

    match client.get(MenuId { id: pad_thai.id.clone() }).await {
        Err(status) if status.code() == Code::NotFound => {
            info!(message = %status.message(), "removed item is gone")
        }
        Err(status) => bail!("unexpected status after remove: {status}"),
        Ok(_) => bail!("removed item {} is still present", pad_thai.id),
    }

    let list = client.get_all_menu(Empty {}).await?.into_inner();
    info!(menu = ?names(&list.menu), "final menu");
    Ok(())
}

fn menu_names(menus: &[Menu]) -> Vec<&str> {
    menus.iter().map(|menu| menu.name.as_str()).collect()
}

async fn envelope_walkthrough(mut client: MenuServiceClient<Channel>) -> Result<()> {
    let mut created = Vec::new();
    for (name, price) in [("Pad Thai", 13.0), ("Green Curry", 16.0)] {
        let reply = client
            .create_menu(CreateMenuRequest {
                name: name.into(),
                price,
            })
            .await?
            .into_inner();
        let Some(menu) = reply.menu.filter(|_| reply.success) else {
            bail!("create {name} failed: {}", reply.message);
        };
        info!(id = %menu.id, price = menu.price, message = %reply.message, "created {name}");
        created.push(menu);
    }
    let pad_thai_id = created[0].id.clone();

    let list = client
        .list_menus(ListMenusRequest { page: 1, limit: 10 })
        .await?
        .into_inner();
    info!(menus = ?menu_names(&list.menus), total = list.total, "menu after creates");

    let reply = client
        .update_menu(UpdateMenuRequest {
            id: pad_thai_id.clone(),
            name: "Pad Thai Special".into(),
            price: 15.0,
        })
        .await?
        .into_inner();
    info!(success = reply.success, message = %reply.message, "updated");

    let reply = client
        .get_menu(GetMenuRequest {
            id: pad_thai_id.clone(),
        })
        .await?
        .into_inner();
    if let Some(menu) = &reply.menu {
        info!(name = %menu.name, price = menu.price, updated_at = %menu.updated_at, "fetched after update");
    }

    let reply = client
        .delete_menu(DeleteMenuRequest {
            id: pad_thai_id.clone(),
        })
        .await?
        .into_inner();
    info!(success = reply.success, message = %reply.message, "deleted");

    let reply = client
        .get_menu(GetMenuRequest {
            id: pad_thai_id.clone(),
        })
        .await?
        .into_inner();
    if reply.success {
        bail!("deleted menu {pad_thai_id} is still present");
    }
    info!(message = %reply.message, "deleted menu is gone");

    let list = client
        .list_menus(ListMenusRequest { page: 1, limit: 10 })
        .await?
        .into_inner();
    info!(menus = ?menu_names(&list.menus), total = list.total, "final menu");
    Ok(())
}
