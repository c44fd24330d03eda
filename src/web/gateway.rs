//! The web front end's view of the menu RPC service.
//!
//! The front end never touches the store; it goes through whichever gRPC
//! schema the server was deployed with.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tonic::transport::{Channel, Endpoint};
use tonic::Code;

use crate::grpc::messages::{
    CreateMenuRequest, DeleteMenuRequest, Empty, ListMenusRequest, MenuId, MenuItem,
    UpdateMenuRequest,
};
use crate::grpc::{MenuServiceClient, RestaurantServiceClient, ERROR_KIND_KEY};
use crate::reply::ReplyConvention;

/// Menu entry as shown on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub id: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The service answered and refused the call.
    #[error("{0}")]
    Rejected(String),
    /// The service could not be reached or failed internally.
    #[error("menu service unavailable: {0}")]
    Unavailable(String),
    #[error("invalid rpc endpoint {0:?}")]
    InvalidEndpoint(String),
}

#[async_trait]
pub trait MenuGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<MenuView>, GatewayError>;
    async fn create(&self, name: &str, price: f64) -> Result<MenuView, GatewayError>;
    async fn update(&self, id: &str, name: &str, price: f64) -> Result<MenuView, GatewayError>;
    async fn remove(&self, id: &str) -> Result<(), GatewayError>;
}

/// Build the gateway for `convention` against `endpoint`. The channel
/// connects lazily, so the front end can start before the RPC server.
pub fn connect(
    endpoint: &str,
    convention: ReplyConvention,
) -> Result<Arc<dyn MenuGateway>, GatewayError> {
    let channel = Endpoint::from_shared(endpoint.to_string())
        .map_err(|_| GatewayError::InvalidEndpoint(endpoint.to_string()))?
        .connect_lazy();

    Ok(match convention {
        ReplyConvention::Status => Arc::new(StatusGateway::new(channel)),
        ReplyConvention::Envelope => Arc::new(EnvelopeGateway::new(channel)),
    })
}

// ---------------------------------------------------------------------------
// menu.RestaurantService
// ---------------------------------------------------------------------------

pub struct StatusGateway {
    client: RestaurantServiceClient<Channel>,
}

impl StatusGateway {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: RestaurantServiceClient::new(channel),
        }
    }
}

/// `INTERNAL` covers both refused input and store failures; the error kind
/// metadata tells them apart.
fn from_status(status: tonic::Status) -> GatewayError {
    let store_failure = status
        .metadata()
        .get(ERROR_KIND_KEY)
        .is_some_and(|kind| kind == "store");
    match status.code() {
        Code::Unavailable | Code::Unknown | Code::Cancelled | Code::DeadlineExceeded => {
            GatewayError::Unavailable(status.message().to_string())
        }
        Code::Internal if store_failure => GatewayError::Unavailable(status.message().to_string()),
        _ => GatewayError::Rejected(status.message().to_string()),
    }
}

impl From<MenuItem> for MenuView {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
        }
    }
}

#[async_trait]
impl MenuGateway for StatusGateway {
    async fn list(&self) -> Result<Vec<MenuView>, GatewayError> {
        let list = self
            .client
            .clone()
            .get_all_menu(Empty {})
            .await
            .map_err(from_status)?
            .into_inner();
        Ok(list.menu.into_iter().map(MenuView::from).collect())
    }

    async fn create(&self, name: &str, price: f64) -> Result<MenuView, GatewayError> {
        let item = MenuItem {
            id: String::new(),
            name: name.to_string(),
            price,
        };
        let created = self
            .client
            .clone()
            .insert(item)
            .await
            .map_err(from_status)?
            .into_inner();
        Ok(created.into())
    }

    async fn update(&self, id: &str, name: &str, price: f64) -> Result<MenuView, GatewayError> {
        let item = MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            price,
        };
        let updated = self
            .client
            .clone()
            .update(item)
            .await
            .map_err(from_status)?
            .into_inner();
        Ok(updated.into())
    }

    async fn remove(&self, id: &str) -> Result<(), GatewayError> {
        self.client
            .clone()
            .remove(MenuId { id: id.to_string() })
            .await
            .map_err(from_status)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// menu.MenuService
// ---------------------------------------------------------------------------

/// Page size used when walking `listMenus`.
const LIST_PAGE_SIZE: i32 = 50;

pub struct EnvelopeGateway {
    client: MenuServiceClient<Channel>,
}

impl EnvelopeGateway {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: MenuServiceClient::new(channel),
        }
    }
}

/// Envelope replies carry no error kind, so a failed write surfaces as a
/// rejection whatever its cause.
fn rejected_unless(success: bool, message: String) -> Result<(), GatewayError> {
    if success {
        Ok(())
    } else {
        Err(GatewayError::Rejected(message))
    }
}

impl From<crate::grpc::messages::Menu> for MenuView {
    fn from(menu: crate::grpc::messages::Menu) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            price: menu.price,
        }
    }
}

fn required_menu(menu: Option<crate::grpc::messages::Menu>) -> Result<MenuView, GatewayError> {
    menu.map(MenuView::from)
        .ok_or_else(|| GatewayError::Unavailable("reply carried no menu".into()))
}

#[async_trait]
impl MenuGateway for EnvelopeGateway {
    /// Walks every page so the front end shows the whole catalog.
    async fn list(&self) -> Result<Vec<MenuView>, GatewayError> {
        let mut client = self.client.clone();
        let mut menus = Vec::new();
        let mut page = 1;

        loop {
            let reply = client
                .list_menus(ListMenusRequest {
                    page,
                    limit: LIST_PAGE_SIZE,
                })
                .await
                .map_err(from_status)?
                .into_inner();
            if !reply.success {
                return Err(GatewayError::Unavailable("listing menus failed".into()));
            }

            let fetched = reply.menus.len();
            menus.extend(reply.menus.into_iter().map(MenuView::from));
            if fetched == 0 || menus.len() as i64 >= reply.total {
                return Ok(menus);
            }
            page += 1;
        }
    }

    async fn create(&self, name: &str, price: f64) -> Result<MenuView, GatewayError> {
        let reply = self
            .client
            .clone()
            .create_menu(CreateMenuRequest {
                name: name.to_string(),
                price,
            })
            .await
            .map_err(from_status)?
            .into_inner();
        rejected_unless(reply.success, reply.message)?;
        required_menu(reply.menu)
    }

    async fn update(&self, id: &str, name: &str, price: f64) -> Result<MenuView, GatewayError> {
        let reply = self
            .client
            .clone()
            .update_menu(UpdateMenuRequest {
                id: id.to_string(),
                name: name.to_string(),
                price,
            })
            .await
            .map_err(from_status)?
            .into_inner();
        rejected_unless(reply.success, reply.message)?;
        required_menu(reply.menu)
    }

    async fn remove(&self, id: &str) -> Result<(), GatewayError> {
        let reply = self
            .client
            .clone()
            .delete_menu(DeleteMenuRequest { id: id.to_string() })
            .await
            .map_err(from_status)?
            .into_inner();
        rejected_unless(reply.success, reply.message)
    }
}
