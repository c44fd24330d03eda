//! Web front end: HTML forms over the menu RPC service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /`: the menu page.
//! - `POST /save`: form `{name, price}`; creates an entry.
//! - `POST /update`: form `{id, name, price}`; replaces an entry.
//! - `POST /remove`: form `{menuitem_id}`; deletes an entry.
//!
//! Successful posts redirect (303) back to `/`. Failures re-render the page
//! with the service's message.
//!
//! ```ignore
//! let gateway = web::connect("http://127.0.0.1:50051", ReplyConvention::Status)?;
//! let app = web::router(gateway);
//! ```

mod gateway;
mod page;

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::shutdown::{drain, CallDeadline, ServeError, Shutdown};

pub use gateway::{connect, EnvelopeGateway, GatewayError, MenuGateway, MenuView, StatusGateway};
pub use page::render;

type Gateway = Arc<dyn MenuGateway>;

/// Build an axum `Router` serving the menu page via `gateway`.
pub fn router(gateway: Gateway) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/save", post(save))
        .route("/update", post(update))
        .route("/remove", post(remove))
        .with_state(gateway)
}

/// Serve the front end on `listener` until `shutdown` fires, then allow
/// `grace` for open requests. Requests still open after that get a 503.
pub async fn serve(
    gateway: Gateway,
    listener: TcpListener,
    shutdown: Shutdown,
    grace: Duration,
) -> Result<(), ServeError> {
    let addr = listener.local_addr()?;
    info!(%addr, "web front end listening");

    let deadline = CallDeadline::new(shutdown.clone(), grace);
    let app = router(gateway).layer(middleware::from_fn_with_state(deadline, cut_off));

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .into_future();
    drain(server, &shutdown, grace).await??;

    info!("web front end stopped");
    Ok(())
}

async fn cut_off(State(deadline): State<CallDeadline>, request: Request, next: Next) -> Response {
    match deadline.run(next.run(request)).await {
        Some(response) => response,
        None => (StatusCode::SERVICE_UNAVAILABLE, "server shutting down").into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct SaveForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: String,
}

#[derive(Debug, Deserialize)]
struct UpdateForm {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    price: String,
}

#[derive(Debug, Deserialize)]
struct RemoveForm {
    #[serde(default)]
    menuitem_id: String,
}

/// `GET /`
async fn index(State(gateway): State<Gateway>) -> Response {
    match gateway.list().await {
        Ok(menus) => Html(render(&menus, None)).into_response(),
        Err(err) => {
            warn!(error = %err, "listing menus failed");
            let message = format!("Could not load the menu: {err}");
            (StatusCode::BAD_GATEWAY, Html(render(&[], Some(&message)))).into_response()
        }
    }
}

/// `POST /save`
async fn save(State(gateway): State<Gateway>, Form(form): Form<SaveForm>) -> Response {
    let price = match parse_price(&form.price) {
        Ok(price) => price,
        Err(message) => return failure(&gateway, GatewayError::Rejected(message)).await,
    };

    match gateway.create(&form.name, price).await {
        Ok(menu) => {
            info!(id = %menu.id, name = %menu.name, "menu item created");
            Redirect::to("/").into_response()
        }
        Err(err) => failure(&gateway, err).await,
    }
}

/// `POST /update`
async fn update(State(gateway): State<Gateway>, Form(form): Form<UpdateForm>) -> Response {
    let price = match parse_price(&form.price) {
        Ok(price) => price,
        Err(message) => return failure(&gateway, GatewayError::Rejected(message)).await,
    };

    match gateway.update(&form.id, &form.name, price).await {
        Ok(menu) => {
            info!(id = %menu.id, name = %menu.name, "menu item updated");
            Redirect::to("/").into_response()
        }
        Err(err) => failure(&gateway, err).await,
    }
}

/// `POST /remove`
async fn remove(State(gateway): State<Gateway>, Form(form): Form<RemoveForm>) -> Response {
    match gateway.remove(&form.menuitem_id).await {
        Ok(()) => {
            info!(id = %form.menuitem_id, "menu item removed");
            Redirect::to("/").into_response()
        }
        Err(err) => failure(&gateway, err).await,
    }
}

/// Re-render the page with `err` shown. The list is refetched on a best
/// effort basis so the user keeps their context.
async fn failure(gateway: &Gateway, err: GatewayError) -> Response {
    warn!(error = %err, "menu form rejected");
    let status = match err {
        GatewayError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GatewayError::Unavailable(_) | GatewayError::InvalidEndpoint(_) => StatusCode::BAD_GATEWAY,
    };
    let menus = gateway.list().await.unwrap_or_default();
    (status, Html(render(&menus, Some(&err.to_string())))).into_response()
}

fn parse_price(raw: &str) -> Result<f64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("price is required".into());
    }
    raw.parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| format!("price must be a number, got {raw:?}"))
}
