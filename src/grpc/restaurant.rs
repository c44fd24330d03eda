//! `menu.RestaurantService`: bare values on success, gRPC status on failure.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::messages::{Empty, MenuId, MenuItem, MenuList};
use super::{guarded, status, RestaurantService};
use crate::service::CatalogService;
use crate::shutdown::CallDeadline;
use crate::store::RecordStore;

/// gRPC handler that wraps a shared `CatalogService<S>`.
pub struct RestaurantHandler<S> {
    catalog: Arc<CatalogService<S>>,
    deadline: CallDeadline,
}

impl<S> RestaurantHandler<S> {
    pub fn new(catalog: Arc<CatalogService<S>>, deadline: CallDeadline) -> Self {
        Self { catalog, deadline }
    }
}

#[tonic::async_trait]
impl<S: RecordStore + 'static> RestaurantService for RestaurantHandler<S> {
    async fn insert(&self, request: Request<MenuItem>) -> Result<Response<MenuItem>, Status> {
        let item = request.into_inner();
        guarded(&self.deadline, async {
            let record = self
                .catalog
                .create(&item.name, item.price)
                .await
                .map_err(status)?;
            Ok(Response::new(record.into()))
        })
        .await
    }

    async fn get(&self, request: Request<MenuId>) -> Result<Response<MenuItem>, Status> {
        let MenuId { id } = request.into_inner();
        guarded(&self.deadline, async {
            let record = self.catalog.get(&id).await.map_err(status)?;
            Ok(Response::new(record.into()))
        })
        .await
    }

    async fn update(&self, request: Request<MenuItem>) -> Result<Response<MenuItem>, Status> {
        let item = request.into_inner();
        guarded(&self.deadline, async {
            let record = self
                .catalog
                .update(&item.id, &item.name, item.price)
                .await
                .map_err(status)?;
            Ok(Response::new(record.into()))
        })
        .await
    }

    async fn remove(&self, request: Request<MenuId>) -> Result<Response<Empty>, Status> {
        let MenuId { id } = request.into_inner();
        guarded(&self.deadline, async {
            self.catalog.delete(&id).await.map_err(status)?;
            Ok(Response::new(Empty {}))
        })
        .await
    }

    async fn get_all_menu(&self, _request: Request<Empty>) -> Result<Response<MenuList>, Status> {
        guarded(&self.deadline, async {
            let records = self.catalog.list_all().await.map_err(status)?;
            Ok(Response::new(MenuList {
                menu: records.into_iter().map(MenuItem::from).collect(),
            }))
        })
        .await
    }
}
