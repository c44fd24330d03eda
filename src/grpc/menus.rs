//! `menu.MenuService`: every call completes; failures ride in the envelope.
//! The one exception is a call cut off by shutdown, which answers `UNAVAILABLE`.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::messages::{
    CreateMenuRequest, DeleteMenuRequest, DeleteMenuResponse, GetMenuRequest, ListMenusRequest,
    ListMenusResponse, Menu, MenuResponse, UpdateMenuRequest,
};
use super::{guarded, MenuService};
use crate::pagination::{Page, PageRequest};
use crate::record::MenuRecord;
use crate::reply::Envelope;
use crate::service::CatalogService;
use crate::shutdown::CallDeadline;
use crate::store::RecordStore;

/// gRPC handler that wraps a shared `CatalogService<S>`.
pub struct MenuHandler<S> {
    catalog: Arc<CatalogService<S>>,
    deadline: CallDeadline,
}

impl<S> MenuHandler<S> {
    pub fn new(catalog: Arc<CatalogService<S>>, deadline: CallDeadline) -> Self {
        Self { catalog, deadline }
    }
}

#[tonic::async_trait]
impl<S: RecordStore + 'static> MenuService for MenuHandler<S> {
    async fn create_menu(
        &self,
        request: Request<CreateMenuRequest>,
    ) -> Result<Response<MenuResponse>, Status> {
        let req = request.into_inner();
        guarded(&self.deadline, async {
            let result = self.catalog.create(&req.name, req.price).await;
            Ok(Response::new(Envelope::from_result(result, "Menu created successfully").into()))
        })
        .await
    }

    async fn get_menu(
        &self,
        request: Request<GetMenuRequest>,
    ) -> Result<Response<MenuResponse>, Status> {
        let req = request.into_inner();
        guarded(&self.deadline, async {
            let result = self.catalog.get(&req.id).await;
            Ok(Response::new(Envelope::from_result(result, "Menu retrieved successfully").into()))
        })
        .await
    }

    async fn update_menu(
        &self,
        request: Request<UpdateMenuRequest>,
    ) -> Result<Response<MenuResponse>, Status> {
        let req = request.into_inner();
        guarded(&self.deadline, async {
            let result = self.catalog.update(&req.id, &req.name, req.price).await;
            Ok(Response::new(Envelope::from_result(result, "Menu updated successfully").into()))
        })
        .await
    }

    async fn delete_menu(
        &self,
        request: Request<DeleteMenuRequest>,
    ) -> Result<Response<DeleteMenuResponse>, Status> {
        let req = request.into_inner();
        guarded(&self.deadline, async {
            let result = self.catalog.delete(&req.id).await;
            Ok(Response::new(Envelope::from_result(result, "Menu deleted successfully").into()))
        })
        .await
    }

    async fn list_menus(
        &self,
        request: Request<ListMenusRequest>,
    ) -> Result<Response<ListMenusResponse>, Status> {
        let req = request.into_inner();
        let window = PageRequest::new(req.page.into(), req.limit.into());
        guarded(&self.deadline, async {
            let result = self.catalog.list_page(window).await;
            Ok(Response::new(Envelope::from_result(result, "Menus retrieved successfully").into()))
        })
        .await
    }
}

impl From<Envelope<MenuRecord>> for MenuResponse {
    fn from(envelope: Envelope<MenuRecord>) -> Self {
        Self {
            menu: envelope.payload.map(Menu::from),
            message: envelope.message,
            success: envelope.success,
        }
    }
}

impl From<Envelope<MenuRecord>> for DeleteMenuResponse {
    fn from(envelope: Envelope<MenuRecord>) -> Self {
        Self {
            message: envelope.message,
            success: envelope.success,
        }
    }
}

/// A failed list becomes an empty page with `success: false`.
impl From<Envelope<Page<MenuRecord>>> for ListMenusResponse {
    fn from(envelope: Envelope<Page<MenuRecord>>) -> Self {
        let page = envelope.payload.unwrap_or_else(Page::empty);
        Self {
            menus: page.items.into_iter().map(Menu::from).collect(),
            total: i64::try_from(page.total).unwrap_or(i64::MAX),
            success: envelope.success,
        }
    }
}
