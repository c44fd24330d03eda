//! Wire messages (prost: standard protobuf wire format, no `.proto` file).

// ---------------------------------------------------------------------------
// menu.RestaurantService: flat, status convention
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct MenuItem {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(double, tag = "3")]
    pub price: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MenuId {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MenuList {
    #[prost(message, repeated, tag = "1")]
    pub menu: Vec<MenuItem>,
}

// ---------------------------------------------------------------------------
// menu.MenuService: namespaced, envelope convention, paginated
// ---------------------------------------------------------------------------

#[derive(Clone, PartialEq, prost::Message)]
pub struct Menu {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(double, tag = "3")]
    pub price: f64,
    /// RFC 3339.
    #[prost(string, tag = "4")]
    pub created_at: String,
    /// RFC 3339.
    #[prost(string, tag = "5")]
    pub updated_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateMenuRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(double, tag = "2")]
    pub price: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetMenuRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UpdateMenuRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(double, tag = "3")]
    pub price: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteMenuRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MenuResponse {
    #[prost(message, optional, tag = "1")]
    pub menu: Option<Menu>,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(bool, tag = "3")]
    pub success: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DeleteMenuResponse {
    #[prost(string, tag = "1")]
    pub message: String,
    #[prost(bool, tag = "2")]
    pub success: bool,
}

/// `page` and `limit` of 0 mean "use the default" (1 and 10).
#[derive(Clone, PartialEq, prost::Message)]
pub struct ListMenusRequest {
    #[prost(int32, tag = "1")]
    pub page: i32,
    #[prost(int32, tag = "2")]
    pub limit: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListMenusResponse {
    #[prost(message, repeated, tag = "1")]
    pub menus: Vec<Menu>,
    #[prost(int64, tag = "2")]
    pub total: i64,
    #[prost(bool, tag = "3")]
    pub success: bool,
}
