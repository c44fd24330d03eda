fn main() {
    // Only run gRPC codegen when the "grpc" feature is enabled.
    // Cargo sets CARGO_FEATURE_GRPC when compiling with --features grpc.
    if std::env::var("CARGO_FEATURE_GRPC").is_err() {
        return;
    }

    let restaurant = tonic_build::manual::Service::builder()
        .name("RestaurantService")
        .package("menu")
        .method(method("insert", "Insert", "MenuItem", "MenuItem"))
        .method(method("get", "Get", "MenuId", "MenuItem"))
        .method(method("update", "Update", "MenuItem", "MenuItem"))
        .method(method("remove", "Remove", "MenuId", "Empty"))
        .method(method("get_all_menu", "GetAllMenu", "Empty", "MenuList"))
        .build();

    let menus = tonic_build::manual::Service::builder()
        .name("MenuService")
        .package("menu")
        .method(method("create_menu", "createMenu", "CreateMenuRequest", "MenuResponse"))
        .method(method("get_menu", "getMenu", "GetMenuRequest", "MenuResponse"))
        .method(method("update_menu", "updateMenu", "UpdateMenuRequest", "MenuResponse"))
        .method(method(
            "delete_menu",
            "deleteMenu",
            "DeleteMenuRequest",
            "DeleteMenuResponse",
        ))
        .method(method(
            "list_menus",
            "listMenus",
            "ListMenusRequest",
            "ListMenusResponse",
        ))
        .build();

    tonic_build::manual::Builder::new().compile(&[restaurant, menus]);
}

fn method(name: &str, route: &str, input: &str, output: &str) -> tonic_build::manual::Method {
    tonic_build::manual::Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::grpc::messages::{input}"))
        .output_type(format!("crate::grpc::messages::{output}"))
        .codec_path("tonic::codec::ProstCodec")
        .build()
}
