use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warehouse Inventory API",
        version = "0.1.0",
        description = r#"
# Warehouse Inventory API

Register warehouses and record the products each one holds.

Identifiers are chosen by the caller. Writing an existing id overwrites the
previous row. Inventory listings are not paginated.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "Warehouses", description = "Warehouse registration and lookup"),
        (name = "Inventory", description = "Products held by a warehouse")
    ),
    paths(
        crate::handlers::warehouses::register_warehouse,
        crate::handlers::warehouses::list_warehouses,
        crate::handlers::warehouses::get_warehouse,
        crate::handlers::warehouses::delete_warehouse,
        crate::handlers::inventory::add_product,
        crate::handlers::inventory::list_inventory,
        crate::handlers::inventory::get_inventory_item,
    ),
    components(
        schemas(
            crate::models::Warehouse,
            crate::models::InventoryItem,
            crate::handlers::warehouses::RegisterWarehouseRequest,
            crate::handlers::warehouses::RegisterWarehouseResponse,
            crate::handlers::inventory::AddProductRequest,
            crate::errors::MessageResponse,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_inventory_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert!(paths.contains(&"/warehouses"));
        assert!(paths.contains(&"/warehouses/{id}"));
        assert!(paths.contains(&"/warehouses/{id}/inventory"));
        assert!(paths.contains(&"/warehouses/{id}/inventory/{product_id}"));
    }

    #[test]
    fn write_routes_document_type_mismatches() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        for path in ["/warehouses", "/warehouses/{id}/inventory"] {
            let responses = &doc["paths"][path]["put"]["responses"];
            assert!(responses["422"].is_object(), "{path} lacks a 422 response");
        }
    }
}
