use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use super::warehouses::WAREHOUSE_NOT_FOUND;
use crate::errors::{MessageResponse, ServiceError};
use crate::models::{InventoryItem, Product};
use crate::AppState;

pub const PRODUCT_ADDED: &str = "Product added to inventory.";
pub const ITEM_LOOKUP_NOT_IMPLEMENTED: &str = "Inventory item lookup is not implemented.";

/// Product body for the add route. The warehouse comes from the path.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AddProductRequest {
    #[schema(example = "sku-42")]
    pub id: Option<String>,
    #[schema(example = 120)]
    pub amount: Option<i32>,
    #[schema(example = "M8 hex bolts, box of 100")]
    pub description: Option<String>,
    #[schema(example = "bolts")]
    pub category: Option<String>,
}

impl AddProductRequest {
    fn into_product(self, warehouse_id: String) -> Product {
        Product {
            id: self.id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            warehouse_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryFilters {
    /// Only return products in this category
    pub category: Option<String>,
}

impl InventoryFilters {
    /// An empty `category=` behaves like no filter
    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// Inventory routes nested below a warehouse
pub fn inventory_router() -> Router<AppState> {
    Router::new()
        .route(
            "/warehouses/:id/inventory",
            get(list_inventory).put(add_product),
        )
        .route(
            "/warehouses/:id/inventory/:product_id",
            get(get_inventory_item),
        )
}

/// Add a product to an existing warehouse.
///
/// Fields with the wrong JSON type are refused with 422 before the store is touched.
#[utoipa::path(
    put,
    path = "/warehouses/{id}/inventory",
    params(("id" = String, Path, description = "Warehouse id")),
    request_body = AddProductRequest,
    responses(
        (status = 201, description = "Product stored", body = MessageResponse),
        (status = 404, description = "No such warehouse", body = MessageResponse),
        (status = 422, description = "Body fields have the wrong JSON types"),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Inventory"
)]
pub async fn add_product(
    State(state): State<AppState>,
    Path(warehouse_id): Path<String>,
    Json(payload): Json<AddProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    // Existence is only checked here; the insert below is a separate write
    if !state.store.warehouse_exists(&warehouse_id).await? {
        return Err(ServiceError::NotFound(WAREHOUSE_NOT_FOUND.to_string()));
    }

    let product = payload.into_product(warehouse_id);
    state.store.insert_product(&product).await?;

    info!(
        warehouse_id = %product.warehouse_id,
        product_id = ?product.id,
        "Product added to inventory"
    );
    Ok((StatusCode::CREATED, Json(MessageResponse::new(PRODUCT_ADDED))))
}

/// List a warehouse's products, optionally by category.
///
/// An unknown warehouse yields an empty list, not a 404.
#[utoipa::path(
    get,
    path = "/warehouses/{id}/inventory",
    params(
        ("id" = String, Path, description = "Warehouse id"),
        InventoryFilters
    ),
    responses(
        (status = 200, description = "Products held by the warehouse", body = [InventoryItem]),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    Path(warehouse_id): Path<String>,
    Query(filters): Query<InventoryFilters>,
) -> Result<Json<Vec<InventoryItem>>, ServiceError> {
    let category = filters.category();
    debug!(warehouse_id = %warehouse_id, category = ?category, "Listing inventory");

    let items = state.store.list_products(&warehouse_id, category).await?;
    Ok(Json(items))
}

// TODO: look the product up by id scoped to the warehouse once the
// single-item contract (status codes, cross-warehouse ids) is settled.
#[utoipa::path(
    get,
    path = "/warehouses/{id}/inventory/{product_id}",
    params(
        ("id" = String, Path, description = "Warehouse id"),
        ("product_id" = String, Path, description = "Product id")
    ),
    responses(
        (status = 501, description = "Not implemented", body = MessageResponse)
    ),
    tag = "Inventory"
)]
pub async fn get_inventory_item(
    Path((warehouse_id, product_id)): Path<(String, String)>,
) -> ServiceError {
    debug!(%warehouse_id, %product_id, "Single inventory item lookup requested");
    ServiceError::NotImplemented(ITEM_LOOKUP_NOT_IMPLEMENTED.to_string())
}
