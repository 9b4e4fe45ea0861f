use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::errors::{MessageResponse, ServiceError};
use crate::models::{NewWarehouse, Warehouse};
use crate::AppState;

pub const WAREHOUSE_NOT_FOUND: &str = "Warehouse not found.";
pub const WAREHOUSE_DELETED: &str = "Warehouse deleted.";

/// Registration body. Missing fields are written as nulls.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterWarehouseRequest {
    #[schema(example = "wh-001")]
    pub id: Option<String>,
    #[schema(example = "Central Depot")]
    pub name: Option<String>,
    #[schema(example = "Rotterdam")]
    pub location: Option<String>,
}

impl From<RegisterWarehouseRequest> for NewWarehouse {
    fn from(req: RegisterWarehouseRequest) -> Self {
        NewWarehouse {
            id: req.id,
            name: req.name,
            location: req.location,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterWarehouseResponse {
    pub id: Option<String>,
}

/// Warehouse routes. The `:id` segment name is shared with the inventory routes.
pub fn warehouses_router() -> Router<AppState> {
    Router::new()
        .route("/warehouses", get(list_warehouses).put(register_warehouse))
        .route("/warehouses/:id", get(get_warehouse).delete(delete_warehouse))
}

/// Register (or overwrite) a warehouse.
///
/// Fields with the wrong JSON type are refused with 422 before the store is touched.
#[utoipa::path(
    put,
    path = "/warehouses",
    request_body = RegisterWarehouseRequest,
    responses(
        (status = 201, description = "Warehouse stored", body = RegisterWarehouseResponse),
        (status = 422, description = "Body fields have the wrong JSON types"),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Warehouses"
)]
pub async fn register_warehouse(
    State(state): State<AppState>,
    Json(payload): Json<RegisterWarehouseRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let warehouse = NewWarehouse::from(payload);
    state.store.insert_warehouse(&warehouse).await?;

    info!(warehouse_id = ?warehouse.id, "Warehouse registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterWarehouseResponse { id: warehouse.id }),
    ))
}

/// List every warehouse. Unpaginated.
#[utoipa::path(
    get,
    path = "/warehouses",
    responses(
        (status = 200, description = "All warehouses", body = [Warehouse]),
        (status = 500, description = "Store failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Warehouses"
)]
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Warehouse>>, ServiceError> {
    let warehouses = state.store.list_warehouses().await?;
    Ok(Json(warehouses))
}

#[utoipa::path(
    get,
    path = "/warehouses/{id}",
    params(("id" = String, Path, description = "Warehouse id")),
    responses(
        (status = 200, description = "Warehouse found", body = Warehouse),
        (status = 404, description = "No such warehouse", body = MessageResponse)
    ),
    tag = "Warehouses"
)]
pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Warehouse>, ServiceError> {
    state
        .store
        .find_warehouse(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::NotFound(WAREHOUSE_NOT_FOUND.to_string()))
}

/// Delete a warehouse after confirming it exists.
///
/// Products referencing the warehouse are left in place.
#[utoipa::path(
    delete,
    path = "/warehouses/{id}",
    params(("id" = String, Path, description = "Warehouse id")),
    responses(
        (status = 200, description = "Warehouse deleted", body = MessageResponse),
        (status = 404, description = "No such warehouse", body = MessageResponse)
    ),
    tag = "Warehouses"
)]
pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServiceError> {
    // Lookup and delete are separate round trips; the 404 path depends on it
    if !state.store.warehouse_exists(&id).await? {
        return Err(ServiceError::NotFound(WAREHOUSE_NOT_FOUND.to_string()));
    }

    state.store.delete_warehouse(&id).await?;
    info!(warehouse_id = %id, "Warehouse deleted");
    Ok(Json(MessageResponse::new(WAREHOUSE_DELETED)))
}
