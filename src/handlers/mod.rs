pub mod health;
pub mod inventory;
pub mod warehouses;

use axum::Router;

use crate::AppState;

/// Warehouse and inventory routes, without state attached
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(warehouses::warehouses_router())
        .merge(inventory::inventory_router())
}
