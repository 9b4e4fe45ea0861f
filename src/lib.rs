//! Warehouse Inventory API
//!
//! HTTP routes for registering warehouses and the products they hold, backed
//! by a Cassandra keyspace (or an in-memory stand-in).
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod store;
pub mod tracing;

use axum::Router;

use crate::store::SharedStore;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

/// Full application router: inventory API, health checks and API docs
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(handlers::api_routes())
        .merge(handlers::health::health_routes())
        .merge(openapi::swagger_ui())
        .layer(crate::tracing::request_observability())
        .with_state(state)
}
