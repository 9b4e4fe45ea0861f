//! Persistence for warehouses and their inventory.
//!
//! Handlers only see the [`InventoryStore`] trait. The Cassandra backend is
//! what runs in production; the in-memory backend mirrors its observable
//! behaviour for tests and local development.

pub mod cassandra;
pub mod memory;
pub mod schema;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{AppConfig, StoreBackend};
use crate::errors::StoreError;
use crate::models::{InventoryItem, NewWarehouse, Product, Warehouse};

pub use cassandra::CassandraStore;
pub use memory::InMemoryStore;

/// Shared store handle placed in the application state
pub type SharedStore = Arc<dyn InventoryStore>;

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Inserts or overwrites a warehouse row keyed by its id
    async fn insert_warehouse(&self, warehouse: &NewWarehouse) -> Result<(), StoreError>;

    /// Full scan of the warehouses table, in store order
    async fn list_warehouses(&self) -> Result<Vec<Warehouse>, StoreError>;

    async fn find_warehouse(&self, id: &str) -> Result<Option<Warehouse>, StoreError>;

    /// Key-only lookup used before deletes and product inserts
    async fn warehouse_exists(&self, id: &str) -> Result<bool, StoreError>;

    async fn delete_warehouse(&self, id: &str) -> Result<(), StoreError>;

    /// Inserts or overwrites a product row keyed by its id
    async fn insert_product(&self, product: &Product) -> Result<(), StoreError>;

    /// Products whose `warehouseId` matches, optionally narrowed to one category
    async fn list_products(
        &self,
        warehouse_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<InventoryItem>, StoreError>;

    /// Cheap round trip used by the readiness check
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Opens the configured backend. For Cassandra this also bootstraps the schema.
pub async fn connect(config: &AppConfig) -> Result<SharedStore, StoreError> {
    match config.store_backend {
        StoreBackend::Cassandra => {
            let store = CassandraStore::connect(&config.cassandra).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::InMemory => {
            info!("Using in-memory store; data will not survive a restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}
