use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::InventoryStore;
use crate::errors::StoreError;
use crate::models::{InventoryItem, NewWarehouse, Product, Warehouse};

#[derive(Debug, Clone)]
struct ProductRow {
    amount: Option<i32>,
    description: Option<String>,
    category: Option<String>,
    warehouse_id: String,
}

/// Process-local store with the same upsert and filtering rules as the
/// Cassandra tables.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    warehouses: RwLock<HashMap<String, Warehouse>>,
    products: RwLock<HashMap<String, ProductRow>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Cassandra refuses both a null and an empty partition key
fn primary_key(id: Option<&str>) -> Result<String, StoreError> {
    match id {
        None => Err(StoreError::NullPrimaryKey("id")),
        Some("") => Err(StoreError::EmptyPrimaryKey("id")),
        Some(id) => Ok(id.to_string()),
    }
}

#[async_trait]
impl InventoryStore for InMemoryStore {
    async fn insert_warehouse(&self, warehouse: &NewWarehouse) -> Result<(), StoreError> {
        let id = primary_key(warehouse.id.as_deref())?;

        self.warehouses.write().await.insert(
            id.clone(),
            Warehouse {
                id,
                name: warehouse.name.clone(),
                location: warehouse.location.clone(),
            },
        );
        Ok(())
    }

    async fn list_warehouses(&self) -> Result<Vec<Warehouse>, StoreError> {
        Ok(self.warehouses.read().await.values().cloned().collect())
    }

    async fn find_warehouse(&self, id: &str) -> Result<Option<Warehouse>, StoreError> {
        Ok(self.warehouses.read().await.get(id).cloned())
    }

    async fn warehouse_exists(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.warehouses.read().await.contains_key(id))
    }

    async fn delete_warehouse(&self, id: &str) -> Result<(), StoreError> {
        self.warehouses.write().await.remove(id);
        Ok(())
    }

    async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        let id = primary_key(product.id.as_deref())?;

        self.products.write().await.insert(
            id,
            ProductRow {
                amount: product.amount,
                description: product.description.clone(),
                category: product.category.clone(),
                warehouse_id: product.warehouse_id.clone(),
            },
        );
        Ok(())
    }

    async fn list_products(
        &self,
        warehouse_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<InventoryItem>, StoreError> {
        let products = self.products.read().await;

        Ok(products
            .iter()
            .filter(|(_, row)| row.warehouse_id == warehouse_id)
            .filter(|(_, row)| match category {
                Some(wanted) => row.category.as_deref() == Some(wanted),
                None => true,
            })
            .map(|(id, row)| InventoryItem {
                id: id.clone(),
                amount: row.amount,
                description: row.description.clone(),
                category: row.category.clone(),
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
