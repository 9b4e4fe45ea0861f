use std::time::Duration;

use async_trait::async_trait;
use scylla::prepared_statement::PreparedStatement;
use scylla::{Session, SessionBuilder};
use tracing::{debug, info};

use super::schema::{bootstrap_steps, Queries, SchemaStep};
use super::InventoryStore;
use crate::config::CassandraConfig;
use crate::errors::StoreError;
use crate::models::{InventoryItem, NewWarehouse, Product, Warehouse};

type WarehouseRow = (String, Option<String>, Option<String>);
type InventoryRow = (String, Option<i32>, Option<String>, Option<String>);

struct PreparedStatements {
    insert_warehouse: PreparedStatement,
    select_warehouses: PreparedStatement,
    select_warehouse: PreparedStatement,
    select_warehouse_id: PreparedStatement,
    delete_warehouse: PreparedStatement,
    insert_product: PreparedStatement,
    select_products: PreparedStatement,
    select_products_by_category: PreparedStatement,
}

impl PreparedStatements {
    async fn prepare(session: &Session, queries: Queries) -> Result<Self, StoreError> {
        Ok(Self {
            insert_warehouse: session.prepare(queries.insert_warehouse).await?,
            select_warehouses: session.prepare(queries.select_warehouses).await?,
            select_warehouse: session.prepare(queries.select_warehouse).await?,
            select_warehouse_id: session.prepare(queries.select_warehouse_id).await?,
            delete_warehouse: session.prepare(queries.delete_warehouse).await?,
            insert_product: session.prepare(queries.insert_product).await?,
            select_products: session.prepare(queries.select_products).await?,
            select_products_by_category: session
                .prepare(queries.select_products_by_category)
                .await?,
        })
    }
}

/// Store backed by a single shared CQL session
pub struct CassandraStore {
    session: Session,
    statements: PreparedStatements,
}

impl CassandraStore {
    /// Opens the session, bootstraps the schema and prepares every statement.
    ///
    /// Any failure here is fatal for startup; nothing is retried or rolled back.
    pub async fn connect(config: &CassandraConfig) -> Result<Self, StoreError> {
        info!(nodes = ?config.known_nodes, "Connecting to Cassandra");

        let mut builder = SessionBuilder::new()
            .connection_timeout(Duration::from_secs(config.connect_timeout_secs));
        for node in &config.known_nodes {
            builder = builder.known_node(node);
        }
        let session = builder.build().await?;

        bootstrap_schema(&session, &config.keyspace, config.replication_factor).await?;

        let statements =
            PreparedStatements::prepare(&session, Queries::new(&config.keyspace)).await?;

        Ok(Self {
            session,
            statements,
        })
    }
}

/// Runs the bootstrap steps in order, stopping at the first failure
pub async fn bootstrap_schema(
    session: &Session,
    keyspace: &str,
    replication_factor: u32,
) -> Result<(), StoreError> {
    for step in bootstrap_steps(keyspace, replication_factor) {
        match step {
            SchemaStep::Execute(cql) => {
                debug!(statement = %cql, "Applying schema statement");
                session.query_unpaged(cql, &[]).await?;
            }
            SchemaStep::UseKeyspace(name) => {
                debug!(keyspace = %name, "Selecting keyspace");
                session.use_keyspace(name, false).await?;
            }
        }
    }

    info!(keyspace, replication_factor, "Schema bootstrap complete");
    Ok(())
}

fn decode_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::Decode(err.to_string())
}

fn warehouse_from_row((id, name, location): WarehouseRow) -> Warehouse {
    Warehouse { id, name, location }
}

fn inventory_item_from_row((id, amount, description, category): InventoryRow) -> InventoryItem {
    InventoryItem {
        id,
        amount,
        description,
        category,
    }
}

#[async_trait]
impl InventoryStore for CassandraStore {
    async fn insert_warehouse(&self, warehouse: &NewWarehouse) -> Result<(), StoreError> {
        self.session
            .execute_unpaged(
                &self.statements.insert_warehouse,
                (
                    warehouse.id.as_deref(),
                    warehouse.name.as_deref(),
                    warehouse.location.as_deref(),
                ),
            )
            .await?;
        Ok(())
    }

    async fn list_warehouses(&self) -> Result<Vec<Warehouse>, StoreError> {
        self.session
            .execute_unpaged(&self.statements.select_warehouses, &[])
            .await?
            .rows_typed::<WarehouseRow>()
            .map_err(decode_error)?
            .map(|row| row.map(warehouse_from_row).map_err(decode_error))
            .collect()
    }

    async fn find_warehouse(&self, id: &str) -> Result<Option<Warehouse>, StoreError> {
        let row = self
            .session
            .execute_unpaged(&self.statements.select_warehouse, (id,))
            .await?
            .maybe_first_row_typed::<WarehouseRow>()
            .map_err(decode_error)?;
        Ok(row.map(warehouse_from_row))
    }

    async fn warehouse_exists(&self, id: &str) -> Result<bool, StoreError> {
        let row = self
            .session
            .execute_unpaged(&self.statements.select_warehouse_id, (id,))
            .await?
            .maybe_first_row_typed::<(String,)>()
            .map_err(decode_error)?;
        Ok(row.is_some())
    }

    async fn delete_warehouse(&self, id: &str) -> Result<(), StoreError> {
        self.session
            .execute_unpaged(&self.statements.delete_warehouse, (id,))
            .await?;
        Ok(())
    }

    async fn insert_product(&self, product: &Product) -> Result<(), StoreError> {
        self.session
            .execute_unpaged(
                &self.statements.insert_product,
                (
                    product.id.as_deref(),
                    product.amount,
                    product.description.as_deref(),
                    product.category.as_deref(),
                    product.warehouse_id.as_str(),
                ),
            )
            .await?;
        Ok(())
    }

    async fn list_products(
        &self,
        warehouse_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<InventoryItem>, StoreError> {
        let result = match category {
            Some(category) => {
                self.session
                    .execute_unpaged(
                        &self.statements.select_products_by_category,
                        (warehouse_id, category),
                    )
                    .await?
            }
            None => {
                self.session
                    .execute_unpaged(&self.statements.select_products, (warehouse_id,))
                    .await?
            }
        };

        result
            .rows_typed::<InventoryRow>()
            .map_err(decode_error)?
            .map(|row| row.map(inventory_item_from_row).map_err(decode_error))
            .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.session
            .query_unpaged("SELECT release_version FROM system.local", &[])
            .await?;
        Ok(())
    }
}
