//! CQL text for schema bootstrap and the handler queries.
//!
//! Identifiers cannot be bound as parameters, so the keyspace name is spliced
//! into the statement text. Config validation restricts it to a plain CQL
//! identifier before it reaches this module.

pub const WAREHOUSES_TABLE: &str = "warehouses";
pub const PRODUCTS_TABLE: &str = "products";

/// One bootstrap step, executed in order at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStep {
    /// Run a DDL statement
    Execute(String),
    /// Make the keyspace the session default
    UseKeyspace(String),
}

/// Idempotent statements that create the keyspace, both tables and the two
/// secondary indexes on `products`.
pub fn bootstrap_steps(keyspace: &str, replication_factor: u32) -> Vec<SchemaStep> {
    vec![
        SchemaStep::Execute(format!(
            "CREATE KEYSPACE IF NOT EXISTS {keyspace} \
             WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': '{replication_factor}'}}"
        )),
        SchemaStep::UseKeyspace(keyspace.to_string()),
        SchemaStep::Execute(format!(
            "CREATE TABLE IF NOT EXISTS {keyspace}.{WAREHOUSES_TABLE} (\
             id TEXT PRIMARY KEY, \
             name TEXT, \
             location TEXT)"
        )),
        SchemaStep::Execute(format!(
            "CREATE TABLE IF NOT EXISTS {keyspace}.{PRODUCTS_TABLE} (\
             id TEXT PRIMARY KEY, \
             amount INT, \
             description TEXT, \
             category TEXT, \
             warehouseId TEXT)"
        )),
        SchemaStep::Execute(format!(
            "CREATE INDEX IF NOT EXISTS ON {keyspace}.{PRODUCTS_TABLE} (warehouseId)"
        )),
        SchemaStep::Execute(format!(
            "CREATE INDEX IF NOT EXISTS ON {keyspace}.{PRODUCTS_TABLE} (category)"
        )),
    ]
}

/// Keyspace-qualified DML used by the Cassandra store
#[derive(Debug, Clone)]
pub struct Queries {
    pub insert_warehouse: String,
    pub select_warehouses: String,
    pub select_warehouse: String,
    pub select_warehouse_id: String,
    pub delete_warehouse: String,
    pub insert_product: String,
    pub select_products: String,
    pub select_products_by_category: String,
}

impl Queries {
    pub fn new(keyspace: &str) -> Self {
        let warehouses = format!("{keyspace}.{WAREHOUSES_TABLE}");
        let products = format!("{keyspace}.{PRODUCTS_TABLE}");

        Self {
            insert_warehouse: format!(
                "INSERT INTO {warehouses} (id, name, location) VALUES (?, ?, ?)"
            ),
            select_warehouses: format!("SELECT id, name, location FROM {warehouses}"),
            select_warehouse: format!(
                "SELECT id, name, location FROM {warehouses} WHERE id = ?"
            ),
            select_warehouse_id: format!("SELECT id FROM {warehouses} WHERE id = ?"),
            delete_warehouse: format!("DELETE FROM {warehouses} WHERE id = ?"),
            insert_product: format!(
                "INSERT INTO {products} (id, amount, description, category, warehouseId) \
                 VALUES (?, ?, ?, ?, ?)"
            ),
            select_products: format!(
                "SELECT id, amount, description, category FROM {products} WHERE warehouseId = ?"
            ),
            // Two secondary indexes in one restriction need filtering enabled
            select_products_by_category: format!(
                "SELECT id, amount, description, category FROM {products} \
                 WHERE warehouseId = ? AND category = ? ALLOW FILTERING"
            ),
        }
    }
}

/// Whether `name` can be used unquoted as a keyspace identifier
pub fn is_valid_keyspace_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= 48 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
