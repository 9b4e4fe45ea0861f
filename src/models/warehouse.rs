use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `warehouses` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Warehouse {
    #[schema(example = "wh-001")]
    pub id: String,
    #[schema(example = "Central Depot")]
    pub name: Option<String>,
    #[schema(example = "Rotterdam")]
    pub location: Option<String>,
}

impl Warehouse {
    pub fn new(id: impl Into<String>, name: Option<String>, location: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
            location,
        }
    }
}

/// Values written by a warehouse registration. The id may be absent; the
/// store decides what a null primary key means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWarehouse {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
}
