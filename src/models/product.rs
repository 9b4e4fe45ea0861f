use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `products` table.
///
/// `warehouse_id` is a plain indexed column; nothing keeps it pointing at a
/// live warehouse once the row is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Option<String>,
    pub amount: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub warehouse_id: String,
}

/// Inventory listing entry. The owning warehouse is implied by the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    #[schema(example = "sku-42")]
    pub id: String,
    #[schema(example = 120)]
    pub amount: Option<i32>,
    #[schema(example = "M8 hex bolts, box of 100")]
    pub description: Option<String>,
    #[schema(example = "bolts")]
    pub category: Option<String>,
}
