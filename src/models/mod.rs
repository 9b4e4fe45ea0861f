// Core models
pub mod product;
pub mod warehouse;

pub use product::{InventoryItem, Product};
pub use warehouse::{NewWarehouse, Warehouse};
