//! Inventory Model

use serde::{Deserialize, Serialize};

/// Stock row aggregated per product and store (库存)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    #[serde(alias = "Inventory_ID")]
    pub inventory_id: i64,
    #[serde(alias = "Product_ID")]
    pub product_id: i64,
    #[serde(alias = "ProductName")]
    pub product_name: String,
    #[serde(default, alias = "ProductCode")]
    pub product_code: Option<String>,
    #[serde(default, alias = "StockQuantity")]
    pub stock_quantity: i64,
    #[serde(default, alias = "StockIn")]
    pub stock_in: i64,
    #[serde(default, alias = "StockOut")]
    pub stock_out: i64,
    #[serde(default, alias = "StockLoan")]
    pub stock_loan: i64,
    #[serde(default, alias = "Store_ID")]
    pub store_id: Option<i64>,
    #[serde(default, alias = "StoreName")]
    pub store_name: Option<String>,
    /// Low-stock warning level (backend default 5)
    #[serde(default = "default_threshold", alias = "StockThreshold")]
    pub stock_threshold: i64,
    #[serde(default, alias = "StockInTime")]
    pub stock_in_time: Option<String>,
}

fn default_threshold() -> i64 {
    5
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.stock_threshold
    }
}

/// Stock movement payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryInput {
    pub product_id: i64,
    pub store_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_in: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_out: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_loan: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}
