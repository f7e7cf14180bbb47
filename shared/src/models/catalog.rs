//! Catalog Models
//!
//! Items offered on the selection screens.

use crate::order::{ItemKind, LineItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sellable product with its current stock row (产品)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub product_id: i64,
    #[serde(alias = "name")]
    pub product_name: String,
    #[serde(alias = "price")]
    pub product_price: Decimal,
    #[serde(default)]
    pub inventory_id: Option<i64>,
    /// Units in stock
    #[serde(default)]
    pub quantity: i64,
}

impl Product {
    /// Line item for `quantity` units of this product
    pub fn to_line(&self, quantity: u32) -> LineItem {
        let line = LineItem::product(
            self.product_id,
            self.product_name.clone(),
            self.product_price,
            quantity,
        );
        match self.inventory_id {
            Some(id) => line.with_inventory(id),
            None => line,
        }
    }
}

/// Therapy package (疗程套餐)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TherapyPackage {
    pub therapy_id: i64,
    #[serde(default, alias = "TherapyCode")]
    pub code: Option<String>,
    #[serde(default, alias = "TherapyName")]
    pub name: Option<String>,
    #[serde(default, alias = "TherapyContent")]
    pub content: Option<String>,
    #[serde(alias = "TherapyPrice")]
    pub price: Decimal,
}

impl TherapyPackage {
    /// Name shown to the user: name, falling back to content, then code
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .or(self.content.as_deref())
            .or(self.code.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    /// Line item for `sessions` sessions of this package
    pub fn to_line(&self, sessions: u32) -> LineItem {
        LineItem::new(
            ItemKind::Therapy,
            self.therapy_id,
            self.display_name(),
            self.price,
            sessions,
        )
    }
}
