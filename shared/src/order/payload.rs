//! Request / response payloads for the sale endpoints
//!
//! Field names follow each backend route exactly: the product route takes
//! snake_case, the therapy route camelCase (except `therapy_id`), and the
//! sales-order route expects every item key present, null or not.

use super::labels::{PaymentMethod, SaleCategory};
use super::types::{ItemKind, LineItem, Order};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validated order header, already translated to wire values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleHeader {
    pub member_id: i64,
    pub staff_id: i64,
    pub store_id: i64,
    pub purchase_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub sale_category: SaleCategory,
    /// Last five digits of the transfer account (Transfer only)
    pub transfer_code: Option<String>,
    /// Last five digits of the card (CreditCard only)
    pub card_number: Option<String>,
    pub note: Option<String>,
}

// =============================================================================
// Product sell: POST /api/product-sell/add (one per line)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSellPayload {
    pub product_id: i64,
    pub member_id: i64,
    pub store_id: i64,
    pub staff_id: i64,
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    pub sale_category: SaleCategory,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// This line's share of the order discount
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    /// unit_price * quantity - discount_amount
    #[serde(with = "rust_decimal::serde::float")]
    pub final_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_id: Option<i64>,
}

impl ProductSellPayload {
    pub fn from_line(line: &LineItem, header: &SaleHeader) -> Self {
        Self {
            product_id: line.reference_id,
            member_id: header.member_id,
            store_id: header.store_id,
            staff_id: header.staff_id,
            date: header.purchase_date,
            payment_method: header.payment_method,
            transfer_code: header.transfer_code.clone(),
            card_number: header.card_number.clone(),
            sale_category: header.sale_category,
            quantity: line.quantity,
            note: header.note.clone(),
            unit_price: line.unit_price,
            discount_amount: line.allocated_discount,
            final_price: line.final_subtotal,
            inventory_id: line.inventory_id,
        }
    }
}

/// `{ "message": "...", "id": 42 }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSellCreated {
    pub id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Therapy sell: POST /api/therapy-sell/sales (batch)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapySellPayload {
    pub member_id: i64,
    pub store_id: i64,
    pub staff_id: i64,
    pub purchase_date: NaiveDate,
    #[serde(rename = "therapy_id")]
    pub therapy_id: i64,
    /// Number of sessions
    pub amount: u32,
    pub payment_method: PaymentMethod,
    pub sale_category: SaleCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// Order-level discount percentage; the backend prices each row from it
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TherapySellPayload {
    pub fn from_line(line: &LineItem, header: &SaleHeader, discount_percent: Decimal) -> Self {
        Self {
            member_id: header.member_id,
            store_id: header.store_id,
            staff_id: header.staff_id,
            purchase_date: header.purchase_date,
            therapy_id: line.reference_id,
            amount: line.quantity,
            payment_method: header.payment_method,
            sale_category: header.sale_category,
            transfer_code: header.transfer_code.clone(),
            card_number: header.card_number.clone(),
            discount: discount_percent,
            note: header.note.clone(),
        }
    }
}

/// `{ "success": true, "message": "...", "ids": [..] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TherapySellCreated {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub ids: Vec<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Sales order: POST /api/sales-orders (header + items)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrderItemPayload {
    pub product_id: Option<i64>,
    pub therapy_id: Option<i64>,
    pub item_description: String,
    pub item_type: ItemKind,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u32,
    /// unit_price * quantity, before the order discount
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub category: Option<SaleCategory>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrderPayload {
    pub order_date: NaiveDate,
    pub member_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub store_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    pub sale_category: Option<SaleCategory>,
    pub note: Option<String>,
    pub items: Vec<SalesOrderItemPayload>,
}

impl SalesOrderPayload {
    pub fn from_order(order: &Order, header: &SaleHeader) -> Self {
        let items = order
            .lines
            .iter()
            .map(|line| {
                let (product_id, therapy_id) = match line.kind {
                    ItemKind::Product => (Some(line.reference_id), None),
                    ItemKind::Therapy => (None, Some(line.reference_id)),
                };
                SalesOrderItemPayload {
                    product_id,
                    therapy_id,
                    item_description: line.description.clone(),
                    item_type: line.kind,
                    unit: line.kind.unit().to_string(),
                    unit_price: line.unit_price,
                    quantity: line.quantity,
                    subtotal: line.original_subtotal,
                    category: Some(header.sale_category),
                    note: None,
                }
            })
            .collect();

        Self {
            order_date: header.purchase_date,
            member_id: Some(header.member_id),
            staff_id: Some(header.staff_id),
            store_id: header.store_id,
            subtotal: order.subtotal,
            total_discount: order.total_discount,
            grand_total: order.grand_total,
            sale_category: Some(header.sale_category),
            note: header.note.clone(),
            items,
        }
    }
}

/// `{ "success": true, "order_id": 9, "message": "..." }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesOrderCreated {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
