//! Sale record models (list views)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored product sale row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSellRecord {
    pub product_sell_id: i64,
    pub member_id: i64,
    #[serde(default)]
    pub member_name: Option<String>,
    pub store_id: i64,
    #[serde(default)]
    pub store_name: Option<String>,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    pub final_price: Decimal,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub staff_name: Option<String>,
    #[serde(default)]
    pub sale_category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Stored therapy sale row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TherapySellRecord {
    #[serde(alias = "Order_ID")]
    pub therapy_sell_id: i64,
    #[serde(alias = "Member_ID")]
    pub member_id: i64,
    #[serde(default, alias = "MemberName")]
    pub member_name: Option<String>,
    #[serde(default, alias = "PurchaseDate")]
    pub purchase_date: Option<String>,
    #[serde(default, alias = "PackageName")]
    pub package_name: Option<String>,
    #[serde(default, alias = "TherapyCode")]
    pub therapy_code: Option<String>,
    #[serde(alias = "Sessions")]
    pub sessions: i64,
    #[serde(default, alias = "Price")]
    pub price: Option<Decimal>,
    #[serde(default, alias = "PaymentMethod")]
    pub payment_method: Option<String>,
    #[serde(default, alias = "StaffName")]
    pub staff_name: Option<String>,
    #[serde(default, alias = "SaleCategory")]
    pub sale_category: Option<String>,
    #[serde(default, alias = "Note")]
    pub note: Option<String>,
}

/// Sales order list row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesOrderRow {
    pub order_id: i64,
    pub order_number: String,
    pub order_date: String,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub staff_name: Option<String>,
    pub grand_total: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}
