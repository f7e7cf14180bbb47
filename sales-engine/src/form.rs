//! Sale editor header fields
//!
//! The editor holds what the user typed or picked, labels included, until
//! submit. [`SaleForm`] is that state; it is what gets staged when the user
//! leaves for the item picker, and what validation turns into a
//! [`shared::order::SaleHeader`]. The order discount is not a header field:
//! it lives on the [`shared::order::Order`] alongside the lines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::order::{ItemKind, PaymentMethod, SaleCategory};

/// 销售单表头 (editor state, display labels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleForm {
    /// Which editor this form belongs to; selects the category label table
    pub kind: ItemKind,
    #[serde(default)]
    pub member_id: Option<i64>,
    /// Name shown next to the member code, not sent
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub staff_id: Option<i64>,
    #[serde(default)]
    pub store_id: Option<i64>,
    pub purchase_date: NaiveDate,
    /// Payment method label as shown (e.g. "現金")
    pub payment_method: String,
    /// Sale category label as shown (e.g. "銷售")
    pub sale_category: String,
    #[serde(default)]
    pub transfer_code: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub note: String,
}

impl SaleForm {
    /// Blank form with the first dropdown entries and the given date
    pub fn new(kind: ItemKind, purchase_date: NaiveDate) -> Self {
        Self {
            kind,
            member_id: None,
            member_name: None,
            staff_id: None,
            store_id: None,
            purchase_date,
            payment_method: PaymentMethod::Cash.label().to_string(),
            sale_category: SaleCategory::labels(kind).next().unwrap_or_default().to_string(),
            transfer_code: String::new(),
            card_number: String::new(),
            note: String::new(),
        }
    }

    /// Blank form dated today, pre-filled with the operator's store
    pub fn for_store(kind: ItemKind, store_id: Option<i64>) -> Self {
        Self {
            store_id,
            ..Self::new(kind, shared::util::today())
        }
    }

    /// Selected payment method, if the label is one the editor offers
    pub fn payment(&self) -> Option<PaymentMethod> {
        PaymentMethod::from_label(&self.payment_method)
    }

    /// Selected sale category, if the label is one the editor offers
    pub fn category(&self) -> Option<SaleCategory> {
        SaleCategory::from_label(self.kind, &self.sale_category)
    }
}
