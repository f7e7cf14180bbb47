//! Display labels ↔ wire enums
//!
//! The sale editors show Traditional Chinese labels; the backend stores stable
//! English enum values. The mapping is a fixed table declared here and looked
//! up in both directions. Unknown labels are rejected by the caller, never
//! passed through to the backend.

use super::types::ItemKind;
use serde::{Deserialize, Serialize};

// ============================================================================
// Payment Method
// ============================================================================

/// 付款方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    Transfer,
    MobilePayment,
    Others,
}

/// Display order is the dropdown order; the first entry is the default.
const PAYMENT_METHOD_LABELS: &[(&str, PaymentMethod)] = &[
    ("現金", PaymentMethod::Cash),
    ("信用卡", PaymentMethod::CreditCard),
    ("轉帳", PaymentMethod::Transfer),
    ("行動支付", PaymentMethod::MobilePayment),
    ("其他", PaymentMethod::Others),
];

impl PaymentMethod {
    pub fn from_label(label: &str) -> Option<Self> {
        PAYMENT_METHOD_LABELS
            .iter()
            .find(|(l, _)| *l == label.trim())
            .map(|(_, m)| *m)
    }

    pub fn label(self) -> &'static str {
        PAYMENT_METHOD_LABELS
            .iter()
            .find(|(_, m)| *m == self)
            .map(|(l, _)| *l)
            .unwrap_or("其他")
    }

    /// Wire value stored by the backend
    pub fn as_wire(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "CreditCard",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::MobilePayment => "MobilePayment",
            PaymentMethod::Others => "Others",
        }
    }

    /// Labels in dropdown order
    pub fn labels() -> impl Iterator<Item = &'static str> {
        PAYMENT_METHOD_LABELS.iter().map(|(l, _)| *l)
    }

    /// Whether the last five digits of a transfer account are recorded
    pub fn needs_transfer_code(self) -> bool {
        self == PaymentMethod::Transfer
    }

    /// Whether the last five digits of the card are recorded
    pub fn needs_card_number(self) -> bool {
        self == PaymentMethod::CreditCard
    }
}

// ============================================================================
// Sale Category
// ============================================================================

/// 销售类别
///
/// Product and therapy editors offer different category sets, and spell
/// "gift" differently (贈品 vs 贈送).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SaleCategory {
    Sell,
    Gift,
    Discount,
    Preorder,
    Loan,
    Ticket,
}

const PRODUCT_SALE_CATEGORY_LABELS: &[(&str, SaleCategory)] = &[
    ("銷售", SaleCategory::Sell),
    ("贈品", SaleCategory::Gift),
    ("折扣", SaleCategory::Discount),
    ("預購", SaleCategory::Preorder),
    ("暫借", SaleCategory::Loan),
];

const THERAPY_SALE_CATEGORY_LABELS: &[(&str, SaleCategory)] = &[
    ("銷售", SaleCategory::Sell),
    ("贈送", SaleCategory::Gift),
    ("折扣", SaleCategory::Discount),
    ("票卷", SaleCategory::Ticket),
];

fn category_table(kind: ItemKind) -> &'static [(&'static str, SaleCategory)] {
    match kind {
        ItemKind::Product => PRODUCT_SALE_CATEGORY_LABELS,
        ItemKind::Therapy => THERAPY_SALE_CATEGORY_LABELS,
    }
}

impl SaleCategory {
    pub fn from_label(kind: ItemKind, label: &str) -> Option<Self> {
        category_table(kind)
            .iter()
            .find(|(l, _)| *l == label.trim())
            .map(|(_, c)| *c)
    }

    /// Display label for this category, if the editor for `kind` offers it
    pub fn label(self, kind: ItemKind) -> Option<&'static str> {
        category_table(kind)
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(l, _)| *l)
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            SaleCategory::Sell => "Sell",
            SaleCategory::Gift => "Gift",
            SaleCategory::Discount => "Discount",
            SaleCategory::Preorder => "Preorder",
            SaleCategory::Loan => "Loan",
            SaleCategory::Ticket => "Ticket",
        }
    }

    /// Labels in dropdown order
    pub fn labels(kind: ItemKind) -> impl Iterator<Item = &'static str> {
        category_table(kind).iter().map(|(l, _)| *l)
    }
}
