//! Line item and order types

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Monetary scale: cents
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to cents, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum monetary values, saturating at the `Decimal` bounds
///
/// Out-of-range amounts are rejected by validation; totals over them must
/// still come out without panicking so the editor can show the error.
pub fn sum_money(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
}

// ============================================================================
// Line Items
// ============================================================================

/// 品项类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// 产品
    Product,
    /// 疗程套餐
    Therapy,
}

impl ItemKind {
    /// Unit label sent with sales-order items
    pub fn unit(self) -> &'static str {
        match self {
            ItemKind::Product => "件",
            ItemKind::Therapy => "堂",
        }
    }
}

/// One product or therapy package row of an order
///
/// `original_subtotal`, `allocated_discount` and `final_subtotal` are derived;
/// they are kept on the row so a staged or submitted line carries its own
/// amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product ID or therapy package ID, depending on `kind`
    pub reference_id: i64,
    pub kind: ItemKind,
    pub description: String,
    /// Inventory row to draw stock from (products only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_id: Option<i64>,
    pub unit_price: Decimal,
    /// Quantity for products, sessions for therapy packages
    pub quantity: u32,

    // === Computed Fields ===
    #[serde(default)]
    pub original_subtotal: Decimal,
    #[serde(default)]
    pub allocated_discount: Decimal,
    #[serde(default)]
    pub final_subtotal: Decimal,
}

impl LineItem {
    pub fn new(
        kind: ItemKind,
        reference_id: i64,
        description: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        let mut line = Self {
            reference_id,
            kind,
            description: description.into(),
            inventory_id: None,
            unit_price,
            quantity,
            original_subtotal: Decimal::ZERO,
            allocated_discount: Decimal::ZERO,
            final_subtotal: Decimal::ZERO,
        };
        line.refresh_subtotal();
        line
    }

    pub fn product(
        product_id: i64,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self::new(ItemKind::Product, product_id, name, unit_price, quantity)
    }

    pub fn therapy(
        therapy_id: i64,
        name: impl Into<String>,
        unit_price: Decimal,
        sessions: u32,
    ) -> Self {
        Self::new(ItemKind::Therapy, therapy_id, name, unit_price, sessions)
    }

    pub fn with_inventory(mut self, inventory_id: i64) -> Self {
        self.inventory_id = Some(inventory_id);
        self
    }

    /// Same catalog entry (kind + reference)
    pub fn same_item(&self, other: &LineItem) -> bool {
        self.kind == other.kind && self.reference_id == other.reference_id
    }

    /// price × quantity at cent scale (saturating)
    pub fn line_subtotal(&self) -> Decimal {
        round_money(self.unit_price.saturating_mul(Decimal::from(self.quantity)))
    }

    /// Re-derive `original_subtotal` from price × quantity and
    /// `final_subtotal` from the currently allocated discount.
    pub fn refresh_subtotal(&mut self) {
        self.original_subtotal = self.line_subtotal();
        self.final_subtotal = self.original_subtotal.saturating_sub(self.allocated_discount);
    }

    /// Set this line's share of the order discount
    pub fn apply_discount(&mut self, discount: Decimal) {
        self.allocated_discount = discount;
        self.final_subtotal = self.original_subtotal.saturating_sub(discount);
    }
}

// ============================================================================
// Order
// ============================================================================

/// 整笔订单折扣
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderDiscount {
    /// Flat currency amount
    Flat(Decimal),
    /// Percentage of the subtotal (0-100)
    Percent(Decimal),
}

impl Default for OrderDiscount {
    fn default() -> Self {
        OrderDiscount::Flat(Decimal::ZERO)
    }
}

impl OrderDiscount {
    /// Discount amount for a given subtotal, rounded to cents
    pub fn amount_for(&self, subtotal: Decimal) -> Decimal {
        match self {
            OrderDiscount::Flat(amount) => round_money(*amount),
            OrderDiscount::Percent(percent) => {
                round_money(subtotal.saturating_mul(*percent) / Decimal::ONE_HUNDRED)
            }
        }
    }
}

/// Order being composed in the editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Order {
    pub lines: Vec<LineItem>,
    #[serde(default)]
    pub discount: OrderDiscount,

    // === Computed Fields ===
    /// Σ line.original_subtotal
    #[serde(default)]
    pub subtotal: Decimal,
    /// Order-level discount amount (Σ line.allocated_discount)
    #[serde(default)]
    pub total_discount: Decimal,
    /// subtotal - total_discount (may be negative; validation rejects that)
    #[serde(default)]
    pub grand_total: Decimal,
}

impl Order {
    pub fn new(lines: Vec<LineItem>, discount: OrderDiscount) -> Self {
        Self {
            lines,
            discount,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ allocated discount over the lines
    pub fn allocated_total(&self) -> Decimal {
        sum_money(self.lines.iter().map(|l| l.allocated_discount))
    }

    /// Order discount expressed as a percentage of the subtotal
    ///
    /// Therapy-sale rows record the order discount as a percentage. A flat
    /// discount is converted and rounded to 2 dp, so the backend may price
    /// it a few cents off (100 off 3000 becomes 3.33%, i.e. 99.90); see
    /// [`Order::percent_matches_discount`].
    pub fn discount_percent(&self) -> Decimal {
        match self.discount {
            OrderDiscount::Percent(percent) => percent,
            OrderDiscount::Flat(_) if self.subtotal.is_zero() => Decimal::ZERO,
            OrderDiscount::Flat(_) => self
                .total_discount
                .saturating_mul(Decimal::ONE_HUNDRED)
                .checked_div(self.subtotal)
                .map(round_money)
                .unwrap_or(Decimal::ZERO),
        }
    }

    /// Whether [`Order::discount_percent`] reproduces `total_discount` to the cent
    pub fn percent_matches_discount(&self) -> bool {
        OrderDiscount::Percent(self.discount_percent()).amount_for(self.subtotal)
            == self.total_discount
    }
}
