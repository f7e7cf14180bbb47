//! Money helpers shared by the allocator, aggregator and validation
//!
//! All amounts are `Decimal` at cent scale. Amounts typed into the editor
//! arrive as text and go through [`parse_money`] before they touch an order.

use rust_decimal::prelude::*;
pub use shared::order::{MONEY_DECIMAL_PLACES, round_money, sum_money};

/// Maximum allowed unit price (NT$10,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);
/// Maximum allowed quantity / sessions per line
pub const MAX_QUANTITY: u32 = 9999;
/// Lowest quantity a line can hold; smaller inputs are clamped up
pub const MIN_QUANTITY: u32 = 1;
/// Largest amount a form field accepts: MAX_PRICE × MAX_QUANTITY (99,990,000,000)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_205_752_192, 23, 0, false, 0);

/// Parse an amount typed into a form field
///
/// Blank input is zero. Thousands separators and surrounding whitespace are
/// tolerated; anything else non-numeric, or beyond [`MAX_AMOUNT`], is `None`.
pub fn parse_money(input: &str) -> Option<Decimal> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Some(Decimal::ZERO);
    }
    let value = Decimal::from_str(&cleaned).ok()?;
    if value.abs() > MAX_AMOUNT {
        tracing::warn!(input, "Amount exceeds maximum, rejected");
        return None;
    }
    Some(value)
}

/// Clamp a requested quantity into `MIN_QUANTITY..=MAX_QUANTITY`
#[inline]
pub fn clamp_quantity(requested: i64) -> u32 {
    requested.clamp(MIN_QUANTITY as i64, MAX_QUANTITY as i64) as u32
}
