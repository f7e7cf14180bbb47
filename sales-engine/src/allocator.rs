//! Order discount allocation
//!
//! Spreads an order-level discount across line items in proportion to each
//! line's share of the subtotal. Every line but the last gets its rounded
//! proportional share; the last line absorbs the rounding remainder, so the
//! shares always add up to the order discount exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{LineItem, round_money, sum_money};

/// What to do when the lines carry no subtotal to proportion against
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZeroSubtotalPolicy {
    /// Every line gets zero discount
    #[default]
    AllocateNothing,
    /// A lone line takes the whole discount (its final subtotal goes negative
    /// and validation rejects the order)
    ChargeSingleLine,
}

/// Allocate `total_discount` across `lines`
///
/// Returns new lines with `allocated_discount` / `final_subtotal` filled in;
/// the input is not modified. `original_subtotal` is re-derived from price and
/// quantity first.
///
/// Shares are capped at what is left of the discount, so no line ever gets a
/// negative share even when many half-cent shares round up.
pub fn allocate(
    lines: &[LineItem],
    total_discount: Decimal,
    policy: ZeroSubtotalPolicy,
) -> Vec<LineItem> {
    let mut out: Vec<LineItem> = lines.to_vec();
    for line in &mut out {
        line.refresh_subtotal();
    }

    let Some(last) = out.len().checked_sub(1) else {
        return out;
    };

    let subtotal = sum_money(out.iter().map(|l| l.original_subtotal));

    if subtotal.is_zero() {
        for line in &mut out {
            line.apply_discount(Decimal::ZERO);
        }
        if policy == ZeroSubtotalPolicy::ChargeSingleLine && out.len() == 1 {
            out[0].apply_discount(total_discount);
        }
        tracing::debug!(
            lines = out.len(),
            total_discount = %total_discount,
            ?policy,
            "Zero subtotal, proportional allocation skipped"
        );
        return out;
    }

    // Saturating/checked: out-of-range amounts must reach validation, not panic here
    let mut allocated = Decimal::ZERO;
    for line in &mut out[..last] {
        let proportional = total_discount
            .saturating_mul(line.original_subtotal)
            .checked_div(subtotal)
            .map(round_money)
            .unwrap_or(total_discount);
        let share = if total_discount.is_sign_negative() {
            proportional
        } else {
            proportional.min(total_discount.saturating_sub(allocated))
        };
        line.apply_discount(share);
        allocated = allocated.saturating_add(share);
    }
    // 尾差归最后一行
    out[last].apply_discount(total_discount.saturating_sub(allocated));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use shared::order::ItemKind;

    fn therapy(id: i64, price: Decimal, sessions: u32) -> LineItem {
        LineItem::therapy(id, format!("療程{id}"), price, sessions)
    }

    fn shares(lines: &[LineItem]) -> Vec<Decimal> {
        lines.iter().map(|l| l.allocated_discount).collect()
    }

    #[test]
    fn test_proportional_split_with_remainder_on_last() {
        let lines = vec![
            therapy(1, dec!(500), 2),
            LineItem::product(2, "面膜", dec!(300), 1),
        ];
        let out = allocate(&lines, dec!(50), ZeroSubtotalPolicy::default());
        assert_eq!(shares(&out), vec![dec!(38.46), dec!(11.54)]);
        assert_eq!(out[0].final_subtotal, dec!(961.54));
        assert_eq!(out[1].final_subtotal, dec!(288.46));
        assert_eq!(out[1].kind, ItemKind::Product);
    }

    #[test]
    fn test_equal_lines_split_penny() {
        let lines = vec![
            therapy(1, dec!(333.33), 1),
            therapy(2, dec!(333.33), 1),
            therapy(3, dec!(333.33), 1),
        ];
        let out = allocate(&lines, dec!(100.00), ZeroSubtotalPolicy::default());
        assert_eq!(shares(&out), vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        let total: Decimal = out.iter().map(|l| l.allocated_discount).sum();
        assert_eq!(total, dec!(100.00));
    }

    #[test]
    fn test_sum_is_exact_for_awkward_ratios() {
        let lines = vec![
            therapy(1, dec!(7), 1),
            therapy(2, dec!(13), 1),
            therapy(3, dec!(17.77), 3),
            therapy(4, dec!(0.01), 1),
        ];
        for discount in [dec!(0.01), dec!(9.99), dec!(33.33), dec!(73.32)] {
            let out = allocate(&lines, discount, ZeroSubtotalPolicy::default());
            let total: Decimal = out.iter().map(|l| l.allocated_discount).sum();
            assert_eq!(total, discount, "discount {discount}");
            for line in &out {
                assert!(line.allocated_discount >= Decimal::ZERO);
                assert_eq!(line.final_subtotal, line.original_subtotal - line.allocated_discount);
            }
        }
    }

    #[test]
    fn test_round_up_never_drives_last_line_negative() {
        // four 0.005 shares each round up to 0.01
        let lines: Vec<_> = (1..=4).map(|id| therapy(id, dec!(100), 1)).collect();
        let out = allocate(&lines, dec!(0.02), ZeroSubtotalPolicy::default());
        assert_eq!(shares(&out), vec![dec!(0.01), dec!(0.01), dec!(0), dec!(0)]);
    }

    #[test]
    fn test_no_discount_leaves_lines_untouched() {
        let lines = vec![therapy(1, dec!(1200), 3), therapy(2, dec!(800), 1)];
        let out = allocate(&lines, Decimal::ZERO, ZeroSubtotalPolicy::default());
        for (before, after) in lines.iter().zip(&out) {
            assert!(after.allocated_discount.is_zero());
            assert_eq!(after.final_subtotal, before.original_subtotal);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let lines = vec![therapy(1, dec!(100), 1)];
        let _ = allocate(&lines, dec!(10), ZeroSubtotalPolicy::default());
        assert!(lines[0].allocated_discount.is_zero());
    }

    #[test]
    fn test_empty_lines() {
        assert!(allocate(&[], dec!(10), ZeroSubtotalPolicy::default()).is_empty());
    }

    #[test]
    fn test_zero_subtotal_allocates_nothing() {
        let lines = vec![LineItem::product(1, "贈品樣品", Decimal::ZERO, 2)];
        let out = allocate(&lines, dec!(20), ZeroSubtotalPolicy::AllocateNothing);
        assert!(out[0].allocated_discount.is_zero());
        assert!(out[0].final_subtotal.is_zero());
    }

    #[test]
    fn test_zero_subtotal_single_line_policy() {
        let lines = vec![LineItem::product(1, "贈品樣品", Decimal::ZERO, 2)];
        let out = allocate(&lines, dec!(20), ZeroSubtotalPolicy::ChargeSingleLine);
        assert_eq!(out[0].allocated_discount, dec!(20));
        assert_eq!(out[0].final_subtotal, dec!(-20));

        // more than one line: still nothing
        let lines = vec![
            LineItem::product(1, "樣品A", Decimal::ZERO, 1),
            LineItem::product(2, "樣品B", Decimal::ZERO, 1),
        ];
        let out = allocate(&lines, dec!(20), ZeroSubtotalPolicy::ChargeSingleLine);
        assert!(out.iter().all(|l| l.allocated_discount.is_zero()));
    }

    #[test]
    fn test_zero_priced_line_among_priced_lines_gets_zero() {
        let lines = vec![
            therapy(1, Decimal::ZERO, 1),
            therapy(2, dec!(400), 1),
            therapy(3, dec!(600), 1),
        ];
        let out = allocate(&lines, dec!(100), ZeroSubtotalPolicy::default());
        assert_eq!(shares(&out), vec![dec!(0), dec!(40), dec!(60)]);
    }
}
