//! Order total aggregation
//!
//! [`recompute`] is the single place order totals are derived. The editor
//! operations on [`OrderEditor`] each finish with a recompute, so totals and
//! per-line shares never lag behind an edit.

use crate::allocator::{ZeroSubtotalPolicy, allocate};
use crate::money::{clamp_quantity, sum_money};
use shared::order::{ItemKind, LineItem, Order, OrderDiscount};

/// Recompute subtotal, discount, grand total and per-line allocation
///
/// Pure: returns a new order, the input is left as is. The grand total may
/// come out negative (flat discount above the subtotal); that is reported by
/// validation rather than clamped here. Amounts beyond the `Decimal` range
/// saturate instead of panicking; validation rejects them too.
pub fn recompute(order: &Order, policy: ZeroSubtotalPolicy) -> Order {
    let mut lines = order.lines.clone();
    for line in &mut lines {
        line.refresh_subtotal();
    }

    let subtotal = sum_money(lines.iter().map(|l| l.original_subtotal));
    let total_discount = order.discount.amount_for(subtotal);
    let lines = allocate(&lines, total_discount, policy);

    let next = Order {
        lines,
        discount: order.discount,
        subtotal,
        total_discount,
        grand_total: subtotal.saturating_sub(total_discount),
    };

    tracing::debug!(
        lines = next.lines.len(),
        subtotal = %next.subtotal,
        total_discount = %next.total_discount,
        grand_total = %next.grand_total,
        "Order recomputed"
    );

    next
}

/// The order being edited, kept consistent after every change
#[derive(Debug, Clone, Default)]
pub struct OrderEditor {
    order: Order,
    policy: ZeroSubtotalPolicy,
}

impl OrderEditor {
    pub fn new(policy: ZeroSubtotalPolicy) -> Self {
        Self {
            order: Order::default(),
            policy,
        }
    }

    /// Resume editing an order (e.g. one restored from staging)
    pub fn from_order(order: Order, policy: ZeroSubtotalPolicy) -> Self {
        let order = recompute(&order, policy);
        Self { order, policy }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn into_order(self) -> Order {
        self.order
    }

    pub fn policy(&self) -> ZeroSubtotalPolicy {
        self.policy
    }

    /// Add a line; picking an item already on the order adds to its quantity
    pub fn add_line(&mut self, line: LineItem) {
        self.merge_line(line);
        self.refresh();
    }

    /// Replace all lines with a fresh selection from the picker
    pub fn replace_lines(&mut self, lines: Vec<LineItem>) {
        self.order.lines.clear();
        for line in lines {
            self.merge_line(line);
        }
        self.refresh();
    }

    /// Remove a line; returns it if it was on the order
    pub fn remove_line(&mut self, kind: ItemKind, reference_id: i64) -> Option<LineItem> {
        let index = self
            .order
            .lines
            .iter()
            .position(|l| l.kind == kind && l.reference_id == reference_id)?;
        let removed = self.order.lines.remove(index);
        self.refresh();
        Some(removed)
    }

    /// Set a line's quantity, clamped to at least one
    ///
    /// Returns `false` when no such line is on the order.
    pub fn set_quantity(&mut self, kind: ItemKind, reference_id: i64, quantity: i64) -> bool {
        let Some(line) = self
            .order
            .lines
            .iter_mut()
            .find(|l| l.kind == kind && l.reference_id == reference_id)
        else {
            return false;
        };
        line.quantity = clamp_quantity(quantity);
        self.refresh();
        true
    }

    pub fn set_discount(&mut self, discount: OrderDiscount) {
        self.order.discount = discount;
        self.refresh();
    }

    pub fn clear(&mut self) {
        self.order = Order::default();
    }

    fn merge_line(&mut self, mut line: LineItem) {
        match self.order.lines.iter_mut().find(|l| l.same_item(&line)) {
            Some(existing) => {
                let merged = i64::from(existing.quantity) + i64::from(line.quantity);
                existing.quantity = clamp_quantity(merged);
            }
            None => {
                line.quantity = clamp_quantity(i64::from(line.quantity));
                self.order.lines.push(line);
            }
        }
    }

    fn refresh(&mut self) {
        self.order = recompute(&self.order, self.policy);
    }
}
