//! Submit-time validation
//!
//! Runs before any network call. All problems are collected, not just the
//! first, so the editor can mark every offending field at once. On success
//! the form's display labels come back translated into a [`SaleHeader`].

use crate::form::SaleForm;
use crate::money::{MAX_AMOUNT, MAX_PRICE, MAX_QUANTITY, MIN_QUANTITY, sum_money};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::order::{LineItem, Order, OrderDiscount, SaleHeader};

// ── Limits ──────────────────────────────────────────────────────────

/// Order note
pub const MAX_NOTE_LEN: usize = 500;

/// Transfer account / card suffix: exactly this many digits
pub const ACCOUNT_SUFFIX_LEN: usize = 5;

// ── Issues ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    MissingStore,
    MissingMember,
    MissingStaff,
    EmptyOrder,
    InvalidQuantity,
    InvalidPrice,
    UnexpectedItemKind,
    NegativeDiscount,
    /// Flat amount out of range, or not expressible on the target route
    InvalidDiscount,
    InvalidDiscountPercent,
    NegativeGrandTotal,
    FutureDate,
    UnknownPaymentMethod,
    UnknownSaleCategory,
    InvalidTransferCode,
    InvalidCardNumber,
    NoteTooLong,
}

/// One problem with the form, addressed to the field it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationIssue {
    pub code: IssueCode,
    /// Form field to highlight (`lines[2]` for a line item)
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            field: field.into(),
            message: message.into(),
        }
    }
}

// ── Validation ──────────────────────────────────────────────────────

/// Validate the editor state for submission
///
/// `allow_mixed_kinds` is set for the combined sales-order route; the
/// per-kind routes only accept lines of the form's own kind. Totals are
/// derived from the lines here, so a stale `order` cannot slip a negative
/// grand total through.
pub fn validate_sale(
    form: &SaleForm,
    order: &Order,
    today: NaiveDate,
    allow_mixed_kinds: bool,
) -> Result<SaleHeader, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let store_id = require_id(form.store_id, "store_id", IssueCode::MissingStore, &mut issues);
    let member_id = require_id(form.member_id, "member_id", IssueCode::MissingMember, &mut issues);
    let staff_id = require_id(form.staff_id, "staff_id", IssueCode::MissingStaff, &mut issues);

    check_lines(form, order, allow_mixed_kinds, &mut issues);
    check_discount(order, &mut issues);

    if form.purchase_date > today {
        issues.push(ValidationIssue::new(
            IssueCode::FutureDate,
            "purchase_date",
            format!("購買日期不可晚於今天 ({today})"),
        ));
    }

    let payment_method = form.payment();
    if payment_method.is_none() {
        issues.push(ValidationIssue::new(
            IssueCode::UnknownPaymentMethod,
            "payment_method",
            format!("未知的付款方式: {}", form.payment_method),
        ));
    }
    let sale_category = form.category();
    if sale_category.is_none() {
        issues.push(ValidationIssue::new(
            IssueCode::UnknownSaleCategory,
            "sale_category",
            format!("未知的銷售類別: {}", form.sale_category),
        ));
    }

    let transfer_code = match payment_method {
        Some(method) if method.needs_transfer_code() => account_suffix(
            &form.transfer_code,
            "transfer_code",
            IssueCode::InvalidTransferCode,
            &mut issues,
        ),
        _ => None,
    };
    let card_number = match payment_method {
        Some(method) if method.needs_card_number() => account_suffix(
            &form.card_number,
            "card_number",
            IssueCode::InvalidCardNumber,
            &mut issues,
        ),
        _ => None,
    };

    let note = form.note.trim();
    if note.chars().count() > MAX_NOTE_LEN {
        issues.push(ValidationIssue::new(
            IssueCode::NoteTooLong,
            "note",
            format!("備註過長 (最多 {MAX_NOTE_LEN} 字)"),
        ));
    }

    match (store_id, member_id, staff_id, payment_method, sale_category) {
        (Some(store_id), Some(member_id), Some(staff_id), Some(payment_method), Some(sale_category))
            if issues.is_empty() =>
        {
            Ok(SaleHeader {
                member_id,
                staff_id,
                store_id,
                purchase_date: form.purchase_date,
                payment_method,
                sale_category,
                transfer_code,
                card_number,
                note: (!note.is_empty()).then(|| note.to_string()),
            })
        }
        _ => {
            tracing::debug!(count = issues.len(), "Sale form rejected");
            Err(issues)
        }
    }
}

fn require_id(
    value: Option<i64>,
    field: &str,
    code: IssueCode,
    issues: &mut Vec<ValidationIssue>,
) -> Option<i64> {
    match value {
        Some(id) if id > 0 => Some(id),
        _ => {
            let message = match code {
                IssueCode::MissingStore => "請選擇店家",
                IssueCode::MissingMember => "請選擇會員",
                _ => "請選擇經手人",
            };
            issues.push(ValidationIssue::new(code, field, message));
            None
        }
    }
}

fn check_lines(
    form: &SaleForm,
    order: &Order,
    allow_mixed_kinds: bool,
    issues: &mut Vec<ValidationIssue>,
) {
    if order.is_empty() {
        issues.push(ValidationIssue::new(
            IssueCode::EmptyOrder,
            "lines",
            "請至少選擇一個品項",
        ));
        return;
    }

    for (index, line) in order.lines.iter().enumerate() {
        let field = format!("lines[{index}]");
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&line.quantity) {
            issues.push(ValidationIssue::new(
                IssueCode::InvalidQuantity,
                &field,
                format!("{}: 數量需介於 {MIN_QUANTITY} 與 {MAX_QUANTITY}", line.description),
            ));
        }
        if line.unit_price < Decimal::ZERO || line.unit_price > MAX_PRICE {
            issues.push(ValidationIssue::new(
                IssueCode::InvalidPrice,
                &field,
                format!("{}: 單價無效 ({})", line.description, line.unit_price),
            ));
        }
        if !allow_mixed_kinds && line.kind != form.kind {
            issues.push(ValidationIssue::new(
                IssueCode::UnexpectedItemKind,
                &field,
                format!("{}: 品項類型不符", line.description),
            ));
        }
    }
}

fn check_discount(order: &Order, issues: &mut Vec<ValidationIssue>) {
    match order.discount {
        OrderDiscount::Flat(amount) if amount < Decimal::ZERO => {
            issues.push(ValidationIssue::new(
                IssueCode::NegativeDiscount,
                "discount",
                "折扣金額不可為負數",
            ));
            return;
        }
        OrderDiscount::Flat(amount) if amount > MAX_AMOUNT => {
            issues.push(ValidationIssue::new(
                IssueCode::InvalidDiscount,
                "discount",
                format!("折扣金額超出上限 ({MAX_AMOUNT})"),
            ));
            return;
        }
        OrderDiscount::Percent(percent)
            if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED =>
        {
            issues.push(ValidationIssue::new(
                IssueCode::InvalidDiscountPercent,
                "discount",
                "折扣百分比需介於 0 與 100",
            ));
            return;
        }
        _ => {}
    }

    let subtotal = sum_money(order.lines.iter().map(LineItem::line_subtotal));
    let grand_total = subtotal.saturating_sub(order.discount.amount_for(subtotal));
    if grand_total < Decimal::ZERO {
        issues.push(ValidationIssue::new(
            IssueCode::NegativeGrandTotal,
            "discount",
            format!("折扣後總額不可為負數 ({grand_total})"),
        ));
    }
}

/// Blank is allowed; anything else must be exactly five digits
fn account_suffix(
    value: &str,
    field: &str,
    code: IssueCode,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if value.len() == ACCOUNT_SUFFIX_LEN && value.chars().all(|c| c.is_ascii_digit()) {
        return Some(value.to_string());
    }
    issues.push(ValidationIssue::new(
        code,
        field,
        format!("請輸入末 {ACCOUNT_SUFFIX_LEN} 碼數字"),
    ));
    None
}

/// Issues attached to one form field
pub fn issues_for<'a>(
    issues: &'a [ValidationIssue],
    field: &'a str,
) -> impl Iterator<Item = &'a ValidationIssue> {
    issues.iter().filter(move |i| i.field == field)
}
