//! Sale submission
//!
//! Takes the editor's form and order, validates them, and creates the sale
//! through one of three backend routes:
//!
//! | Endpoint | Calls | Partial success |
//! |---|---|---|
//! | `ProductSell` | one `POST /api/product-sell/add` per line, in order | yes |
//! | `TherapySell` | one batched `POST /api/therapy-sell/sales` | no |
//! | `SalesOrder` | one `POST /api/sales-orders` | no |
//!
//! State: `Draft → Validating → Submitting → Submitted | PartiallySubmitted | Failed`.
//!
//! The therapy route prices rows from a percentage. A flat discount is sent
//! as its 2 dp percent equivalent, and rejected at validation when that
//! percent would not reproduce the amount shown in the editor.
//! There is no retry and no rollback; the report says exactly what was
//! created.

use crate::{ClientError, HttpClient, NetworkHttpClient, SaleError, SalesApi};
use chrono::NaiveDate;
use sales_engine::{
    IssueCode, SaleForm, ValidationIssue, ZeroSubtotalPolicy, recompute, validate_sale,
};
use serde::{Deserialize, Serialize};
use shared::order::{
    ItemKind, Order, OrderDiscount, ProductSellPayload, SaleHeader, SalesOrderPayload,
    TherapySellPayload,
};

/// Backend route a sale is created through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleEndpoint {
    /// Product sale rows, one request per line
    ProductSell,
    /// Therapy sale rows, one batched request
    TherapySell,
    /// Sales order with mixed items
    SalesOrder,
}

impl SaleEndpoint {
    /// Per-kind endpoint for an editor
    pub fn for_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Product => SaleEndpoint::ProductSell,
            ItemKind::Therapy => SaleEndpoint::TherapySell,
        }
    }

    /// Line kind the endpoint accepts; `None` when it takes both
    pub fn item_kind(self) -> Option<ItemKind> {
        match self {
            SaleEndpoint::ProductSell => Some(ItemKind::Product),
            SaleEndpoint::TherapySell => Some(ItemKind::Therapy),
            SaleEndpoint::SalesOrder => None,
        }
    }
}

/// 提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    #[default]
    Draft,
    Validating,
    Submitting,
    /// Everything created
    Submitted,
    /// Some lines created, then one failed
    PartiallySubmitted,
    /// Nothing created
    Failed,
}

impl SubmissionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SubmissionState::Submitted
                | SubmissionState::PartiallySubmitted
                | SubmissionState::Failed
        )
    }
}

/// The request that failed
#[derive(Debug)]
pub struct LineFailure {
    /// Line index for per-line endpoints; `None` for single-request endpoints
    pub index: Option<usize>,
    pub error: ClientError,
}

/// Outcome of one submission
#[derive(Debug)]
pub struct SubmissionReport {
    pub endpoint: SaleEndpoint,
    pub state: SubmissionState,
    /// Row ids (ProductSell / TherapySell) or the order id (SalesOrder)
    pub created_ids: Vec<i64>,
    /// Validation problems; non-empty only when nothing was sent
    pub issues: Vec<ValidationIssue>,
    pub failure: Option<LineFailure>,
    /// The order as recomputed for submission
    pub order: Order,
}

impl SubmissionReport {
    pub fn is_success(&self) -> bool {
        self.state == SubmissionState::Submitted
    }

    pub fn into_result(self) -> Result<Vec<i64>, SaleError> {
        match (self.state, self.failure) {
            (SubmissionState::Submitted, _) => Ok(self.created_ids),
            (SubmissionState::PartiallySubmitted, Some(failure)) => Err(SaleError::Partial {
                created: self.created_ids,
                index: failure.index,
                source: failure.error,
            }),
            (_, Some(failure)) => Err(SaleError::Failed {
                index: failure.index,
                source: failure.error,
            }),
            (_, None) => Err(SaleError::Rejected(self.issues)),
        }
    }
}

/// Validates and submits sales
#[derive(Debug)]
pub struct SubmissionAdapter<C = NetworkHttpClient> {
    api: SalesApi<C>,
    policy: ZeroSubtotalPolicy,
    state: SubmissionState,
}

impl<C: HttpClient> SubmissionAdapter<C> {
    pub fn new(client: C) -> Self {
        Self {
            api: SalesApi::new(client),
            policy: ZeroSubtotalPolicy::default(),
            state: SubmissionState::Draft,
        }
    }

    pub fn with_policy(mut self, policy: ZeroSubtotalPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Submit dated today
    pub async fn submit(
        &mut self,
        endpoint: SaleEndpoint,
        form: &SaleForm,
        order: &Order,
    ) -> SubmissionReport {
        self.submit_on(endpoint, form, order, shared::util::today())
            .await
    }

    /// Submit, validating the purchase date against `today`
    pub async fn submit_on(
        &mut self,
        endpoint: SaleEndpoint,
        form: &SaleForm,
        order: &Order,
        today: NaiveDate,
    ) -> SubmissionReport {
        self.transition(SubmissionState::Validating);
        let order = recompute(order, self.policy);

        let mut report = SubmissionReport {
            endpoint,
            state: SubmissionState::Validating,
            created_ids: Vec::new(),
            issues: Vec::new(),
            failure: None,
            order,
        };

        let header = match self.validate(endpoint, form, &report.order, today) {
            Ok(header) => header,
            Err(issues) => {
                tracing::info!(?endpoint, issues = issues.len(), "Sale blocked by validation");
                report.issues = issues;
                return self.finish(report, SubmissionState::Failed);
            }
        };

        self.transition(SubmissionState::Submitting);
        tracing::info!(
            ?endpoint,
            lines = report.order.lines.len(),
            grand_total = %report.order.grand_total,
            "Submitting sale"
        );

        let outcome = match endpoint {
            SaleEndpoint::ProductSell => self.submit_per_line(&report.order, &header).await,
            SaleEndpoint::TherapySell => {
                let discount = report.order.discount_percent();
                let payloads: Vec<_> = report
                    .order
                    .lines
                    .iter()
                    .map(|line| TherapySellPayload::from_line(line, &header, discount))
                    .collect();
                self.api
                    .create_therapy_sells(&payloads)
                    .await
                    .map_err(|error| (Vec::new(), LineFailure { index: None, error }))
            }
            SaleEndpoint::SalesOrder => {
                let payload = SalesOrderPayload::from_order(&report.order, &header);
                self.api
                    .create_sales_order(&payload)
                    .await
                    .map(|order_id| vec![order_id])
                    .map_err(|error| (Vec::new(), LineFailure { index: None, error }))
            }
        };

        match outcome {
            Ok(ids) => {
                report.created_ids = ids;
                tracing::info!(?endpoint, ids = ?report.created_ids, "Sale submitted");
                self.finish(report, SubmissionState::Submitted)
            }
            Err((created, failure)) => {
                tracing::error!(
                    ?endpoint,
                    line = ?failure.index,
                    created = created.len(),
                    error = %failure.error,
                    "Sale submission failed"
                );
                let state = if created.is_empty() {
                    SubmissionState::Failed
                } else {
                    SubmissionState::PartiallySubmitted
                };
                report.created_ids = created;
                report.failure = Some(failure);
                self.finish(report, state)
            }
        }
    }

    fn validate(
        &self,
        endpoint: SaleEndpoint,
        form: &SaleForm,
        order: &Order,
        today: NaiveDate,
    ) -> Result<SaleHeader, Vec<ValidationIssue>> {
        let kind_issue = endpoint
            .item_kind()
            .filter(|kind| *kind != form.kind)
            .map(|kind| {
                ValidationIssue::new(
                    IssueCode::UnexpectedItemKind,
                    "kind",
                    format!("{endpoint:?} expects {kind:?} lines"),
                )
            });

        // therapy rows carry a 2 dp percent; a flat amount must survive the conversion
        let discount_issue = (endpoint == SaleEndpoint::TherapySell
            && matches!(order.discount, OrderDiscount::Flat(_))
            && !order.percent_matches_discount())
        .then(|| {
            ValidationIssue::new(
                IssueCode::InvalidDiscount,
                "discount",
                format!(
                    "折扣 {} 無法換算為百分比 ({}% = {}), 請改用百分比折扣",
                    order.total_discount,
                    order.discount_percent(),
                    OrderDiscount::Percent(order.discount_percent()).amount_for(order.subtotal)
                ),
            )
        });

        let extra: Vec<_> = kind_issue.into_iter().chain(discount_issue).collect();
        match validate_sale(form, order, today, endpoint.item_kind().is_none()) {
            Ok(header) if extra.is_empty() => Ok(header),
            Ok(_) => Err(extra),
            Err(mut issues) => {
                issues.extend(extra);
                Err(issues)
            }
        }
    }

    /// One request per line, in order, stopping at the first failure
    async fn submit_per_line(
        &self,
        order: &Order,
        header: &SaleHeader,
    ) -> Result<Vec<i64>, (Vec<i64>, LineFailure)> {
        let mut created = Vec::with_capacity(order.lines.len());
        for (index, line) in order.lines.iter().enumerate() {
            let payload = ProductSellPayload::from_line(line, header);
            match self.api.create_product_sell(&payload).await {
                Ok(id) => {
                    tracing::debug!(index, id, "Line submitted");
                    created.push(id);
                }
                Err(error) => {
                    return Err((
                        created,
                        LineFailure {
                            index: Some(index),
                            error,
                        },
                    ));
                }
            }
        }
        Ok(created)
    }

    fn finish(&mut self, mut report: SubmissionReport, state: SubmissionState) -> SubmissionReport {
        self.transition(state);
        report.state = state;
        report
    }

    fn transition(&mut self, to: SubmissionState) {
        tracing::debug!(from = ?self.state, ?to, "Submission state");
        self.state = to;
    }
}
