// clinic-client/tests/submission.rs
// 销售提交集成测试

mod common;

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use clinic_client::{
    ClientError, SaleEndpoint, SaleError, SubmissionAdapter, SubmissionState,
};
use common::{MockBackend, MockReply, TEST_TOKEN};
use rust_decimal_macros::dec;
use sales_engine::{IssueCode, SaleForm};
use serde_json::json;
use shared::order::{ItemKind, LineItem, Order, OrderDiscount};
use std::sync::atomic::{AtomicI64, Ordering};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn form(kind: ItemKind) -> SaleForm {
    SaleForm {
        member_id: Some(12),
        staff_id: Some(3),
        store_id: Some(1),
        ..SaleForm::new(kind, today())
    }
}

fn product_order() -> Order {
    Order::new(
        vec![
            LineItem::product(1, "保濕霜", dec!(500), 2).with_inventory(88),
            LineItem::product(2, "面膜", dec!(300), 1),
        ],
        OrderDiscount::Flat(dec!(50)),
    )
}

/// Backend that hands out ids 101, 102, ... for product lines
async fn product_backend(fail_at_call: Option<i64>) -> MockBackend {
    let calls = AtomicI64::new(0);
    MockBackend::spawn(move |req| {
        assert_eq!(req.path, "/api/product-sell/add");
        let n = calls.fetch_add(1, Ordering::SeqCst);
        if Some(n) == fail_at_call {
            return MockReply::error(StatusCode::INTERNAL_SERVER_ERROR, "庫存不足");
        }
        MockReply::created(json!({ "message": "產品銷售記錄新增成功", "id": 101 + n }))
    })
    .await
}

#[tokio::test]
async fn test_product_sell_one_request_per_line() {
    let backend = product_backend(None).await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let report = adapter
        .submit_on(SaleEndpoint::ProductSell, &form(ItemKind::Product), &product_order(), today())
        .await;

    assert_eq!(report.state, SubmissionState::Submitted);
    assert_eq!(adapter.state(), SubmissionState::Submitted);
    assert_eq!(report.created_ids, vec![101, 102]);
    assert_eq!(report.order.grand_total, dec!(1250.00));

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    let first = &requests[0];
    assert_eq!(first.method, Method::POST);
    assert_eq!(first.authorization.as_deref(), Some(format!("Bearer {TEST_TOKEN}").as_str()));
    assert_eq!(first.body["product_id"], 1);
    assert_eq!(first.body["member_id"], 12);
    assert_eq!(first.body["date"], "2024-06-15");
    assert_eq!(first.body["payment_method"], "Cash");
    assert_eq!(first.body["sale_category"], "Sell");
    assert_eq!(first.body["quantity"], 2);
    assert_eq!(first.body["discount_amount"], 38.46);
    assert_eq!(first.body["final_price"], 961.54);
    assert_eq!(first.body["inventory_id"], 88);
    assert_eq!(requests[1].body["discount_amount"], 11.54);
    assert_eq!(requests[1].body["final_price"], 288.46);

    assert_eq!(report.into_result().unwrap(), vec![101, 102]);
}

#[tokio::test]
async fn test_product_sell_partial_failure_keeps_created_rows() {
    let backend = product_backend(Some(1)).await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let report = adapter
        .submit_on(SaleEndpoint::ProductSell, &form(ItemKind::Product), &product_order(), today())
        .await;

    assert_eq!(report.state, SubmissionState::PartiallySubmitted);
    assert_eq!(report.created_ids, vec![101]);
    let failure = report.failure.as_ref().unwrap();
    assert_eq!(failure.index, Some(1));
    assert!(matches!(&failure.error, ClientError::Internal(msg) if msg == "庫存不足"));
    assert_eq!(backend.requests().len(), 2);

    match report.into_result() {
        Err(SaleError::Partial { created, index, .. }) => {
            assert_eq!(created, vec![101]);
            assert_eq!(index, Some(1));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_product_sell_first_line_failure_stops() {
    let backend = product_backend(Some(0)).await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let report = adapter
        .submit_on(SaleEndpoint::ProductSell, &form(ItemKind::Product), &product_order(), today())
        .await;

    assert_eq!(report.state, SubmissionState::Failed);
    assert!(report.created_ids.is_empty());
    assert_eq!(report.failure.as_ref().unwrap().index, Some(0));
    // no further lines after the failure
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn test_validation_blocks_network() {
    let backend = MockBackend::spawn(|_| MockReply::ok(json!({}))).await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let mut form = form(ItemKind::Product);
    form.member_id = None;
    let mut order = product_order();
    order.discount = OrderDiscount::Flat(dec!(5000));

    let report = adapter
        .submit_on(SaleEndpoint::ProductSell, &form, &order, today())
        .await;

    assert_eq!(report.state, SubmissionState::Failed);
    assert!(report.failure.is_none());
    let codes: Vec<_> = report.issues.iter().map(|i| i.code).collect();
    assert_eq!(codes, vec![IssueCode::MissingMember, IssueCode::NegativeGrandTotal]);
    assert!(backend.requests().is_empty());
    assert!(matches!(report.into_result(), Err(SaleError::Rejected(issues)) if issues.len() == 2));
}

#[tokio::test]
async fn test_endpoint_must_match_form_kind() {
    let backend = MockBackend::spawn(|_| MockReply::ok(json!({}))).await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let report = adapter
        .submit_on(SaleEndpoint::TherapySell, &form(ItemKind::Product), &product_order(), today())
        .await;

    assert_eq!(report.state, SubmissionState::Failed);
    assert!(report.issues.iter().any(|i| i.code == IssueCode::UnexpectedItemKind && i.field == "kind"));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_therapy_sell_single_batch() {
    let backend = MockBackend::spawn(|req| {
        assert_eq!(req.path, "/api/therapy-sell/sales");
        MockReply::created(json!({ "success": true, "message": "新增成功", "ids": [7, 8, 9] }))
    })
    .await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let mut form = form(ItemKind::Therapy);
    form.payment_method = "轉帳".to_string();
    form.transfer_code = "12345".to_string();
    form.sale_category = "票卷".to_string();
    let lines = (1..=3)
        .map(|id| LineItem::therapy(id, "體驗課程", dec!(333.33), 1))
        .collect();
    let order = Order::new(lines, OrderDiscount::Percent(dec!(10)));

    let report = adapter
        .submit_on(SaleEndpoint::TherapySell, &form, &order, today())
        .await;

    assert_eq!(report.state, SubmissionState::Submitted);
    assert_eq!(report.created_ids, vec![7, 8, 9]);
    assert_eq!(report.order.total_discount, dec!(100.00));
    let shares: Vec<_> = report.order.lines.iter().map(|l| l.allocated_discount).collect();
    assert_eq!(shares, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    let rows = requests[0].body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["therapy_id"], 1);
    assert_eq!(rows[0]["memberId"], 12);
    assert_eq!(rows[0]["purchaseDate"], "2024-06-15");
    assert_eq!(rows[0]["amount"], 1);
    assert_eq!(rows[0]["paymentMethod"], "Transfer");
    assert_eq!(rows[0]["transferCode"], "12345");
    assert_eq!(rows[0]["saleCategory"], "Ticket");
    assert_eq!(rows[0]["discount"], 10.0);
}

#[tokio::test]
async fn test_therapy_sell_flat_discount_sent_as_percent() {
    let backend = MockBackend::spawn(|_| {
        MockReply::created(json!({ "success": true, "ids": [1] }))
    })
    .await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let order = Order::new(
        vec![LineItem::therapy(4, "臉部護理", dec!(1500), 2)],
        OrderDiscount::Flat(dec!(300)),
    );
    let report = adapter
        .submit_on(SaleEndpoint::TherapySell, &form(ItemKind::Therapy), &order, today())
        .await;

    assert!(report.is_success());
    assert_eq!(backend.requests()[0].body[0]["discount"], 10.0);
}

#[tokio::test]
async fn test_therapy_sell_inexact_flat_discount_blocked() {
    let backend = MockBackend::spawn(|_| {
        MockReply::created(json!({ "success": true, "ids": [1] }))
    })
    .await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    // 100 off 3000 would go out as 3.33% and be priced 99.90 by the backend
    let order = Order::new(
        vec![LineItem::therapy(4, "臉部護理", dec!(1500), 2)],
        OrderDiscount::Flat(dec!(100)),
    );
    let report = adapter
        .submit_on(SaleEndpoint::TherapySell, &form(ItemKind::Therapy), &order, today())
        .await;

    assert_eq!(report.state, SubmissionState::Failed);
    let codes: Vec<_> = report.issues.iter().map(|i| i.code).collect();
    assert_eq!(codes, vec![IssueCode::InvalidDiscount]);
    assert_eq!(report.issues[0].field, "discount");
    assert!(backend.requests().is_empty());

    // the same amount as a percentage goes through
    let order = Order::new(order.lines, OrderDiscount::Percent(dec!(3.33)));
    let report = adapter
        .submit_on(SaleEndpoint::TherapySell, &form(ItemKind::Therapy), &order, today())
        .await;
    assert!(report.is_success());
    assert_eq!(report.order.total_discount, dec!(99.90));
    assert_eq!(backend.requests()[0].body[0]["discount"], 3.33);
}

#[tokio::test]
async fn test_therapy_sell_rejected_batch() {
    let backend = MockBackend::spawn(|_| {
        MockReply::Json(
            StatusCode::BAD_REQUEST,
            json!({ "success": false, "error": "療程套餐不存在" }),
        )
    })
    .await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let order = Order::new(
        vec![LineItem::therapy(99, "不存在", dec!(100), 1)],
        OrderDiscount::default(),
    );
    let report = adapter
        .submit_on(SaleEndpoint::TherapySell, &form(ItemKind::Therapy), &order, today())
        .await;

    assert_eq!(report.state, SubmissionState::Failed);
    let failure = report.failure.as_ref().unwrap();
    assert_eq!(failure.index, None);
    assert!(matches!(&failure.error, ClientError::Validation(msg) if msg == "療程套餐不存在"));
}

#[tokio::test]
async fn test_sales_order_with_mixed_items() {
    let backend = MockBackend::spawn(|req| {
        assert_eq!(req.path, "/api/sales-orders");
        MockReply::created(json!({ "success": true, "order_id": 42, "message": "銷售單新增成功" }))
    })
    .await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let order = Order::new(
        vec![
            LineItem::therapy(1, "臉部護理", dec!(500), 2),
            LineItem::product(2, "保濕面膜", dec!(300), 1),
        ],
        OrderDiscount::Flat(dec!(50)),
    );
    let report = adapter
        .submit_on(SaleEndpoint::SalesOrder, &form(ItemKind::Therapy), &order, today())
        .await;

    assert_eq!(report.state, SubmissionState::Submitted);
    assert_eq!(report.created_ids, vec![42]);
    assert_eq!(report.order.lines[0].allocated_discount, dec!(38.46));
    assert_eq!(report.order.lines[1].allocated_discount, dec!(11.54));

    let body = &backend.requests()[0].body;
    assert_eq!(body["order_date"], "2024-06-15");
    assert_eq!(body["subtotal"], 1300.0);
    assert_eq!(body["total_discount"], 50.0);
    assert_eq!(body["grand_total"], 1250.0);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0]["product_id"].is_null());
    assert_eq!(items[0]["therapy_id"], 1);
    assert_eq!(items[0]["unit"], "堂");
    assert_eq!(items[1]["product_id"], 2);
    assert_eq!(items[1]["item_type"], "Product");
}

#[tokio::test]
async fn test_sales_order_success_false() {
    let backend = MockBackend::spawn(|_| {
        MockReply::ok(json!({ "success": false, "error": "會員不存在" }))
    })
    .await;
    let mut adapter = SubmissionAdapter::new(backend.client());

    let order = Order::new(
        vec![LineItem::product(2, "保濕面膜", dec!(300), 1)],
        OrderDiscount::default(),
    );
    let report = adapter
        .submit_on(SaleEndpoint::SalesOrder, &form(ItemKind::Product), &order, today())
        .await;

    assert_eq!(report.state, SubmissionState::Failed);
    assert!(matches!(
        report.failure.as_ref().map(|f| &f.error),
        Some(ClientError::Backend(msg)) if msg == "會員不存在"
    ));
}
