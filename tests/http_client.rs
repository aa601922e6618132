mod common;

use httpmock::prelude::*;
use mini_commerce::checkout::IdempotencyKey;
use mini_commerce::{CommerceError, CreateOrderRequest, StoreApi};
use rust_decimal_macros::dec;
use serde_json::json;

use common::{client_for, envelope};

#[tokio::test]
async fn list_products_unwraps_envelope() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products");
            then.status(200).json_body(envelope(
                "OK",
                json!([
                    {"id": 1, "name": "Widget", "price": 9.99, "stock": 5},
                    {"id": 2, "name": "Gadget", "price": 4.5, "stock": 0}
                ]),
            ));
        })
        .await;

    let products = client_for(&server)
        .list_products()
        .await
        .expect("products should load");

    mock.assert_async().await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].price, dec!(9.99));
    assert!(products[1].is_out_of_stock());
}

#[tokio::test]
async fn list_products_accepts_bare_array() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Widget", "price": 9.99, "stock": 5}
            ]));
        })
        .await;

    let products = client_for(&server).list_products().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Widget");
}

#[tokio::test]
async fn null_product_data_is_an_empty_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products");
            then.status(200).json_body(json!({"status": "OK", "data": null}));
        })
        .await;

    let products = client_for(&server).list_products().await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn create_order_sends_body_and_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/orders")
                .header("content-type", "application/json")
                .header("idempotency-key", "abc-123")
                .json_body(json!({"productId": 1, "quantity": 3}));
            then.status(201)
                .json_body(json!({"orderId": 42, "totalPrice": 29.97}));
        })
        .await;

    let resp = client_for(&server)
        .create_order(
            &CreateOrderRequest {
                product_id: 1,
                quantity: 3,
            },
            &IdempotencyKey::new("abc-123"),
        )
        .await
        .expect("order should be accepted");

    mock.assert_async().await;
    assert_eq!(resp.order_id, 42);
    assert_eq!(resp.total_price, dec!(29.97));
}

async fn get_order_error(status: u16, body: serde_json::Value) -> CommerceError {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/orders/7");
            then.status(status)
                .header("content-type", "application/problem+json")
                .json_body(body);
        })
        .await;

    client_for(&server)
        .get_order(7)
        .await
        .expect_err("non-2xx must fail")
}

#[tokio::test]
async fn problem_detail_wins_over_title() {
    let err = get_order_error(
        404,
        json!({"title": "Not Found", "detail": "Order 7 not found", "status": 404, "path": "/api/orders/7"}),
    )
    .await;

    assert_eq!(err.to_string(), "Order 7 not found");
    assert_eq!(err.user_message(), "Order 7 not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn problem_title_used_without_detail() {
    let err = get_order_error(409, json!({"title": "Conflict", "status": 409})).await;
    assert_eq!(err.user_message(), "Conflict");
}

#[tokio::test]
async fn status_fallback_without_problem_fields() {
    let err = get_order_error(500, json!({"timestamp": "2026-02-06T10:00:00Z"})).await;
    assert_eq!(err.user_message(), "Request failed (status 500)");
}

#[tokio::test]
async fn non_json_error_body_uses_status_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products");
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let err = client_for(&server).list_products().await.unwrap_err();

    match err {
        CommerceError::Request(req) => {
            assert_eq!(req.status, 502);
            assert_eq!(req.message, "Request failed (status 502)");
            assert!(req.problem.is_none());
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_json_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/products");
            then.status(200).body("not json");
        })
        .await;

    let err = client_for(&server).list_products().await.unwrap_err();
    assert!(matches!(err, CommerceError::Json(_)));
}
