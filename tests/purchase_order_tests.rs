//! Integration tests for the purchase-order count endpoint.

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn count_is_returned_exactly_as_reported() {
    let platform = MockPlatform::new();
    platform.set_roles(TEST_CALLER, &[]);
    platform.set_count(42);

    let response = get(app(platform.clone()), "/purchase-orders/count").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, json!(42));

    let counts = platform.calls_named("count");
    assert_eq!(counts.len(), 1);
    let Call::Count { doctype } = &counts[0] else {
        panic!()
    };
    assert_eq!(doctype, "Purchase Order");
}

#[tokio::test]
async fn zero_is_a_valid_count() {
    let platform = MockPlatform::new();
    platform.set_roles(TEST_CALLER, &[]);

    let body = body_json(get(app(platform), "/purchase-orders/count").await).await;
    assert_eq!(body, json!(0));
}

#[tokio::test]
async fn platform_failure_propagates_unwrapped() {
    let platform = MockPlatform::new();
    platform.set_roles(TEST_CALLER, &[]);
    platform.fail("count", "Table missing");

    let response = get(app(platform.clone()), "/purchase-orders/count").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // Read path: no diagnostic log write
    assert!(platform.calls_named("log_error").is_empty());
}
