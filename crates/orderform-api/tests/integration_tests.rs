//! # Integration Tests for orderform-api
//!
//! Drives the assembled router end to end: the form page, per-field
//! feedback, JSON and url-encoded submission under both validation
//! strategies, and OpenAPI generation. A recording sink stands in for the
//! downstream order consumer.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use orderform_api::state::{AppConfig, AppState, ValidationStrategy};
use orderform_core::{Color, OrderPayload};

type Received = Arc<Mutex<Vec<OrderPayload>>>;

/// Helper: build the app with a sink that records every delivered order.
fn test_app(strategy: ValidationStrategy) -> (axum::Router, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let log = received.clone();
    let config = AppConfig {
        strategy,
        ..AppConfig::default()
    };
    let state = AppState::try_new(
        config,
        Arc::new(move |order: OrderPayload| log.lock().unwrap().push(order)),
    )
    .unwrap();
    (orderform_api::app(state), received)
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn bob() -> Value {
    json!({
        "firstName": "Bob",
        "lastName": "Johnson",
        "email": "bob@johnson.com",
        "color": "blue",
        "quantity": "5"
    })
}

// -- Health & page ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_endpoint() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let response = app.oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_form_page_renders_all_controls() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<form method=\"post\" action=\"/orders\">"));
    for name in ["firstName", "lastName", "email", "color", "quantity"] {
        assert!(html.contains(&format!("name=\"{name}\"")), "missing {name}");
    }
    assert!(html.contains("<option value=\"red\" selected>Red</option>"));
}

// -- Field feedback -----------------------------------------------------------

#[tokio::test]
async fn test_form_snapshot_starts_with_valid_red() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let body = body_json(app.oneshot(get("/v1/form")).await.unwrap()).await;
    assert_eq!(body["state"]["color"]["value"], "red");
    assert_eq!(body["state"]["color"]["valid"], true);
    assert_eq!(body["state"]["email"]["valid"], false);
    assert_eq!(body["colors"], json!(["red", "blue", "green"]));
    assert_eq!(body["quantityMax"], 5);
    assert_eq!(body["strategy"], "per-field");
}

#[tokio::test]
async fn test_validate_email_field() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/fields/email/validate",
            json!({ "value": "bob@johnson.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["status"], "valid");

    let body = body_json(
        app.oneshot(post_json(
            "/v1/fields/email/validate",
            json!({ "value": "some invalid email" }),
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["status"], "invalid");
}

#[tokio::test]
async fn test_validate_quantity_upper_bound() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let body = body_json(
        app.oneshot(post_json(
            "/v1/fields/quantity/validate",
            json!({ "value": "6" }),
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(body["field"], "quantity");
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn test_validate_empty_value_reports_empty() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let body = body_json(
        app.oneshot(post_json(
            "/v1/fields/firstName/validate",
            json!({ "value": "" }),
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["status"], "empty");
}

#[tokio::test]
async fn test_validate_unknown_field_is_404() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let response = app
        .oneshot(post_json("/v1/fields/zip/validate", json!({ "value": "x" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_validate_malformed_body_is_422() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let response = app
        .oneshot(post_json("/v1/fields/email/validate", json!({ "val": 1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// -- JSON orders --------------------------------------------------------------

#[tokio::test]
async fn test_valid_order_is_delivered_once() {
    let (app, received) = test_app(ValidationStrategy::PerField);
    let response = app.oneshot(post_json("/v1/orders", bob())).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(
        body["order"],
        json!({
            "firstName": "Bob",
            "lastName": "Johnson",
            "email": "bob@johnson.com",
            "color": "blue",
            "quantity": 5
        })
    );
    assert!(body["orderId"].is_string());

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].color, Color::Blue);
    assert_eq!(received[0].quantity, 5);
}

#[tokio::test]
async fn test_invalid_email_is_rejected_without_delivery() {
    let (app, received) = test_app(ValidationStrategy::PerField);
    let mut order = bob();
    order["email"] = json!("some invalid email");
    let response = app.oneshot(post_json("/v1/orders", order)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "ORDER_REJECTED");
    assert_eq!(body["error"]["details"]["invalidFields"], json!(["email"]));
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_numeric_quantity_is_accepted() {
    let (app, received) = test_app(ValidationStrategy::PerField);
    let mut order = bob();
    order["quantity"] = json!(3);
    let response = app.oneshot(post_json("/v1/orders", order)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(received.lock().unwrap()[0].quantity, 3);
}

#[tokio::test]
async fn test_empty_submission_lists_every_required_field() {
    let (app, received) = test_app(ValidationStrategy::PerField);
    let response = app.oneshot(post_json("/v1/orders", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    // Color keeps its mount default, so only the text fields are missing.
    assert_eq!(
        body["error"]["details"]["invalidFields"],
        json!(["firstName", "lastName", "email", "quantity"])
    );
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_object_body_is_422() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let response = app
        .oneshot(post_json("/v1/orders", json!(["Bob"])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_schema_strategy_accepts_and_rejects() {
    let (app, received) = test_app(ValidationStrategy::Schema);
    let response = app
        .clone()
        .oneshot(post_json("/v1/orders", bob()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let mut order = bob();
    order["quantity"] = json!("0");
    order["color"] = json!("purple");
    let response = app.oneshot(post_json("/v1/orders", order)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(
        body["error"]["details"]["invalidFields"],
        json!(["color", "quantity"])
    );

    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_schema_strategy_rejects_unknown_keys() {
    let (app, received) = test_app(ValidationStrategy::Schema);
    let mut order = bob();
    order["coupon"] = json!("FREE");
    let response = app.oneshot(post_json("/v1/orders", order)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(received.lock().unwrap().is_empty());
}

// -- Page submission ----------------------------------------------------------

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/orders")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_page_submission_shows_receipt() {
    let (app, received) = test_app(ValidationStrategy::PerField);
    let response = app
        .oneshot(post_form(
            "firstName=Bob&lastName=Johnson&email=bob%40johnson.com&color=blue&quantity=5",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let html = body_string(response).await;
    assert!(html.contains("Thanks, Bob!"));
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_page_submission_redisplays_invalid_form() {
    let (app, received) = test_app(ValidationStrategy::PerField);
    let response = app
        .oneshot(post_form(
            "firstName=Bob&lastName=Johnson&email=nope&color=blue&quantity=5",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Please check: Email"));
    assert!(html.contains("value=\"nope\" aria-invalid=\"true\""));
    assert!(html.contains("value=\"Bob\""));
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_page_submission_with_unknown_key_redisplays_form() {
    let (app, received) = test_app(ValidationStrategy::PerField);
    let response = app
        .oneshot(post_form(
            "firstName=Bob&lastName=Johnson&email=bob%40johnson.com&color=blue&quantity=5&coupon=FREE",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"), "{content_type}");
    let html = body_string(response).await;
    assert!(html.contains("<p role=\"alert\">unknown form field: &quot;coupon&quot;</p>"));
    assert!(html.contains("<form method=\"post\" action=\"/orders\">"));
    assert!(html.contains("value=\"Bob\""));
    assert!(received.lock().unwrap().is_empty());
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_lists_routes() {
    let (app, _) = test_app(ValidationStrategy::PerField);
    let response = app.oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"]["/v1/orders"]["post"].is_object());
    assert!(body["paths"]["/v1/fields/{field}/validate"]["post"].is_object());
}
