mod common;

use common::TestApp;
use kir_service::services::init_metrics;
use std::sync::Once;

static INIT_METRICS: Once = Once::new();

fn ensure_metrics_initialized() {
    INIT_METRICS.call_once(|| {
        init_metrics();
    });
}

#[tokio::test]
async fn root_reports_backend_alive() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "Backend KIR aktif");
}

#[tokio::test]
async fn hello_returns_static_message() {
    let app = TestApp::spawn().await;

    let body: serde_json::Value = app
        .get("/api/hello")
        .await
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(body["message"], "Halo dari backend API!");
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "kir-service");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn health_check_without_database_is_still_alive() {
    let app = TestApp::spawn_without_store().await;

    let response = app.get("/health").await;
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["database"], "not configured");
}

#[tokio::test]
async fn readiness_follows_store() {
    let app = TestApp::spawn().await;
    assert!(app.get("/ready").await.status().is_success());

    let app = TestApp::spawn_without_store().await;
    assert_eq!(app.get("/ready").await.status(), 503);
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    ensure_metrics_initialized();
    let app = TestApp::spawn().await;

    // Generate at least one recorded request.
    app.get("/api/hello").await;

    let response = app.get("/metrics").await;
    assert!(response.status().is_success());

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");
    assert!(content_type.starts_with("text/plain"));

    let body = response.text().await.expect("Failed to get response body");
    assert!(
        body.is_empty() || body.contains('#') || body.contains('_'),
        "Unexpected metrics format: {}",
        body
    );
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/hello", app.address))
        .header("x-request-id", "req-42")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn cors_mirrors_browser_origin() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/hello", app.address))
        .header("origin", "https://kir.example")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://kir.example"
    );
}
