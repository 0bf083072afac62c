//! Health check integration tests for dashboard-service.

mod common;

use common::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "dashboard-service");

    app.cleanup().await;
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/ready").await;
    assert!(response.status().is_success());

    app.cleanup().await;
}

#[tokio::test]
async fn metrics_endpoint_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/metrics").await;

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap_or("").contains("text/plain"))
        .unwrap_or(false));

    app.cleanup().await;
}

#[tokio::test]
async fn request_id_is_echoed_back() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/health", app.http_address))
        .header("x-request-id", "dashboard-test-123")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("dashboard-test-123")
    );
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );

    app.cleanup().await;
}

#[tokio::test]
async fn data_routes_reject_post() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/seed", app.http_address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    assert!(!app.table_exists("users").await);

    app.cleanup().await;
}

#[tokio::test]
async fn health_check_reports_unhealthy_when_database_is_down() {
    let app = TestApp::spawn().await;
    app.app_db.pool().close().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["service"], "dashboard-service");
    assert!(body["error"].is_string());

    app.cleanup().await;
}

#[tokio::test]
async fn readiness_check_fails_when_database_is_down() {
    let app = TestApp::spawn().await;
    app.app_db.pool().close().await;

    let response = app.get("/ready").await;
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    app.cleanup().await;
}

#[tokio::test]
async fn http_request_metrics_are_exported() {
    let app = TestApp::spawn().await;
    assert!(app.get("/health").await.status().is_success());

    let body = app.get("/metrics").await.text().await.unwrap();
    assert!(body.contains("http_requests_total"));
    assert!(body.contains("path=\"/health\""));
    assert!(body.contains("http_request_duration_seconds"));

    app.cleanup().await;
}

#[tokio::test]
async fn shutdown_stops_accepting_connections() {
    let mut app = TestApp::spawn().await;
    assert!(app.get("/health").await.status().is_success());

    app.shutdown().await.expect("Server did not stop cleanly");

    let result = app
        .client
        .get(format!("{}/health", app.http_address))
        .send()
        .await;
    assert!(result.is_err());

    app.cleanup().await;
}
