//! End-to-end tests of the JSON API against a seeded engine.

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use courier_core::CourierConfig;
use courier_sim::spawn_delivery_engine;
use courier_web::server::RELAY_PATH;
use courier_web::{AppState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_router() -> Router {
    let engine = spawn_delivery_engine(CourierConfig::for_testing()).unwrap();
    build_router(AppState::new(engine))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_submit_reliable_then_view() {
    let router = test_router();

    let (status, body) = send(&router, post_json("/api/reliable", json!({"content": "ping"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert!(body["id"].is_string());

    tokio::time::sleep(Duration::from_millis(200)).await;

    let (status, view) = send(&router, get("/api/channels/tcp")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["messages"][0]["content"], "ping");
    assert_eq!(view["messages"][0]["status"], "delivered");
    assert_eq!(view["messages"][0]["sequence_number"], 1);
    assert_eq!(view["messages"][0]["acknowledged"], true);
    assert_eq!(view["stats"]["messages_sent"], 1);
    assert_eq!(view["stats"]["delivery_rate"], 100);
    assert_eq!(view["in_flight"], 0);
}

#[tokio::test(start_paused = true)]
async fn test_blank_content_is_not_accepted() {
    let router = test_router();

    let (status, body) = send(&router, post_json("/api/unreliable", json!({"content": "  "}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert!(body["id"].is_null());

    let (_, view) = send(&router, get("/api/channels/unreliable")).await;
    assert_eq!(view["messages"].as_array().unwrap().len(), 0);
    assert_eq!(view["stats"]["delivery_rate"], 85);
}

#[tokio::test(start_paused = true)]
async fn test_clear_resets_both_channels() {
    let router = test_router();

    send(&router, post_json("/api/reliable", json!({"content": "a"}))).await;
    send(&router, post_json("/api/unreliable", json!({"content": "b"}))).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let (status, body) = send(&router, post_json("/api/clear", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cleared"], true);

    let (_, views) = send(&router, get("/api/channels")).await;
    assert_eq!(views["reliable"]["messages"].as_array().unwrap().len(), 0);
    assert_eq!(views["reliable"]["stats"]["delivery_rate"], 100);
    assert_eq!(views["unreliable"]["messages"].as_array().unwrap().len(), 0);
    assert_eq!(views["unreliable"]["stats"]["delivery_rate"], 85);
    assert_eq!(views["unreliable"]["stats"]["messages_sent"], 0);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_channel_is_not_found() {
    let router = test_router();

    let (status, body) = send(&router, get("/api/channels/sctp")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("sctp"));
}

#[tokio::test(start_paused = true)]
async fn test_stopped_engine_reports_unavailable() {
    let engine = spawn_delivery_engine(CourierConfig::for_testing()).unwrap();
    engine.shutdown().await.unwrap();
    let router = build_router(AppState::new(engine));

    let (status, _) = send(&router, post_json("/api/reliable", json!({"content": "late"}))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (_, health) = send(&router, get("/api/health")).await;
    assert_eq!(health["status"], "engine_stopped");
}

#[tokio::test]
async fn test_relay_echoes_acknowledgment() {
    let router = test_router();

    let (status, body) = send(&router, post_json(RELAY_PATH, json!({"anything": [1, 2, 3]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Message processed");
    assert!(body["timestamp"].as_i64().unwrap() > 0);

    let response = router.clone().oneshot(get(RELAY_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain"
    );
}
