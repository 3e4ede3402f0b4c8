use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use boxing_mood::{
    create_router,
    services::{LoggingTransport, MediaCommand, MemoryStore},
    state::{AppState, ThemeStore, TimerConfig, TimerEngine},
};

fn test_app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        TimerEngine::new(TimerConfig::new(2, 3, 2, 0, 1)),
        ThemeStore::load(Box::new(MemoryStore::new())),
    ));
    let router = create_router(Arc::clone(&state));
    (state, router)
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => Request::builder().method(method).uri(uri).body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_timer_runs_through_phases() {
    let (state, router) = test_app();

    let (status, body) = send(&router, Method::GET, "/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["display"], "00:03");
    assert_eq!(body["status"], "paused");

    let (_, body) = send(&router, Method::POST, "/timer/start", None).await;
    assert_eq!(body["status"], "running");

    // idle -> round 1, countdown, then rest
    for _ in 0..5 {
        state.tick_timer().unwrap();
    }
    let (_, body) = send(&router, Method::GET, "/timer", None).await;
    assert_eq!(body["timer"]["phase"], "resting");
    assert_eq!(body["timer"]["seconds_remaining"], 2);
    assert_eq!(body["timer"]["title"], "REST");

    let (_, body) = send(&router, Method::POST, "/timer/reset", None).await;
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["current_round"], 1);
    assert_eq!(body["timer"]["is_running"], false);
}

#[tokio::test]
async fn test_configure_respects_running_countdown() {
    let (state, router) = test_app();
    send(&router, Method::POST, "/timer/start", None).await;
    state.tick_timer().unwrap();
    state.tick_timer().unwrap();

    let config = json!({
        "rounds": 4,
        "round_duration_seconds": 60,
        "rest_duration_seconds": 30,
        "prepare_duration_seconds": 0,
        "warning_threshold_seconds": 5
    });
    let (status, body) = send(&router, Method::PUT, "/timer/config", Some(config)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "in_round");
    assert_eq!(body["timer"]["seconds_remaining"], 2);
    assert_eq!(body["timer"]["config"]["rounds"], 4);

    send(&router, Method::POST, "/timer/pause", None).await;
    let (_, body) = send(
        &router,
        Method::PATCH,
        "/timer/config/round",
        Some(json!({"minutes": 2, "seconds": 15})),
    )
    .await;
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["seconds_remaining"], 135);
    assert_eq!(body["timer"]["display"], "02:15");
}

#[tokio::test]
async fn test_profiles() {
    let (_, router) = test_app();

    let (_, body) = send(&router, Method::GET, "/profiles", None).await;
    assert_eq!(body["profiles"].as_array().unwrap().len(), 4);
    assert_eq!(body["profiles"][0]["name"], "Boxing");

    let (status, body) = send(&router, Method::POST, "/profiles/MMA", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["config"]["round_duration_seconds"], 300);
    assert_eq!(body["timer"]["seconds_remaining"], 300);

    let (status, _) = send(&router, Method::POST, "/profiles/Fencing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_theme_lifecycle() {
    let (_, router) = test_app();

    let (_, body) = send(&router, Method::GET, "/themes", None).await;
    assert_eq!(body["selected"], "Default");
    assert_eq!(body["builtin_count"], 2);
    assert_eq!(body["themes"][1]["name"], "Midnight");

    let (status, body) = send(&router, Method::POST, "/themes", Some(json!({"copy_from": "Midnight"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["theme"]["name"], "New Theme");
    assert_eq!(body["theme"]["primaryHex"], "FF0A84FF");

    let (_, body) = send(&router, Method::POST, "/themes", None).await;
    assert_eq!(body["theme"]["name"], "New Theme 2");

    let (status, _) = send(&router, Method::POST, "/themes", Some(json!({"copy_from": "Nope"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&router, Method::POST, "/themes/select/Unknown", None).await;
    assert_eq!(body["theme"]["name"], "New Theme 2");

    let (_, body) = send(&router, Method::DELETE, "/themes", Some(json!({"indices": [3]}))).await;
    assert_eq!(body["removed"], json!(["New Theme 2"]));
    assert_eq!(body["selected"], "Default");

    let (_, body) = send(&router, Method::GET, "/themes/current", None).await;
    assert_eq!(body["theme"]["name"], "Default");
}

#[tokio::test]
async fn test_theme_export_and_import() {
    let (_, router) = test_app();
    send(&router, Method::POST, "/themes", None).await;

    let (status, exported) = send(&router, Method::GET, "/themes/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exported.as_array().unwrap().len(), 3);

    // everything collides with what is already there
    let (_, body) = send(&router, Method::POST, "/themes/import", Some(exported)).await;
    assert_eq!(body["added"], 0);

    let incoming = json!([{
        "name": "Ember",
        "primaryHex": "#F60",
        "secondaryHex": "FFAA00",
        "backgroundHex": "FF120800",
        "textHex": "FFFFFF",
        "cardBackgroundHex": "80000000",
        "cardBorderHex": "33FFFFFF"
    }]);
    let (_, body) = send(&router, Method::POST, "/themes/import", Some(incoming)).await;
    assert_eq!(body["added"], 1);

    let (_, body) = send(&router, Method::GET, "/themes", None).await;
    assert_eq!(body["themes"][3]["name"], "Ember");
    assert_eq!(body["themes"][3]["primaryHex"], "FFFF6600");

    let (status, body) = send(&router, Method::POST, "/themes/import", Some(json!("garbage"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["added"], 0);
}

#[tokio::test]
async fn test_biometrics_and_media() {
    let transport = Arc::new(LoggingTransport::new());
    let state = Arc::new(
        AppState::new(
            0,
            "127.0.0.1".to_string(),
            TimerEngine::default(),
            ThemeStore::load(Box::new(MemoryStore::new())),
        )
        .with_media(transport.clone()),
    );
    let router = create_router(state);

    let reading = json!({"heart_rate": 151.0, "active_calories": 420.5, "workout_active": true});
    let (status, _) = send(&router, Method::POST, "/biometrics", Some(reading)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&router, Method::GET, "/biometrics", None).await;
    assert_eq!(body["heart_rate"], 151.0);

    let (status, _) = send(
        &router,
        Method::POST,
        "/media",
        Some(json!({"command": "seek", "position_seconds": 30.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(transport.last_command(), Some(MediaCommand::Seek { position_seconds: 30.0 }));

    let (_, body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(body["biometrics"]["active_calories"], 420.5);
    assert_eq!(body["last_action"], "media");
    assert_eq!(body["selected_theme"], "Default");
}

#[tokio::test]
async fn test_health() {
    let (_, router) = test_app();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
