//! Integration tests for Slice 3 - HTTP API
//!
//! Tests endpoints against a single shared router

use rps_arena::core::create_router;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use futures_util::StreamExt;
use tower::ServiceExt;
use serde_json::Value;
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite};

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn new_session(app: &Router, body: &str) -> String {
    let (status, json) = send(app, "POST", "/session/new", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_create_session_defaults_to_single() {
    let app = create_router();
    let (status, json) = send(&app, "POST", "/session/new", Some("{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["session_id"].is_string());
    assert!(json["websocket_url"].as_str().unwrap().starts_with("/ws/"));
    assert_eq!(json["snapshot"]["mode"], "single");
    assert_eq!(json["snapshot"]["phase"], "AWAITING_PLAYER1");
}

#[tokio::test]
async fn test_session_not_found() {
    let app = create_router();
    let (status, json) = send(&app, "GET", "/session/nonexistent", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");

    let (status, _) = send(&app, "POST", "/session/nonexistent/next", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_mode_rejected() {
    let app = create_router();
    let (status, json) = send(&app, "POST", "/session/new", Some(r#"{"mode": "triple"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_mode");
}

#[tokio::test]
async fn test_two_player_flow() {
    let app = create_router();
    let id = new_session(&app, r#"{"mode": "two_player"}"#).await;

    let (status, json) = send(&app, "POST", &format!("/session/{}/move", id), Some(r#"{"move": "paper"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "AWAITING_PLAYER2");
    assert_eq!(json["player1_move"], Value::Null);
    assert_eq!(json["player1_locked_in"], true);

    let (_, json) = send(&app, "POST", &format!("/session/{}/move", id), Some(r#"{"move": "rock", "seat": "2"}"#)).await;
    assert_eq!(json["phase"], "ROUND_COMPLETE");
    assert_eq!(json["last_outcome"], "player1");
    assert_eq!(json["player1_score"], 1);

    let (_, json) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(json["player1_score"], 1);
    assert_eq!(json["player1_move"], "paper");

    let (_, json) = send(&app, "POST", &format!("/session/{}/next", id), None).await;
    assert_eq!(json["phase"], "AWAITING_PLAYER1");
    assert_eq!(json["player1_score"], 1);
}

#[tokio::test]
async fn test_ignored_move_is_not_an_error() {
    let app = create_router();
    let id = new_session(&app, r#"{"mode": "single", "seed": 3}"#).await;

    let (status, json) = send(
        &app,
        "POST",
        &format!("/session/{}/move", id),
        Some(r#"{"move": "rock", "seat": "player2"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reason"], "R004_IGNORED_SINGLE_MODE");
    assert_eq!(json["phase"], "AWAITING_PLAYER1");
}

#[tokio::test]
async fn test_bad_move_rejected() {
    let app = create_router();
    let id = new_session(&app, "{}").await;

    let (status, json) = send(&app, "POST", &format!("/session/{}/move", id), Some(r#"{"move": "lizard"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_move");
}

#[tokio::test]
async fn test_mode_switch_resets_scores() {
    let app = create_router();
    let id = new_session(&app, r#"{"mode": "two"}"#).await;

    send(&app, "POST", &format!("/session/{}/move", id), Some(r#"{"move": "rock"}"#)).await;
    let (_, json) = send(&app, "POST", &format!("/session/{}/move", id), Some(r#"{"move": "scissors"}"#)).await;
    assert_eq!(json["player1_score"], 1);

    let (status, json) = send(&app, "POST", &format!("/session/{}/mode", id), Some(r#"{"mode": "single"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mode"], "single");
    assert_eq!(json["player1_score"], 0);
    assert_eq!(json["player2_score"], 0);
    assert_eq!(json["phase"], "AWAITING_PLAYER1");
    assert_eq!(json["reason"], "R001_MODE_SELECTED");
}

#[tokio::test]
async fn test_seeded_sessions_match() {
    let app = create_router();
    let a = new_session(&app, r#"{"seed": 11}"#).await;
    let b = new_session(&app, r#"{"seed": 11}"#).await;

    for _ in 0..5 {
        let (_, ja) = send(&app, "POST", &format!("/session/{}/move", a), Some(r#"{"move": "rock"}"#)).await;
        let (_, jb) = send(&app, "POST", &format!("/session/{}/move", b), Some(r#"{"move": "rock"}"#)).await;
        assert_eq!(ja["player2_move"], jb["player2_move"]);
        send(&app, "POST", &format!("/session/{}/next", a), None).await;
        send(&app, "POST", &format!("/session/{}/next", b), None).await;
    }
}

// ============================================================================
// Malformed bodies
// ============================================================================

#[tokio::test]
async fn test_malformed_create_bodies_rejected() {
    let app = create_router();

    let bodies = [
        r#"{"mode": 2}"#,
        r#"{"mode":"two_player""#,
        r#"{"seed":"abc","mode":"two"}"#,
    ];
    for body in bodies {
        let (status, json) = send(&app, "POST", "/session/new", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(json["error"], "invalid_body", "body {}", body);
    }

    // Nothing was created along the way
    let (_, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(json["sessions_active"], 0);
}

#[tokio::test]
async fn test_create_without_content_type_rejected() {
    let app = create_router();
    let request = Request::builder()
        .method("POST")
        .uri("/session/new")
        .body(Body::from(r#"{"mode": "two_player"}"#))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"], "invalid_body");
}

#[tokio::test]
async fn test_malformed_move_body_rejected() {
    let app = create_router();
    let id = new_session(&app, "{}").await;

    let (status, json) = send(&app, "POST", &format!("/session/{}/move", id), Some(r#"{"mv": "rock"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_body");

    let (_, json) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(json["phase"], "AWAITING_PLAYER1");
}

// ============================================================================
// Closing sessions
// ============================================================================

#[tokio::test]
async fn test_close_session() {
    let app = create_router();
    let id = new_session(&app, "{}").await;
    let (_, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(json["sessions_active"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) = send(&app, "GET", &format!("/session/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");

    let (_, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(json["sessions_active"], 0);
}

#[tokio::test]
async fn test_close_unknown_session() {
    let app = create_router();
    let (status, json) = send(&app, "DELETE", "/session/nonexistent", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session_not_found");
}

// ============================================================================
// WebSocket
// ============================================================================

async fn spawn_server(app: &Router) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app.clone();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn next_snapshot<S>(ws: &mut S) -> Value
where
    S: futures_util::Stream<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
{
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for snapshot")
        .expect("socket closed")
        .unwrap();
    serde_json::from_str(&msg.into_text().unwrap()).unwrap()
}

#[tokio::test]
async fn test_websocket_streams_snapshots() {
    let app = create_router();
    let id = new_session(&app, r#"{"mode": "two_player"}"#).await;
    let addr = spawn_server(&app).await;

    let (mut ws, _) = connect_async(format!("ws://{}/ws/{}", addr, id)).await.unwrap();

    let initial = next_snapshot(&mut ws).await;
    assert_eq!(initial["phase"], "AWAITING_PLAYER1");
    assert_eq!(initial["mode"], "two_player");

    let (status, _) = send(&app, "POST", &format!("/session/{}/move", id), Some(r#"{"move": "rock"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let update = next_snapshot(&mut ws).await;
    assert_eq!(update["phase"], "AWAITING_PLAYER2");
    assert_eq!(update["reason"], "R002_PLAYER1_LOCKED_IN");
    assert_eq!(update["player1_move"], Value::Null);

    send(&app, "POST", &format!("/session/{}/move", id), Some(r#"{"move": "paper"}"#)).await;
    let update = next_snapshot(&mut ws).await;
    assert_eq!(update["phase"], "ROUND_COMPLETE");
    assert_eq!(update["last_outcome"], "player2");
    assert_eq!(update["player2_score"], 1);
}

#[tokio::test]
async fn test_websocket_unknown_session() {
    let app = create_router();
    let addr = spawn_server(&app).await;

    match connect_async(format!("ws://{}/ws/unknown", addr)).await {
        Err(tungstenite::Error::Http(response)) => {
            assert_eq!(response.status().as_u16(), 404);
        }
        other => panic!("expected 404, got {:?}", other.map(|(_, resp)| resp.status())),
    }
}
