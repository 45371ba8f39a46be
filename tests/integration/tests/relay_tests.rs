//! Relay Integration Tests
//!
//! Each test starts its own gateway on an ephemeral port and talks to it
//! over real WebSocket connections.
//!
//! Run with: cargo test -p integration-tests --test relay_tests

use std::time::Duration;

use chat_common::{AppConfig, HeartbeatConfig};
use integration_tests::TestServer;
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_root_path_accepts_websocket() {
    let server = TestServer::start().await.unwrap();
    let url = format!("ws://{}/", server.addr);

    let (_stream, response) = tokio_tungstenite::connect_async(url).await.unwrap();
    assert_eq!(response.status().as_u16(), 101);
}

// ============================================================================
// Username Tests
// ============================================================================

#[tokio::test]
async fn test_set_username_broadcasts_connected_then_list() {
    let server = TestServer::start().await.unwrap();
    let mut alice = server.connect().await.unwrap();
    let mut observer = server.connect().await.unwrap();

    alice
        .emit("setUsername", json!({ "username": "Alice" }))
        .await
        .unwrap();

    for client in [&mut alice, &mut observer] {
        let connected = client.recv().await.unwrap();
        assert_eq!(connected["event"], "userConnected");
        assert_eq!(connected["data"]["username"], "Alice");

        let alice_id = connected["data"]["userId"].as_str().unwrap().to_owned();

        let list = client.recv().await.unwrap();
        assert_eq!(list["event"], "userList");
        assert_eq!(list["data"]["users"], json!({ alice_id: "Alice" }));
    }
}

#[tokio::test]
async fn test_default_name_uses_registry_size() {
    let server = TestServer::start().await.unwrap();
    let mut first = server.connect().await.unwrap();
    let mut second = server.connect().await.unwrap();

    first.set_username("Alice").await.unwrap();
    second.drain().await.unwrap();

    second.emit("setUsername", json!({})).await.unwrap();
    let connected = second.recv_event("userConnected").await.unwrap();
    assert_eq!(connected["data"]["username"], "Usuario 2");
}

#[tokio::test]
async fn test_empty_username_gets_default() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client
        .emit("setUsername", json!({ "username": "" }))
        .await
        .unwrap();
    let connected = client.recv_event("userConnected").await.unwrap();
    assert_eq!(connected["data"]["username"], "Usuario 1");
}

#[tokio::test]
async fn test_rename_broadcasts_again() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    let id = client.set_username("Alice").await.unwrap();
    client
        .emit("setUsername", json!({ "username": "Alicia" }))
        .await
        .unwrap();

    let connected = client.recv().await.unwrap();
    assert_eq!(connected["event"], "userConnected");
    assert_eq!(connected["data"]["username"], "Alicia");

    let list = client.recv().await.unwrap();
    assert_eq!(list["data"]["users"], json!({ id: "Alicia" }));
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_unnamed_message_has_no_sender() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect().await.unwrap();
    let mut b = server.connect().await.unwrap();

    a.set_username("Bob").await.unwrap();
    b.drain().await.unwrap();

    b.emit("message", json!("hello")).await.unwrap();

    for client in [&mut a, &mut b] {
        let frame = client.recv().await.unwrap();
        assert_eq!(frame, json!({ "event": "message", "data": { "data": "hello" } }));
    }
}

#[tokio::test]
async fn test_named_message_carries_sender() {
    let server = TestServer::start().await.unwrap();
    let mut a = server.connect().await.unwrap();
    let mut b = server.connect().await.unwrap();

    a.set_username("Alice").await.unwrap();
    b.drain().await.unwrap();

    a.emit("message", json!({ "text": "hi", "n": 1 }))
        .await
        .unwrap();

    let frame = b.recv().await.unwrap();
    assert_eq!(frame["event"], "message");
    assert_eq!(frame["data"]["data"], json!({ "text": "hi", "n": 1 }));
    assert_eq!(frame["data"]["from"], "Alice");
}

// ============================================================================
// Private Message Tests
// ============================================================================

#[tokio::test]
async fn test_private_message_reaches_only_target() {
    let server = TestServer::start().await.unwrap();
    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();
    let mut carol = server.connect().await.unwrap();

    alice.set_username("Alice").await.unwrap();
    let bob_id = bob.set_username("Bob").await.unwrap();
    alice.drain().await.unwrap();
    bob.drain().await.unwrap();
    carol.drain().await.unwrap();

    alice
        .emit("privateMessage", json!({ "to": bob_id, "message": "hi" }))
        .await
        .unwrap();

    let frame = bob.recv().await.unwrap();
    assert_eq!(
        frame,
        json!({ "event": "privateMessage", "data": { "data": "hi", "from": "Alice" } })
    );

    alice.expect_silence().await.unwrap();
    carol.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_private_message_to_unknown_target_is_dropped() {
    let server = TestServer::start().await.unwrap();
    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();

    alice.set_username("Alice").await.unwrap();
    bob.drain().await.unwrap();

    alice
        .emit("privateMessage", json!({ "to": "nobody", "message": "hi" }))
        .await
        .unwrap();

    alice.expect_silence().await.unwrap();
    bob.expect_silence().await.unwrap();

    // Connection stays usable
    alice.emit("message", json!("still here")).await.unwrap();
    let frame = bob.recv_event("message").await.unwrap();
    assert_eq!(frame["data"]["data"], "still here");
}

// ============================================================================
// Disconnect Tests
// ============================================================================

#[tokio::test]
async fn test_disconnect_broadcasts_removal() {
    let server = TestServer::start().await.unwrap();
    let mut alice = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();

    let alice_id = alice.set_username("Alice").await.unwrap();
    let bob_id = bob.set_username("Bob").await.unwrap();
    bob.drain().await.unwrap();

    alice.close().await.unwrap();

    let gone = bob.recv().await.unwrap();
    assert_eq!(gone["event"], "userDisconnected");
    assert_eq!(gone["data"]["username"], "Alice");
    assert_eq!(gone["data"]["userId"], alice_id);

    let list = bob.recv().await.unwrap();
    assert_eq!(list["event"], "userList");
    assert_eq!(list["data"]["users"], json!({ bob_id: "Bob" }));
}

#[tokio::test]
async fn test_unnamed_disconnect_omits_username() {
    let server = TestServer::start().await.unwrap();
    let ghost = server.connect().await.unwrap();
    let mut bob = server.connect().await.unwrap();

    ghost.close().await.unwrap();

    let gone = bob.recv_event("userDisconnected").await.unwrap();
    assert!(gone["data"].get("username").is_none());
    assert!(gone["data"]["userId"].is_string());

    let list = bob.recv().await.unwrap();
    assert_eq!(list["data"]["users"], json!({}));
}

// ============================================================================
// Robustness Tests
// ============================================================================

#[tokio::test]
async fn test_garbage_frames_are_ignored() {
    let server = TestServer::start().await.unwrap();
    let mut client = server.connect().await.unwrap();

    client.send_raw("not json").await.unwrap();
    client.send_raw(r#"{"event":"nope","data":1}"#).await.unwrap();
    client.send_raw(r#"{"event":"userList","data":{}}"#).await.unwrap();
    client.expect_silence().await.unwrap();

    client.emit("message", json!("ok")).await.unwrap();
    let frame = client.recv_event("message").await.unwrap();
    assert_eq!(frame["data"]["data"], "ok");
}

// ============================================================================
// Heartbeat Tests
// ============================================================================

/// Pings every 100ms, idle connections close after 400ms
fn fast_heartbeat() -> AppConfig {
    AppConfig {
        heartbeat: HeartbeatConfig {
            ping_interval_ms: 100,
            ping_timeout_ms: 300,
        },
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn test_silent_connection_is_closed() {
    let server = TestServer::start_with_config(fast_heartbeat()).await.unwrap();
    let mut watcher = server.connect().await.unwrap();
    let mut silent = server.connect().await.unwrap();

    let silent_id = silent.set_username("Quiet").await.unwrap();

    // `silent` never reads again, so it never answers a ping
    let gone = watcher.recv_event("userDisconnected").await.unwrap();
    assert_eq!(gone["data"]["userId"], silent_id);
    assert_eq!(gone["data"]["username"], "Quiet");

    let list = watcher.recv().await.unwrap();
    assert_eq!(list["event"], "userList");
    assert_eq!(list["data"]["users"], json!({}));

    drop(silent);
}

#[tokio::test]
async fn test_active_connection_survives_idle_timeout() {
    let server = TestServer::start_with_config(fast_heartbeat()).await.unwrap();
    let mut client = server.connect().await.unwrap();

    let frames = client.stay_active(Duration::from_secs(1)).await.unwrap();
    assert!(frames.is_empty(), "unexpected frames: {frames:?}");

    client.emit("message", json!("alive")).await.unwrap();
    let frame = client.recv_event("message").await.unwrap();
    assert_eq!(frame["data"]["data"], "alive");
}
