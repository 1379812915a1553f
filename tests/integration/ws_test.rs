//! Integration tests for WebSocket presence and message delivery.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{connect, next_event, next_online_set};

#[tokio::test]
async fn test_presence_follows_connect_and_disconnect() {
    let app = helpers::TestApp::new();
    let addr = app.spawn().await;

    let mut u1 = connect(addr, Some("u1")).await;
    assert_eq!(next_online_set(&mut u1).await, vec!["u1"]);

    let mut u2 = connect(addr, Some("u2")).await;
    assert_eq!(next_online_set(&mut u2).await, vec!["u1", "u2"]);
    assert_eq!(next_online_set(&mut u1).await, vec!["u1", "u2"]);

    u1.close(None).await.expect("close failed");
    assert_eq!(next_online_set(&mut u2).await, vec!["u2"]);
}

#[tokio::test]
async fn test_message_is_pushed_to_online_recipient_only() {
    let app = helpers::TestApp::new();
    let addr = app.spawn().await;

    let mut u1 = connect(addr, Some("u1")).await;
    next_online_set(&mut u1).await;
    let mut u3 = connect(addr, Some("u3")).await;
    next_online_set(&mut u3).await;
    next_online_set(&mut u1).await;

    let sent = app
        .request(
            "POST",
            "/api/messages/send/u1",
            Some(json!({ "text": "hi" })),
            Some("u2"),
        )
        .await;
    assert_eq!(sent.status, StatusCode::CREATED);

    let event = next_event(&mut u1).await;
    assert_eq!(event["event"], "newMessage");
    assert_eq!(event["data"]["senderId"], "u2");
    assert_eq!(event["data"]["receiverId"], "u1");
    assert_eq!(event["data"]["text"], "hi");
    assert_eq!(event["data"]["id"], sent.body["data"]["id"]);

    // u3 gets nothing until the next presence change.
    let mut u4 = connect(addr, None).await;
    next_online_set(&mut u4).await;
    u1.close(None).await.expect("close failed");
    assert_eq!(next_online_set(&mut u3).await, vec!["u3"]);
}

#[tokio::test]
async fn test_messages_arrive_in_send_order() {
    let app = helpers::TestApp::new();
    let addr = app.spawn().await;

    let mut u1 = connect(addr, Some("u1")).await;
    next_online_set(&mut u1).await;

    for text in ["one", "two", "three"] {
        let sent = app
            .request(
                "POST",
                "/api/messages/send/u1",
                Some(json!({ "text": text })),
                Some("u2"),
            )
            .await;
        assert_eq!(sent.status, StatusCode::CREATED);
    }

    for expected in ["one", "two", "three"] {
        let event = next_event(&mut u1).await;
        assert_eq!(event["event"], "newMessage");
        assert_eq!(event["data"]["text"], expected);
    }
}

#[tokio::test]
async fn test_anonymous_socket_sees_presence_but_is_not_online() {
    let app = helpers::TestApp::new();
    let addr = app.spawn().await;

    let mut u1 = connect(addr, Some("u1")).await;
    next_online_set(&mut u1).await;

    let mut anon = connect(addr, None).await;
    assert_eq!(next_online_set(&mut anon).await, vec!["u1"]);

    let mut u2 = connect(addr, Some("u2")).await;
    next_online_set(&mut u2).await;
    assert_eq!(next_online_set(&mut anon).await, vec!["u1", "u2"]);

    let response = app.request("GET", "/api/presence/online", None, None).await;
    assert_eq!(response.body["data"]["online"], json!(["u1", "u2"]));
}

#[tokio::test]
async fn test_reconnect_replaces_previous_connection() {
    let app = helpers::TestApp::new();
    let addr = app.spawn().await;

    let mut first = connect(addr, Some("u1")).await;
    next_online_set(&mut first).await;
    let mut second = connect(addr, Some("u1")).await;
    assert_eq!(next_online_set(&mut second).await, vec!["u1"]);
    assert_eq!(next_online_set(&mut first).await, vec!["u1"]);

    app.request(
        "POST",
        "/api/messages/send/u1",
        Some(json!({ "text": "latest" })),
        Some("u2"),
    )
    .await;
    let event = next_event(&mut second).await;
    assert_eq!(event["data"]["text"], "latest");

    // Closing the superseded socket leaves u1 online.
    first.close(None).await.expect("close failed");
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(
        app.state.realtime.online_users(),
        vec![parley_core::Identity::from("u1")]
    );
}
