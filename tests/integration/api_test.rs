//! Integration tests for the REST API.

mod helpers;

use http::StatusCode;
use parley_core::config::AppConfig;
use parley_realtime::OutboundEvent;
use serde_json::json;

#[tokio::test]
async fn test_health_check() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_detailed_health_check() {
    let app = helpers::TestApp::new();
    let (_h, _rx) = app.state.realtime.lifecycle.open(Some("u1".into()));

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["store_backend"], "memory");
    assert_eq!(data["online_users"], 1);
    assert_eq!(data["realtime"]["connections_total"], 1);
}

#[tokio::test]
async fn test_missing_caller_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/messages/users", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_sidebar_excludes_caller() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", "/api/messages/users", None, Some("u1"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["u2", "u3"]);
}

#[tokio::test]
async fn test_send_to_offline_user_persists_for_history() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/messages/send/u1",
            Some(json!({ "text": "hi" })),
            Some("u2"),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["senderId"], "u2");
    assert_eq!(response.body["data"]["receiverId"], "u1");

    let history = app.request("GET", "/api/messages/u2", None, Some("u1")).await;
    assert_eq!(history.status, StatusCode::OK);
    let messages = history.body["data"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["text"], "hi");
}

#[tokio::test]
async fn test_send_to_online_user_pushes_new_message() {
    let app = helpers::TestApp::new();
    let (_h1, mut rx1) = app.state.realtime.lifecycle.open(Some("u1".into()));
    while rx1.try_recv().is_ok() {}

    let response = app
        .request(
            "POST",
            "/api/messages/send/u1",
            Some(json!({ "text": "hi" })),
            Some("u2"),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    match rx1.try_recv() {
        Ok(OutboundEvent::NewMessage(message)) => {
            assert_eq!(message.sender_id.as_str(), "u2");
            assert_eq!(message.text.as_deref(), Some("hi"));
            assert_eq!(
                response.body["data"]["id"],
                json!(message.id.to_string())
            );
        }
        other => panic!("expected newMessage, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_validation_and_unknown_recipient() {
    let app = helpers::TestApp::new();

    let empty = app
        .request("POST", "/api/messages/send/u1", Some(json!({})), Some("u2"))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let too_long = app
        .request(
            "POST",
            "/api/messages/send/u1",
            Some(json!({ "text": "x".repeat(5001) })),
            Some("u2"),
        )
        .await;
    assert_eq!(too_long.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "POST",
            "/api/messages/send/ghost",
            Some(json!({ "text": "hi" })),
            Some("u2"),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_message_ownership() {
    let app = helpers::TestApp::new();
    let sent = app
        .request(
            "POST",
            "/api/messages/send/u1",
            Some(json!({ "text": "oops" })),
            Some("u2"),
        )
        .await;
    let id = sent.body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/messages/delete/{id}");

    let forbidden = app.request("DELETE", &path, None, Some("u1")).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = app.request("DELETE", &path, None, Some("u2")).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("DELETE", &path, None, Some("u2")).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let bad = app
        .request("DELETE", "/api/messages/delete/not-a-uuid", None, Some("u2"))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = helpers::TestApp::new();

    let response = app
        .request_raw("POST", "/api/messages/send/u1", "{\"text\": ", Some("u2"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].is_string());

    let wrong_type = app
        .request_raw("POST", "/api/messages/send/u1", "{\"text\": 42}", Some("u2"))
        .await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_type.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_shipped_config_users_can_message_each_other() {
    let config = AppConfig::load_from("config", "test").unwrap();
    let app = helpers::TestApp::from_config(config).await;
    let (_alice, mut rx) = app.state.realtime.lifecycle.open(Some("alice".into()));
    while rx.try_recv().is_ok() {}

    let sidebar = app
        .request("GET", "/api/messages/users", None, Some("alice"))
        .await;
    assert_eq!(sidebar.status, StatusCode::OK);
    let mut ids: Vec<&str> = sidebar.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["bob", "carol"]);

    let response = app
        .request(
            "POST",
            "/api/messages/send/alice",
            Some(json!({ "text": "hey alice" })),
            Some("bob"),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    match rx.try_recv() {
        Ok(OutboundEvent::NewMessage(message)) => {
            assert_eq!(message.sender_id.as_str(), "bob");
            assert_eq!(message.receiver_id.as_str(), "alice");
        }
        other => panic!("expected newMessage, got {other:?}"),
    }
}

#[tokio::test]
async fn test_presence_endpoint_lists_identified_users_only() {
    let app = helpers::TestApp::new();
    let (_a, _rx_a) = app.state.realtime.lifecycle.open(Some("u2".into()));
    let (_b, _rx_b) = app.state.realtime.lifecycle.open(Some("u1".into()));
    let (_anon, _rx_anon) = app.state.realtime.lifecycle.open(None);

    let response = app.request("GET", "/api/presence/online", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["online"], json!(["u1", "u2"]));
    assert_eq!(response.body["data"]["count"], 2);
}

#[tokio::test]
async fn test_ws_route_requires_upgrade() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/socket?userId=u1", None, None).await;

    assert!(
        response.status == StatusCode::BAD_REQUEST
            || response.status == StatusCode::UPGRADE_REQUIRED
            || response.status == StatusCode::METHOD_NOT_ALLOWED,
        "Expected an upgrade rejection, got {}",
        response.status
    );
    assert!(app.state.realtime.online_users().is_empty());
}
