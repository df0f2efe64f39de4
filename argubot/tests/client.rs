//! Client round-trip tests against a mock server.

use argubot::{Argubot, Error};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn exchange_body(session_id: &str, time_remaining: u32) -> serde_json::Value {
    json!({
        "bot_response": "I dare say that is most preposterous.",
        "session_id": session_id,
        "user_score": 0,
        "bot_score": 1,
        "time_remaining": time_remaining,
        "game_ended": false,
        "sources": [
            {
                "title": "Encyclopedia entry",
                "link": "https://example.com/entry",
                "snippet": "Contrary evidence."
            }
        ],
        "status_update": "The bot is ahead 1-0!"
    })
}

#[tokio::test]
async fn start_session_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_session"))
        .and(body_json(json!({"message": "pineapple belongs on pizza"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(exchange_body("s-1", 300)))
        .expect(1)
        .mount(&server)
        .await;

    let client = Argubot::new(server.uri());
    let response = client
        .start_session("pineapple belongs on pizza")
        .await
        .unwrap();

    assert_eq!(response.session_id, "s-1");
    assert_eq!(response.time_remaining, 300);
    assert_eq!(response.sources.len(), 1);
    assert_eq!(response.sources[0].link, "https://example.com/entry");
    assert_eq!(response.status_update.as_deref(), Some("The bot is ahead 1-0!"));
}

#[tokio::test]
async fn send_argument_includes_session_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send_argument"))
        .and(body_json(json!({"message": "no it doesn't", "session_id": "s-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(exchange_body("s-1", 240)))
        .expect(1)
        .mount(&server)
        .await;

    let client = Argubot::new(server.uri());
    let response = client.send_argument("s-1", "no it doesn't").await.unwrap();

    assert_eq!(response.time_remaining, 240);
    assert_eq!(response.bot_score, 1);
}

#[tokio::test]
async fn end_session_returns_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/end_session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s-1",
            "final_report": "PERSONALITY ROAST REPORT",
            "final_scores": {"user": 2, "bot": 3},
            "total_time": 305.2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Argubot::new(server.uri());
    let summary = client.end_session("s-1").await.unwrap();

    assert_eq!(summary.session_id, "s-1");
    assert_eq!(summary.final_scores.bot, 3);
    assert!(summary.final_report.contains("ROAST"));
}

#[tokio::test]
async fn server_error_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/send_argument"))
        .respond_with(ResponseTemplate::new(400).set_body_string("No active session"))
        .mount(&server)
        .await;

    let client = Argubot::new(server.uri());
    let error = client.send_argument("stale", "hello").await.unwrap_err();

    match error {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("No active session"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_session"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = Argubot::new(server.uri());
    let error = client.start_session("hello").await.unwrap_err();
    assert!(matches!(error, Error::Parse(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Port 1 is reserved and should refuse connections immediately.
    let client = Argubot::new("http://127.0.0.1:1");
    let error = client.health().await.unwrap_err();
    assert!(matches!(error, Error::Network(_)));
}

#[tokio::test]
async fn health_probe() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "Sir Interruptsalot API"
        })))
        .mount(&server)
        .await;

    let client = Argubot::new(server.uri());
    let health = client.health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.service, "Sir Interruptsalot API");
}
