//! Full debate flow against a mock server.

use arena_core::{HeadlessMatch, MatchError, Phase, SessionError, Winner};
use argubot::Argubot;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn exchange(text: &str, user: u32, bot: u32, remaining: u32, ended: bool) -> serde_json::Value {
    json!({
        "bot_response": text,
        "session_id": "s-flow",
        "user_score": user,
        "bot_score": bot,
        "time_remaining": remaining,
        "game_ended": ended,
        "sources": [],
        "status_update": null
    })
}

const REPORT: &str = "🎭 PERSONALITY ROAST REPORT 🎭\n\n\
    👤 Arguing Persona: \"The Midnight Contrarian\"\n\n\
    🎯 PERSONALITY SUMMARY:\nArgues for sport, not for truth.\n\n\
    🏆 FINAL VERDICT:\nNever wrong, never right, always loud.";

#[tokio::test]
async fn full_session_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_session"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(exchange("Bold claim.", 0, 0, 300, false)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/send_argument"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(exchange("Still wrong.", 1, 1, 240, false)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/end_session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s-flow",
            "final_report": REPORT,
            "final_scores": {"user": 1, "bot": 2},
            "total_time": 300.0
        })))
        .mount(&server)
        .await;

    let mut debate = HeadlessMatch::new(Argubot::new(server.uri()));

    let rebuttal = debate.open("water is not wet").await.unwrap();
    assert_eq!(rebuttal.text, "Bold claim.");
    assert_eq!(debate.phase(), Phase::Active);
    assert_eq!(debate.time_remaining(), 300);

    debate.argue("wetness requires a surface").await.unwrap();
    assert_eq!(debate.scores().player, 1);
    assert_eq!(debate.time_remaining(), 240);

    let outcome = debate.finish().await.unwrap();
    assert_eq!(outcome.winner(), Winner::Bot);
    assert_eq!(
        outcome.report.persona.as_deref(),
        Some("The Midnight Contrarian")
    );
    assert_eq!(debate.phase(), Phase::Ended);
}

#[tokio::test]
async fn failed_exchange_reverts_transcript() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_session"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(exchange("Welcome.", 0, 0, 300, false)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/send_argument"))
        .respond_with(ResponseTemplate::new(500).set_body_string("judge unavailable"))
        .mount(&server)
        .await;

    let mut debate = HeadlessMatch::new(Argubot::new(server.uri()));
    debate.open("opening").await.unwrap();
    let transcript_len = debate.session().transcript().len();

    let error = debate.argue("doomed").await.unwrap_err();
    assert!(matches!(error, MatchError::Api(argubot::Error::Api { status: 500, .. })));

    // The optimistic player entry is gone and the session still accepts
    // arguments.
    assert_eq!(debate.session().transcript().len(), transcript_len);
    assert_eq!(debate.phase(), Phase::Active);
    assert!(!debate.session().is_pending());
}

#[tokio::test]
async fn failed_open_leaves_session_idle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_session"))
        .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
        .mount(&server)
        .await;

    let mut debate = HeadlessMatch::new(Argubot::new(server.uri()));
    assert!(debate.open("opening").await.is_err());
    assert_eq!(debate.phase(), Phase::Idle);
    assert!(debate.session().transcript().is_empty());
}

#[tokio::test]
async fn argue_before_open_is_rejected() {
    let mut debate = HeadlessMatch::new(Argubot::new("http://127.0.0.1:1"));
    let error = debate.argue("premature").await.unwrap_err();
    assert!(matches!(
        error,
        MatchError::Session(SessionError::NotStarted)
    ));
}

#[tokio::test]
async fn server_closed_session_rejects_further_arguments() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/start_session"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(exchange("Welcome.", 0, 0, 300, false)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/send_argument"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(exchange("⏰ Time's up!", 2, 3, 0, true)),
        )
        .mount(&server)
        .await;

    let mut debate = HeadlessMatch::new(Argubot::new(server.uri()));
    debate.open("opening").await.unwrap();
    debate.argue("final word").await.unwrap();

    assert_eq!(debate.phase(), Phase::Overtime);
    let error = debate.argue("too late").await.unwrap_err();
    assert!(matches!(error, MatchError::Session(SessionError::Ended)));
}
