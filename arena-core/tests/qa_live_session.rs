//! QA tests against a live debate server.
//!
//! These run a real session end to end, including the Claude-backed
//! rebuttals and report generation on the server side.
//!
//! Run with: `ARGUBOT_API_URL=http://localhost:8000 cargo test -p arena-core qa_live_session -- --ignored --nocapture`

use arena_core::{HeadlessMatch, Phase};
use argubot::Argubot;

/// Load environment variables from .env file
fn setup() {
    let _ = dotenvy::dotenv();
}

/// Check if a server URL is configured
fn has_server() -> bool {
    std::env::var("ARGUBOT_API_URL").is_ok()
}

#[tokio::test]
#[ignore]
async fn test_live_health_probe() {
    setup();
    if !has_server() {
        eprintln!("Skipping test: ARGUBOT_API_URL not set");
        return;
    }

    let client = Argubot::from_env();
    let health = client.health().await.expect("health probe failed");
    println!("Service: {} ({})", health.service, health.status);
    assert!(health.is_healthy());
}

#[tokio::test]
#[ignore]
async fn test_live_short_debate() {
    setup();
    if !has_server() {
        eprintln!("Skipping test: ARGUBOT_API_URL not set");
        return;
    }

    println!("\n=== Live debate session ===\n");

    let mut debate = HeadlessMatch::from_env();

    let rebuttal = debate
        .open("pineapple belongs on pizza and that's final")
        .await
        .expect("failed to open session");
    println!("[BOT] {}", rebuttal.display_text());
    assert_eq!(debate.phase(), Phase::Active);
    assert!(debate.time_remaining() > 0);

    let rebuttal = debate
        .argue("sweet and salty is the foundation of half of world cuisine")
        .await
        .expect("failed to send argument");
    println!("[BOT] {}", rebuttal.display_text());
    println!(
        "[SCORE] you {} - {} bot",
        debate.scores().player,
        debate.scores().bot
    );

    let outcome = debate.finish().await.expect("failed to end session");
    let raw_report = outcome.raw_report.clone();
    println!("\n{}", raw_report);
    assert_eq!(debate.phase(), Phase::Ended);
    assert!(!raw_report.is_empty());
}
