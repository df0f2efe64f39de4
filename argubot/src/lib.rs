//! Minimal client for the Sir Interruptsalot debate API.
//!
//! The remote service does all the substantive work (argument generation,
//! round judging, scoring, report writing); this crate is a focused JSON
//! client for its session endpoints:
//! - `POST /start_session` - open a debate with an opening statement
//! - `POST /send_argument` - submit one argument, get the rebuttal
//! - `POST /end_session` - close the debate and fetch the final report
//! - `GET /health` - connectivity probe

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Errors that can occur when talking to the debate API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Debate API client.
#[derive(Clone)]
pub struct Argubot {
    client: reqwest::Client,
    base_url: String,
}

impl Argubot {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `ARGUBOT_API_URL` environment variable,
    /// falling back to the local development server.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("ARGUBOT_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// The base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the service health endpoint.
    pub async fn health(&self) -> Result<Health, Error> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        response.json().await.map_err(|e| Error::Parse(e.to_string()))
    }

    /// Open a new debate session with the player's opening statement.
    ///
    /// The response carries the bot's first rebuttal, the server-issued
    /// session id, and the initial clock value.
    pub async fn start_session(&self, opening_statement: &str) -> Result<ArgumentResponse, Error> {
        debug!("starting session");
        self.post(
            "start_session",
            &ArgumentRequest {
                message: opening_statement.to_string(),
                session_id: None,
            },
        )
        .await
    }

    /// Submit one argument in an active session and get the rebuttal.
    pub async fn send_argument(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<ArgumentResponse, Error> {
        debug!(session_id, "sending argument");
        self.post(
            "send_argument",
            &ArgumentRequest {
                message: message.to_string(),
                session_id: Some(session_id.to_string()),
            },
        )
        .await
    }

    /// Close the session and fetch the final scores and personality report.
    pub async fn end_session(&self, session_id: &str) -> Result<SessionSummary, Error> {
        debug!(session_id, "ending session");
        self.post(
            "end_session",
            &ArgumentRequest {
                message: String::new(),
                session_id: Some(session_id.to_string()),
            },
        )
        .await
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        request: &ArgumentRequest,
    ) -> Result<T, Error> {
        let response = self
            .client
            .post(format!("{}/{endpoint}", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        response.json().await.map_err(|e| Error::Parse(e.to_string()))
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Request body shared by all session endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ArgumentRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// One exchange from the server: the bot's rebuttal plus session state.
#[derive(Debug, Clone, Deserialize)]
pub struct ArgumentResponse {
    /// The bot's rebuttal text. May embed `[SOURCE: <url>]` markers.
    pub bot_response: String,
    /// Server-issued session identifier.
    pub session_id: String,
    /// Rounds won by the player so far.
    pub user_score: u32,
    /// Rounds won by the bot so far.
    pub bot_score: u32,
    /// Seconds left on the server's session clock.
    pub time_remaining: u32,
    /// True when the server has closed the session (time expired).
    pub game_ended: bool,
    /// Web citations backing the rebuttal.
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Server-generated scoreboard commentary.
    #[serde(default)]
    pub status_update: Option<String>,
}

/// A web citation backing part of a rebuttal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// Final state returned when a session is closed.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    /// Semi-structured personality report text.
    pub final_report: String,
    pub final_scores: FinalScores,
    /// Wall-clock length of the session in seconds.
    pub total_time: f64,
}

/// Final score pair.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FinalScores {
    pub user: u32,
    pub bot: u32,
}

/// Health probe response.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl Health {
    /// Whether the service reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" || self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trimmed() {
        let client = Argubot::new("http://example.com/api/");
        assert_eq!(client.base_url(), "http://example.com/api");
    }

    #[test]
    fn test_request_omits_missing_session_id() {
        let request = ArgumentRequest {
            message: "cats are better than dogs".to_string(),
            session_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message"], "cats are better than dogs");
        assert!(json.get("session_id").is_none());
    }

    #[test]
    fn test_request_includes_session_id() {
        let request = ArgumentRequest {
            message: "no".to_string(),
            session_id: Some("abc-123".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["session_id"], "abc-123");
    }

    #[test]
    fn test_response_defaults() {
        // The sources list and status update are optional on the wire.
        let json = r#"{
            "bot_response": "That's cap, bestie.",
            "session_id": "abc-123",
            "user_score": 1,
            "bot_score": 2,
            "time_remaining": 240,
            "game_ended": false
        }"#;
        let response: ArgumentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.session_id, "abc-123");
        assert_eq!(response.user_score, 1);
        assert_eq!(response.bot_score, 2);
        assert!(response.sources.is_empty());
        assert!(response.status_update.is_none());
        assert!(!response.game_ended);
    }

    #[test]
    fn test_summary_deserializes() {
        let json = r#"{
            "session_id": "abc-123",
            "final_report": "PERSONALITY ROAST REPORT",
            "final_scores": {"user": 3, "bot": 2},
            "total_time": 301.5
        }"#;
        let summary: SessionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.final_scores.user, 3);
        assert_eq!(summary.final_scores.bot, 2);
        assert!(summary.total_time > 300.0);
    }

    #[test]
    fn test_health_status() {
        let health = Health {
            status: "healthy".to_string(),
            service: "Sir Interruptsalot API".to_string(),
        };
        assert!(health.is_healthy());

        let sick = Health {
            status: "degraded".to_string(),
            service: String::new(),
        };
        assert!(!sick.is_healthy());
    }
}
