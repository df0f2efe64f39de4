//! Headless debate interface for programmatic use.
//!
//! This module drives a full session without a TUI. It's designed for:
//! - The `--headless` front-end mode
//! - Integration tests against a mock or real server
//! - Scripted debate runs
//!
//! # Example
//!
//! ```ignore
//! use arena_core::HeadlessMatch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut debate = HeadlessMatch::from_env();
//!
//!     let rebuttal = debate.open("tabs are better than spaces").await?;
//!     println!("{}", rebuttal.display_text());
//!
//!     let outcome = debate.finish().await?;
//!     println!("{}", outcome.raw_report);
//!     Ok(())
//! }
//! ```

use crate::session::{DebateOutcome, DebateSession, Phase, ScorePair, SessionError};
use crate::transcript::ChatMessage;
use argubot::Argubot;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::warn;

/// Errors from a headless debate.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("API error: {0}")]
    Api(#[from] argubot::Error),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// A debate session driven over the network without a UI.
///
/// Between calls the session clock advances from wall time, so a debate
/// left idle expires the same way it does in the arena.
pub struct HeadlessMatch {
    client: Argubot,
    session: DebateSession,
    last_tick: Option<Instant>,
}

impl HeadlessMatch {
    /// Create a headless debate against the given client.
    pub fn new(client: Argubot) -> Self {
        Self {
            client,
            session: DebateSession::new(),
            last_tick: None,
        }
    }

    /// Create a headless debate from the `ARGUBOT_API_URL` environment.
    pub fn from_env() -> Self {
        Self::new(Argubot::from_env())
    }

    /// Open the session with the player's opening statement.
    ///
    /// Returns the bot's first rebuttal.
    pub async fn open(&mut self, statement: &str) -> Result<&ChatMessage, MatchError> {
        self.session.open(statement)?;

        match self.client.start_session(statement).await {
            Ok(response) => {
                self.session.activate(&response);
                self.last_tick = Some(Instant::now());
                Ok(self.last_message())
            }
            Err(e) => {
                warn!(error = %e, "start_session failed");
                self.session.revert_pending();
                Err(e.into())
            }
        }
    }

    /// Submit one argument and return the bot's rebuttal.
    pub async fn argue(&mut self, text: &str) -> Result<&ChatMessage, MatchError> {
        self.advance_clock();
        let session_id = self.session.submit(text)?;

        match self.client.send_argument(&session_id, text).await {
            Ok(response) => {
                self.session.apply_exchange(&response);
                Ok(self.last_message())
            }
            Err(e) => {
                warn!(error = %e, "send_argument failed");
                self.session.revert_pending();
                Err(e.into())
            }
        }
    }

    /// Close the session and return the parsed outcome.
    pub async fn finish(&mut self) -> Result<&DebateOutcome, MatchError> {
        self.advance_clock();
        let session_id = self.session.request_close()?;

        let summary = self.client.end_session(&session_id).await.map_err(|e| {
            warn!(error = %e, "end_session failed");
            e
        })?;
        self.session.finish(&summary);
        self.session
            .outcome()
            .ok_or(SessionError::NotStarted)
            .map_err(Into::into)
    }

    /// Advance the clock from wall time and return the current phase.
    pub fn poll(&mut self) -> Phase {
        self.advance_clock();
        self.session.phase()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn scores(&self) -> ScorePair {
        self.session.scores()
    }

    pub fn time_remaining(&self) -> u32 {
        self.session.clock().remaining_secs()
    }

    pub fn session(&self) -> &DebateSession {
        &self.session
    }

    fn last_message(&self) -> &ChatMessage {
        self.session
            .transcript()
            .last()
            .expect("transcript has at least the exchange just applied")
    }

    fn advance_clock(&mut self) {
        let Some(last) = self.last_tick else {
            return;
        };
        let elapsed = last.elapsed().as_secs();
        for _ in 0..elapsed {
            self.session.tick();
        }
        if elapsed > 0 {
            // Keep the sub-second remainder for the next reading.
            self.last_tick = Some(last + Duration::from_secs(elapsed));
        }
    }
}
