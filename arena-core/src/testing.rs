//! Testing utilities for the debate arena.
//!
//! This module provides tools for integration testing:
//! - `MockArena` for scripted server exchanges without network calls
//! - `ArenaHarness` for running session scenarios
//! - Assertion helpers for verifying session state

use crate::clock::SESSION_SECONDS;
use crate::session::{DebateSession, Phase, ScorePair, SessionError};
use argubot::{ArgumentResponse, FinalScores, SessionSummary};
use std::collections::VecDeque;

/// A scripted stand-in for the remote debate service.
///
/// Use this for deterministic tests of the session state machine without
/// a server.
pub struct MockArena {
    session_id: String,
    exchanges: VecDeque<ArgumentResponse>,
    report: String,
    time_remaining: u32,
}

impl MockArena {
    pub fn new() -> Self {
        Self {
            session_id: "mock-session".to_string(),
            exchanges: VecDeque::new(),
            report: "🏆 FINAL VERDICT: Scripted to perfection.".to_string(),
            time_remaining: SESSION_SECONDS,
        }
    }

    /// Queue a plain rebuttal.
    pub fn queue_rebuttal(&mut self, text: impl Into<String>) -> &mut Self {
        let response = self.base_response(text);
        self.exchanges.push_back(response);
        self
    }

    /// Queue a rebuttal with updated scores and clock.
    pub fn queue_scored(
        &mut self,
        text: impl Into<String>,
        user_score: u32,
        bot_score: u32,
        time_remaining: u32,
    ) -> &mut Self {
        let mut response = self.base_response(text);
        response.user_score = user_score;
        response.bot_score = bot_score;
        response.time_remaining = time_remaining;
        self.time_remaining = time_remaining;
        self.exchanges.push_back(response);
        self
    }

    /// Queue the server-side "time's up" response.
    pub fn queue_game_over(&mut self, text: impl Into<String>) -> &mut Self {
        let mut response = self.base_response(text);
        response.time_remaining = 0;
        response.game_ended = true;
        self.exchanges.push_back(response);
        self
    }

    /// Set the report text `summary()` will return.
    pub fn set_report(&mut self, report: impl Into<String>) -> &mut Self {
        self.report = report.into();
        self
    }

    /// Produce the next scripted exchange.
    pub fn next_exchange(&mut self) -> ArgumentResponse {
        self.exchanges
            .pop_front()
            .unwrap_or_else(|| self.base_response("The arena has no more scripted rebuttals."))
    }

    /// Produce the end-of-session summary for the given scores.
    pub fn summary(&self, scores: ScorePair) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            final_report: self.report.clone(),
            final_scores: FinalScores {
                user: scores.player,
                bot: scores.bot,
            },
            total_time: f64::from(SESSION_SECONDS - self.time_remaining),
        }
    }

    fn base_response(&self, text: impl Into<String>) -> ArgumentResponse {
        ArgumentResponse {
            bot_response: text.into(),
            session_id: self.session_id.clone(),
            user_score: 0,
            bot_score: 0,
            time_remaining: self.time_remaining,
            game_ended: false,
            sources: Vec::new(),
            status_update: None,
        }
    }
}

impl Default for MockArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Harness for running scripted debate scenarios.
pub struct ArenaHarness {
    pub arena: MockArena,
    pub session: DebateSession,
}

impl ArenaHarness {
    pub fn new() -> Self {
        Self {
            arena: MockArena::new(),
            session: DebateSession::new(),
        }
    }

    /// Queue a rebuttal on the scripted server.
    pub fn expect_rebuttal(&mut self, text: impl Into<String>) -> &mut Self {
        self.arena.queue_rebuttal(text);
        self
    }

    /// Open the session with an opening statement.
    pub fn open(&mut self, statement: &str) -> Result<(), SessionError> {
        self.session.open(statement)?;
        let response = self.arena.next_exchange();
        self.session.activate(&response);
        Ok(())
    }

    /// Submit an argument through the scripted server.
    pub fn argue(&mut self, text: &str) -> Result<Phase, SessionError> {
        self.session.submit(text)?;
        let response = self.arena.next_exchange();
        Ok(self.session.apply_exchange(&response))
    }

    /// Tick the clock until it expires.
    pub fn expire(&mut self) {
        while self.session.phase() == Phase::Active {
            self.session.tick();
        }
    }

    /// Close the session through the scripted server.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        let _session_id = self.session.request_close()?;
        let summary = self.arena.summary(self.session.scores());
        self.session.finish(&summary);
        Ok(())
    }

    /// Text of the last transcript entry.
    pub fn last_message(&self) -> Option<&str> {
        self.session.transcript().last().map(|m| m.text.as_str())
    }
}

impl Default for ArenaHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the session is in the expected phase.
#[track_caller]
pub fn assert_phase(harness: &ArenaHarness, phase: Phase) {
    assert_eq!(
        harness.session.phase(),
        phase,
        "Expected phase {phase:?}, got {:?}",
        harness.session.phase()
    );
}

/// Assert the session scores match.
#[track_caller]
pub fn assert_scores(harness: &ArenaHarness, player: u32, bot: u32) {
    assert_eq!(
        harness.session.scores(),
        ScorePair { player, bot },
        "Expected scores {player}-{bot}"
    );
}
