//! DebateSession - the turn and timer state machine for one argument
//! session.
//!
//! The session moves through a linear lifecycle:
//!
//! ```text
//! Idle -> Active -> Overtime -> Ended
//! ```
//!
//! `Overtime` covers the window between the clock hitting zero (or the
//! server closing the session) and the final report arriving. All network
//! traffic happens outside this type; callers feed server responses in
//! and the session keeps the transcript, scores, clock, and phase
//! consistent.

use crate::clock::{ClockEvent, DebateClock};
use crate::report::parse_report;
use crate::transcript::ChatMessage;
use argubot::{ArgumentResponse, SessionSummary};
use thiserror::Error;
use tracing::debug;

/// Errors from session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No session id yet - the opening exchange has not completed")]
    NotStarted,

    #[error("The session has already ended")]
    Ended,

    #[error("Cannot submit an empty argument")]
    EmptyArgument,

    #[error("A round trip is already in flight")]
    Busy,
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing opened yet; the landing screen is collecting a statement.
    #[default]
    Idle,
    /// Clock running, arguments flowing.
    Active,
    /// Clock expired or server closed the session; report pending.
    Overtime,
    /// Final report received.
    Ended,
}

/// Rounds won by each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScorePair {
    pub player: u32,
    pub bot: u32,
}

/// Who took the debate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player,
    Bot,
    Tie,
}

/// Final state of a finished debate.
#[derive(Debug, Clone)]
pub struct DebateOutcome {
    pub scores: ScorePair,
    pub report: crate::report::PersonaReport,
    /// Wall-clock length of the session in seconds, per the server.
    pub total_time_secs: f64,
    /// The report text as received, for logging or plain dumps.
    pub raw_report: String,
}

impl DebateOutcome {
    pub fn winner(&self) -> Winner {
        match self.scores.player.cmp(&self.scores.bot) {
            std::cmp::Ordering::Greater => Winner::Player,
            std::cmp::Ordering::Less => Winner::Bot,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}

/// Client-side state for one debate session.
#[derive(Debug, Default)]
pub struct DebateSession {
    phase: Phase,
    session_id: Option<String>,
    transcript: Vec<ChatMessage>,
    scores: ScorePair,
    clock: DebateClock,
    /// True while an opening statement or argument is on the wire.
    pending: bool,
    latest_status: Option<String>,
    outcome: Option<DebateOutcome>,
}

impl DebateSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Server-issued session id, once the opening exchange completed.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn scores(&self) -> ScorePair {
        self.scores
    }

    pub fn clock(&self) -> &DebateClock {
        &self.clock
    }

    /// Latest server scoreboard commentary, if any.
    pub fn latest_status(&self) -> Option<&str> {
        self.latest_status.as_deref()
    }

    pub fn outcome(&self) -> Option<&DebateOutcome> {
        self.outcome.as_ref()
    }

    /// Whether a round trip is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Append a system notice to the transcript.
    pub fn push_notice(&mut self, text: impl Into<String>) {
        self.transcript.push(ChatMessage::system(text));
    }

    /// Record the opening statement ahead of the `start_session` call.
    ///
    /// The player's message is appended optimistically; call
    /// [`DebateSession::revert_pending`] if the call fails.
    pub fn open(&mut self, statement: &str) -> Result<(), SessionError> {
        if self.phase != Phase::Idle {
            return Err(SessionError::Ended);
        }
        if self.pending {
            return Err(SessionError::Busy);
        }
        let statement = statement.trim();
        if statement.is_empty() {
            return Err(SessionError::EmptyArgument);
        }

        self.transcript.push(ChatMessage::player(statement));
        self.pending = true;
        Ok(())
    }

    /// Apply the opening exchange: the session is now live.
    pub fn activate(&mut self, response: &ArgumentResponse) {
        debug!(session_id = %response.session_id, "session active");
        self.session_id = Some(response.session_id.clone());
        self.pending = false;
        self.phase = Phase::Active;
        self.apply_exchange(response);
    }

    /// Record an argument ahead of the `send_argument` call.
    ///
    /// Returns the session id to send with. The player's message is
    /// appended optimistically; call [`DebateSession::revert_pending`] if
    /// the call fails.
    pub fn submit(&mut self, text: &str) -> Result<String, SessionError> {
        match self.phase {
            Phase::Idle => return Err(SessionError::NotStarted),
            Phase::Overtime | Phase::Ended => return Err(SessionError::Ended),
            Phase::Active => {}
        }
        if self.pending {
            return Err(SessionError::Busy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyArgument);
        }
        // The phase check above guarantees the id exists, but the
        // invariant is "no argument without a session id", so check it
        // directly too.
        let session_id = self.session_id.clone().ok_or(SessionError::NotStarted)?;

        self.transcript.push(ChatMessage::player(text));
        self.pending = true;
        Ok(session_id)
    }

    /// Apply a completed exchange from the server.
    ///
    /// Updates the transcript, scores, status line, and clock. Returns
    /// the phase after the update; a `game_ended` response forces
    /// `Overtime` regardless of the local clock.
    pub fn apply_exchange(&mut self, response: &ArgumentResponse) -> Phase {
        self.pending = false;
        self.transcript.push(ChatMessage::bot(
            response.bot_response.clone(),
            response.sources.clone(),
        ));
        self.scores = ScorePair {
            player: response.user_score,
            bot: response.bot_score,
        };
        if let Some(status) = &response.status_update {
            self.latest_status = Some(status.clone());
        }
        self.clock.sync(response.time_remaining);

        if response.game_ended && self.phase == Phase::Active {
            debug!("server closed the session");
            self.phase = Phase::Overtime;
        }
        self.phase
    }

    /// Roll back a failed round trip.
    ///
    /// Removes the optimistically appended player message and returns its
    /// text so the front-end can restore it to the input box. Every other
    /// piece of state is left untouched.
    pub fn revert_pending(&mut self) -> Option<String> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        match self.transcript.last() {
            Some(message) if message.speaker == crate::transcript::Speaker::Player => {
                self.transcript.pop().map(|m| m.text)
            }
            _ => None,
        }
    }

    /// Advance the clock by one second.
    ///
    /// An `Expired` event moves the session into `Overtime`; the
    /// front-end reacts by requesting the final report.
    pub fn tick(&mut self) -> ClockEvent {
        match self.phase {
            Phase::Active => {
                let event = self.clock.tick();
                if event == ClockEvent::Expired {
                    debug!("clock expired");
                    self.phase = Phase::Overtime;
                }
                event
            }
            Phase::Overtime => self.clock.tick(),
            Phase::Idle | Phase::Ended => ClockEvent::Running,
        }
    }

    /// Ask for the session id to close the session with.
    ///
    /// Valid during `Active` (ending early) and `Overtime` (the normal
    /// path after expiry).
    pub fn request_close(&mut self) -> Result<String, SessionError> {
        if self.pending {
            return Err(SessionError::Busy);
        }
        match self.phase {
            Phase::Idle => Err(SessionError::NotStarted),
            Phase::Ended => Err(SessionError::Ended),
            Phase::Active | Phase::Overtime => {
                // Ending early counts as entering overtime: input stops
                // while the report is generated.
                self.phase = Phase::Overtime;
                self.session_id.clone().ok_or(SessionError::NotStarted)
            }
        }
    }

    /// Apply the final summary: parse the report and end the session.
    pub fn finish(&mut self, summary: &SessionSummary) {
        debug!(session_id = %summary.session_id, "session ended");
        self.pending = false;
        self.phase = Phase::Ended;
        self.scores = ScorePair {
            player: summary.final_scores.user,
            bot: summary.final_scores.bot,
        };
        self.outcome = Some(DebateOutcome {
            scores: self.scores,
            report: parse_report(&summary.final_report),
            total_time_secs: summary.total_time,
            raw_report: summary.final_report.clone(),
        });
    }
}
