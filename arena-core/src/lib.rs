//! Session engine for the Sir Interruptsalot debate arena.
//!
//! This crate provides:
//! - The debate session state machine (idle, active, overtime, ended)
//! - A tick-driven countdown clock synced from server responses
//! - The chat transcript model
//! - A parser for the end-of-session personality report
//!
//! All substantive computation (argument generation, round judging,
//! scoring, report writing) happens on the remote service reached through
//! the [`argubot`] client; this crate only manages client-side state.
//!
//! # Quick Start
//!
//! ```ignore
//! use arena_core::HeadlessMatch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut debate = HeadlessMatch::from_env();
//!
//!     let rebuttal = debate.open("pineapple belongs on pizza").await?;
//!     println!("{}", rebuttal.display_text());
//!
//!     debate.argue("sweet and savory is a classic pairing").await?;
//!
//!     let outcome = debate.finish().await?;
//!     println!("{:?}", outcome.winner());
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod headless;
pub mod report;
pub mod session;
pub mod testing;
pub mod transcript;

// Primary public API
pub use clock::{ClockEvent, DebateClock, SESSION_SECONDS};
pub use headless::{HeadlessMatch, MatchError};
pub use report::{parse_report, PersonaReport, ScoreLine};
pub use session::{DebateOutcome, DebateSession, Phase, ScorePair, SessionError, Winner};
pub use testing::{ArenaHarness, MockArena};
pub use transcript::{strip_source_markers, ChatMessage, Speaker};
