//! TUI widgets for the debate arena

pub mod input;
pub mod report;
pub mod scoreboard;
pub mod status_bar;
pub mod transcript;

pub use input::InputWidget;
pub use report::ReportWidget;
pub use scoreboard::ScoreboardWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
pub use transcript::TranscriptWidget;
