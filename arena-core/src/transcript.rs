//! Chat transcript model for a debate session.

use argubot::Source;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

/// Who said a line in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// The human player.
    Player,
    /// The remote argument bot.
    Bot,
    /// Client-side notices (connection errors, session events).
    System,
}

/// A single entry in the debate transcript.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Web citations backing a bot rebuttal. Empty for other speakers.
    pub sources: Vec<Source>,
}

impl ChatMessage {
    /// Create a player message.
    pub fn player(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Player,
            text: text.into(),
            timestamp: Utc::now(),
            sources: Vec::new(),
        }
    }

    /// Create a bot message with its citations.
    pub fn bot(text: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
            timestamp: Utc::now(),
            sources,
        }
    }

    /// Create a system notice.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::System,
            text: text.into(),
            timestamp: Utc::now(),
            sources: Vec::new(),
        }
    }

    /// Message text with inline `[SOURCE: ...]` markers removed.
    ///
    /// Citations render as a separate list under the message, so the
    /// markers the bot embeds mid-sentence are just noise on screen.
    pub fn display_text(&self) -> String {
        strip_source_markers(&self.text)
    }
}

lazy_static! {
    static ref SOURCE_MARKER: Regex =
        Regex::new(r"\s*\[SOURCE:\s*[^\]]*\]").expect("source marker regex");
}

/// Remove inline `[SOURCE: <url>]` citation markers from rebuttal text.
pub fn strip_source_markers(text: &str) -> String {
    SOURCE_MARKER.replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_single_marker() {
        let text = "Cats sleep 16 hours a day [SOURCE: https://example.com/cats] so there.";
        assert_eq!(
            strip_source_markers(text),
            "Cats sleep 16 hours a day so there."
        );
    }

    #[test]
    fn test_strip_multiple_markers() {
        let text = "Fact one [SOURCE: https://a.example], fact two [SOURCE: https://b.example].";
        assert_eq!(strip_source_markers(text), "Fact one, fact two.");
    }

    #[test]
    fn test_strip_leaves_plain_text_alone() {
        let text = "No citations here, just vibes.";
        assert_eq!(strip_source_markers(text), text);
    }

    #[test]
    fn test_strip_trailing_marker() {
        let text = "The moon landing happened. [SOURCE: https://nasa.example]";
        assert_eq!(strip_source_markers(text), "The moon landing happened.");
    }

    #[test]
    fn test_constructors_set_speaker() {
        assert_eq!(ChatMessage::player("hi").speaker, Speaker::Player);
        assert_eq!(ChatMessage::bot("no", Vec::new()).speaker, Speaker::Bot);
        assert_eq!(ChatMessage::system("note").speaker, Speaker::System);
    }

    #[test]
    fn test_display_text_uses_stripped_form() {
        let message = ChatMessage::bot("Wrong [SOURCE: https://x.example] again.", Vec::new());
        assert_eq!(message.display_text(), "Wrong again.");
    }
}
