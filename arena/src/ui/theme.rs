//! Color theme and styling for the arena TUI

use ratatui::style::{Color, Modifier, Style};

/// Arena UI color theme
#[derive(Debug, Clone)]
pub struct ArenaTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Speaker colors
    pub player_text: Color,
    pub bot_text: Color,
    pub system_text: Color,
    pub source_text: Color,

    // Scoreboard colors
    pub player_score: Color,
    pub bot_score: Color,

    // Timer colors
    pub timer_normal: Color,
    pub timer_low: Color,
    pub timer_expired: Color,
}

impl Default for ArenaTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            player_text: Color::Cyan,
            bot_text: Color::White,
            system_text: Color::DarkGray,
            source_text: Color::Blue,

            player_score: Color::Green,
            bot_score: Color::LightRed,

            timer_normal: Color::Green,
            timer_low: Color::Yellow,
            timer_expired: Color::Red,
        }
    }
}

impl ArenaTheme {
    /// Style for the player's arguments
    pub fn player_style(&self) -> Style {
        Style::default()
            .fg(self.player_text)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for the bot's rebuttals
    pub fn bot_style(&self) -> Style {
        Style::default().fg(self.bot_text)
    }

    /// Style for system notices
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Style for citation lines under a rebuttal
    pub fn source_style(&self) -> Style {
        Style::default()
            .fg(self.source_text)
            .add_modifier(Modifier::DIM)
    }

    /// Timer style keyed off seconds remaining
    pub fn timer_style(&self, remaining: u32, expired: bool) -> Style {
        if expired {
            Style::default()
                .fg(self.timer_expired)
                .add_modifier(Modifier::BOLD)
        } else if remaining <= 30 {
            Style::default()
                .fg(self.timer_low)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.timer_normal)
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Section header style on the report screen
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }
}
