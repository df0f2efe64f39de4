//! Status and hotkey bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use arena_core::Phase;

use crate::app::InputMode;
use crate::ui::theme::ArenaTheme;

/// Bottom status bar: input mode, session phase, transient messages.
pub struct StatusBarWidget<'a> {
    phase: Phase,
    input_mode: InputMode,
    theme: &'a ArenaTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(phase: Phase, input_mode: InputMode, theme: &'a ArenaTheme) -> Self {
        Self {
            phase,
            input_mode,
            theme,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mode_label = match self.input_mode {
            InputMode::Normal => "NORMAL",
            InputMode::Insert => "INSERT",
            InputMode::Command => "COMMAND",
        };

        let phase_label = match self.phase {
            Phase::Idle => "Connecting",
            Phase::Active => "Debate live",
            Phase::Overtime => "Overtime",
            Phase::Ended => "Ended",
        };

        let mut spans = vec![
            Span::styled(
                format!(" {mode_label} "),
                Style::default().add_modifier(Modifier::REVERSED),
            ),
            Span::raw(" "),
            Span::raw(phase_label),
        ];

        if let Some(message) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                message.to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}

/// One-line context-sensitive hotkey reminder.
pub struct HotkeyBarWidget<'a> {
    phase: Phase,
    input_mode: InputMode,
    theme: &'a ArenaTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(phase: Phase, input_mode: InputMode, theme: &'a ArenaTheme) -> Self {
        Self {
            phase,
            input_mode,
            theme,
        }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hint = match (self.input_mode, self.phase) {
            (InputMode::Insert, _) => " Enter send · Esc normal mode",
            (InputMode::Command, _) => " Enter run · Esc cancel (:q :end :help)",
            (_, Phase::Overtime) => " waiting for the report · e retry · q quit",
            _ => " i argue · j/k scroll · e end debate · ? help · q quit",
        };

        Paragraph::new(Line::from(Span::styled(hint, self.theme.system_style())))
            .render(area, buf);
    }
}
