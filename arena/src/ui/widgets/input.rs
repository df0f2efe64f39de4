//! Argument input widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::ArenaTheme;

/// Input field for the next argument (or a : command)
pub struct InputWidget<'a> {
    content: &'a str,
    cursor_position: usize,
    theme: &'a ArenaTheme,
    placeholder: &'a str,
    is_active: bool,
    is_command_mode: bool,
    /// Input is locked (round trip in flight, or overtime).
    locked: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a ArenaTheme) -> Self {
        Self {
            content,
            cursor_position: content.chars().count(),
            theme,
            placeholder: "Make your point...",
            is_active: false,
            is_command_mode: false,
            locked: false,
        }
    }

    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn command_mode(mut self, is_command: bool) -> Self {
        self.is_command_mode = is_command;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Split the content around the cursor (character-based for unicode
    /// safety) into before / at / after spans.
    fn cursor_parts(&self, content: &str, cursor: usize) -> (String, String, String) {
        let before: String = content.chars().take(cursor).collect();
        let at = content
            .chars()
            .nth(cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = if cursor < content.chars().count() {
            content.chars().skip(cursor + 1).collect()
        } else {
            String::new()
        };
        (before, at, after)
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.is_active));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.locked {
            let line = Line::from(Span::styled(
                self.placeholder,
                self.theme.system_style(),
            ));
            Paragraph::new(line).render(inner, buf);
            return;
        }

        let line = if self.content.is_empty() && !self.is_command_mode {
            Line::from(vec![
                Span::styled("You ▸ ", self.theme.player_style()),
                Span::styled(
                    self.placeholder,
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        } else {
            // Command mode hides the leading ':' from the buffer and
            // shows its own prompt instead.
            let (prompt, content, cursor) = if self.is_command_mode {
                let content = self.content.strip_prefix(':').unwrap_or(self.content);
                (":", content, self.cursor_position.saturating_sub(1))
            } else {
                ("You ▸ ", self.content, self.cursor_position)
            };

            let (before, at, after) = self.cursor_parts(content, cursor);

            Line::from(vec![
                Span::styled(prompt, self.theme.player_style()),
                Span::raw(before),
                Span::styled(
                    at,
                    Style::default()
                        .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
                        .fg(self.theme.player_text),
                ),
                Span::raw(after),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}
