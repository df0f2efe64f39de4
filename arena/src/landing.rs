//! Landing screen: collect the player's opening statement.

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::centered_rect_fixed;

/// State for the opening statement screen.
pub struct Landing {
    statement: String,
    cursor_position: usize,
    error: Option<String>,
    pub finished: bool,
    pub cancelled: bool,
}

impl Landing {
    pub fn new() -> Self {
        Self {
            statement: String::new(),
            cursor_position: 0,
            error: None,
            finished: false,
            cancelled: false,
        }
    }

    /// The collected opening statement.
    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        self.handle_key(key);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.cancelled = true,
            KeyCode::Enter => {
                if self.statement.trim().is_empty() {
                    // Submitting nothing is a no-op, with a nudge.
                    self.error = Some("Say something worth arguing about first.".to_string());
                } else {
                    self.finished = true;
                }
            }
            KeyCode::Backspace => {
                if self.cursor_position > 0 {
                    self.cursor_position -= 1;
                    if let Some((byte_pos, ch)) =
                        self.statement.char_indices().nth(self.cursor_position)
                    {
                        self.statement
                            .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
                    }
                }
            }
            KeyCode::Left => self.cursor_position = self.cursor_position.saturating_sub(1),
            KeyCode::Right => {
                self.cursor_position = (self.cursor_position + 1).min(self.statement.chars().count())
            }
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.statement.chars().count(),
            KeyCode::Char(c) => {
                self.error = None;
                let byte_pos = self
                    .statement
                    .char_indices()
                    .nth(self.cursor_position)
                    .map(|(i, _)| i)
                    .unwrap_or(self.statement.len());
                self.statement.insert(byte_pos, c);
                self.cursor_position += 1;
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect_fixed(64, 14, area);

        let block = Block::default()
            .title(" Sir Interruptsalot ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut lines = vec![
            Line::from(Span::styled(
                "The Undefeated Debate Champion awaits.",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("State an opinion - any opinion - and defend it"),
            Line::from("for five minutes against maximum sass."),
            Line::from(""),
            Line::from(Span::styled(
                "Your opening statement:",
                Style::default().add_modifier(Modifier::UNDERLINED),
            )),
        ];

        let input_line = if self.statement.is_empty() {
            Line::from(Span::styled(
                "> e.g. \"cereal is a soup\"",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::raw(self.statement.clone()),
                Span::styled("▌", Style::default().fg(Color::Cyan)),
            ])
        };
        lines.push(input_line);
        lines.push(Line::from(""));

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Yellow),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to start arguing · Esc to chicken out",
                Style::default().add_modifier(Modifier::DIM),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl Default for Landing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(landing: &mut Landing, text: &str) {
        for c in text.chars() {
            landing.handle_event(Event::Key(KeyEvent::from(KeyCode::Char(c))));
        }
    }

    #[test]
    fn test_empty_statement_does_not_finish() {
        let mut landing = Landing::new();
        landing.handle_event(Event::Key(KeyEvent::from(KeyCode::Enter)));
        assert!(!landing.finished);
        assert!(landing.error.is_some());
    }

    #[test]
    fn test_statement_submits() {
        let mut landing = Landing::new();
        type_str(&mut landing, "cereal is a soup");
        landing.handle_event(Event::Key(KeyEvent::from(KeyCode::Enter)));
        assert!(landing.finished);
        assert_eq!(landing.statement(), "cereal is a soup");
    }

    #[test]
    fn test_escape_cancels() {
        let mut landing = Landing::new();
        landing.handle_event(Event::Key(KeyEvent::from(KeyCode::Esc)));
        assert!(landing.cancelled);
    }

    #[test]
    fn test_backspace_edits() {
        let mut landing = Landing::new();
        type_str(&mut landing, "dogs");
        landing.handle_event(Event::Key(KeyEvent::from(KeyCode::Backspace)));
        assert_eq!(landing.statement(), "dog");
    }
}
