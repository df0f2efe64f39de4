//! Debate transcript widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use arena_core::{ChatMessage, Speaker};

use crate::ui::theme::ArenaTheme;

/// Widget for displaying the exchange of arguments
pub struct TranscriptWidget<'a> {
    messages: &'a [ChatMessage],
    scroll: usize,
    theme: &'a ArenaTheme,
    /// Show a typing indicator while a round trip is in flight.
    waiting: bool,
}

impl<'a> TranscriptWidget<'a> {
    pub fn new(messages: &'a [ChatMessage], theme: &'a ArenaTheme) -> Self {
        Self {
            messages,
            scroll: 0,
            theme,
            waiting: false,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn waiting(mut self, waiting: bool) -> Self {
        self.waiting = waiting;
        self
    }

    fn push_message(&self, lines: &mut Vec<Line<'static>>, message: &ChatMessage) {
        let (style, prefix) = match message.speaker {
            Speaker::Player => (self.theme.player_style(), "You ▸ "),
            Speaker::Bot => (self.theme.bot_style(), "Bot ▸ "),
            Speaker::System => (self.theme.system_style(), ""),
        };

        let text = message.display_text();
        for (i, text_line) in text.lines().enumerate() {
            let content = if i == 0 {
                match message.speaker {
                    Speaker::System => format!("[ {text_line} ]"),
                    _ => format!("{prefix}{text_line}"),
                }
            } else {
                text_line.to_string()
            };
            lines.push(Line::from(Span::styled(content, style)));
        }

        for source in &message.sources {
            let label = if source.title.is_empty() {
                source.link.clone()
            } else {
                format!("{} — {}", source.title, source.link)
            };
            lines.push(Line::from(Span::styled(
                format!("  └ {label}"),
                self.theme.source_style(),
            )));
        }

        lines.push(Line::from(""));
    }
}

impl Widget for TranscriptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" The Arena ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        for message in self.messages {
            self.push_message(&mut lines, message);
        }

        if self.waiting {
            lines.push(Line::from(Span::styled(
                "Sir Interruptsalot is composing a rebuttal…",
                self.theme.system_style(),
            )));
        }

        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false });
        paragraph.render(inner, buf);

        // Scrollbar when the transcript overflows
        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let widget = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black));

            let mut state = ScrollbarState::new(max_scroll).position(scroll);
            widget.render(scrollbar_area, buf, &mut state);

            // Hint at hidden content below
            if scroll < max_scroll {
                let remaining = max_scroll - scroll;
                let hint = format!(" ↓{remaining} more ");
                let hint_y = inner.y + inner.height.saturating_sub(1);
                let hint_style = Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM);
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, hint_y)].set_char(ch).set_style(hint_style);
                    }
                }
            }
        }
    }
}
