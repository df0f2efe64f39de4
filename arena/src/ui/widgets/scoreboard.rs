//! Scoreboard and countdown sidebar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use arena_core::{DebateClock, Phase, ScorePair};

use crate::ui::theme::ArenaTheme;

/// Sidebar showing the score pair, the countdown, and the latest
/// server commentary.
pub struct ScoreboardWidget<'a> {
    scores: ScorePair,
    clock: &'a DebateClock,
    phase: Phase,
    status: Option<&'a str>,
    theme: &'a ArenaTheme,
}

impl<'a> ScoreboardWidget<'a> {
    pub fn new(scores: ScorePair, clock: &'a DebateClock, phase: Phase, theme: &'a ArenaTheme) -> Self {
        Self {
            scores,
            clock,
            phase,
            status: None,
            theme,
        }
    }

    pub fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }

    fn timer_line(&self) -> Line<'static> {
        let style = self
            .theme
            .timer_style(self.clock.remaining_secs(), self.clock.is_expired());

        let reading = if self.clock.is_expired() {
            let overtime = self.clock.overtime_secs();
            format!("OVERTIME +{}:{:02}", overtime / 60, overtime % 60)
        } else {
            self.clock.format()
        };

        Line::from(vec![
            Span::raw(" Time   "),
            Span::styled(reading, style),
        ])
    }
}

impl Widget for ScoreboardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Scoreboard ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let inner = block.inner(area);
        block.render(area, buf);

        let phase_label = match self.phase {
            Phase::Idle => "connecting",
            Phase::Active => "live",
            Phase::Overtime => "overtime",
            Phase::Ended => "ended",
        };

        let mut lines = vec![
            Line::from(vec![
                Span::raw(" You    "),
                Span::styled(
                    self.scores.player.to_string(),
                    Style::default()
                        .fg(self.theme.player_score)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::raw(" Bot    "),
                Span::styled(
                    self.scores.bot.to_string(),
                    Style::default()
                        .fg(self.theme.bot_score)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            self.timer_line(),
            Line::from(Span::styled(
                format!(" {phase_label}"),
                self.theme.system_style(),
            )),
        ];

        if let Some(status) = self.status {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                status.to_string(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
