//! Personality report widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use arena_core::{DebateOutcome, Winner};

use crate::ui::theme::ArenaTheme;

/// Full-screen rendering of the parsed personality report.
pub struct ReportWidget<'a> {
    outcome: &'a DebateOutcome,
    scroll: usize,
    theme: &'a ArenaTheme,
}

impl<'a> ReportWidget<'a> {
    pub fn new(outcome: &'a DebateOutcome, theme: &'a ArenaTheme) -> Self {
        Self {
            outcome,
            scroll: 0,
            theme,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn header(&self, text: &str) -> Line<'static> {
        Line::from(Span::styled(text.to_string(), self.theme.header_style()))
    }

    fn bullets(&self, lines: &mut Vec<Line<'static>>, items: &[String]) {
        for item in items {
            lines.push(Line::from(format!("  • {item}")));
        }
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let outcome = self.outcome;
        let report = &outcome.report;
        let mut lines: Vec<Line> = Vec::new();

        let (banner, banner_color) = match outcome.winner() {
            Winner::Player => ("YOU WON THE ARGUMENT", self.theme.player_score),
            Winner::Bot => ("SIR INTERRUPTSALOT WINS", self.theme.bot_score),
            Winner::Tie => ("A STUBBORN TIE", self.theme.foreground),
        };
        lines.push(Line::from(Span::styled(
            banner.to_string(),
            Style::default()
                .fg(banner_color)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!(
            "Final score: You {} — {} Bot  ({}s of arguing)",
            outcome.scores.player,
            outcome.scores.bot,
            outcome.total_time_secs.round() as i64
        )));
        lines.push(Line::from(""));

        for line in &report.preamble {
            lines.push(Line::from(Span::styled(
                line.clone(),
                self.theme.system_style(),
            )));
        }
        if !report.preamble.is_empty() {
            lines.push(Line::from(""));
        }

        if let Some(persona) = &report.persona {
            lines.push(Line::from(vec![
                Span::raw("Arguing persona: "),
                Span::styled(
                    format!("\"{persona}\""),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(""));
        }

        if !report.style_breakdown.is_empty() {
            lines.push(self.header("STYLE BREAKDOWN"));
            self.bullets(&mut lines, &report.style_breakdown);
            lines.push(Line::from(""));
        }

        if !report.strongest_traits.is_empty() {
            lines.push(self.header("STRONGEST TRAITS"));
            self.bullets(&mut lines, &report.strongest_traits);
            lines.push(Line::from(""));
        }

        if !report.weakest_traits.is_empty() {
            lines.push(self.header("WEAKEST TRAITS"));
            self.bullets(&mut lines, &report.weakest_traits);
            lines.push(Line::from(""));
        }

        if let Some(summary) = &report.summary {
            lines.push(self.header("SUMMARY"));
            lines.push(Line::from(summary.clone()));
            lines.push(Line::from(""));
        }

        if !report.scores.is_empty() {
            lines.push(self.header("SCORES"));
            for score in &report.scores {
                lines.push(Line::from(format!(
                    "  {:<28} {:>3}/{}",
                    score.label, score.value, score.max
                )));
            }
            lines.push(Line::from(""));
        }

        if let Some(verdict) = &report.verdict {
            lines.push(self.header("FINAL VERDICT"));
            lines.push(Line::from(Span::styled(
                verdict.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }

        lines
    }
}

impl Widget for ReportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Personality Roast Report ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.build_lines();
        let max_scroll = lines.len().saturating_sub(inner.height as usize);
        let scroll = self.scroll.min(max_scroll);

        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
