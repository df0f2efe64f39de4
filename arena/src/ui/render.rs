//! Render orchestration for the arena TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use arena_core::Phase;

use crate::app::{App, InputMode};
use crate::ui::layout::{centered_rect_fixed, AppLayout, ReportLayout};
use crate::ui::widgets::{
    HotkeyBarWidget, InputWidget, ReportWidget, ScoreboardWidget, StatusBarWidget,
    TranscriptWidget,
};

/// Overlay types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.session.outcome() {
        Some(_) => render_report_screen(frame, app, area),
        None => render_arena_screen(frame, app, area),
    }

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, *overlay, area);
    }
}

/// Arena layout: transcript, scoreboard, status, hotkeys, input.
fn render_arena_screen(frame: &mut Frame, app: &App, area: Rect) {
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let transcript = TranscriptWidget::new(app.session.transcript(), &app.theme)
        .scroll(app.transcript_scroll)
        .waiting(app.session.is_pending());
    frame.render_widget(transcript, layout.transcript_area);

    let scoreboard = ScoreboardWidget::new(
        app.session.scores(),
        app.session.clock(),
        app.session.phase(),
        &app.theme,
    )
    .status(app.session.latest_status());
    frame.render_widget(scoreboard, layout.sidebar_area);

    let status_bar = StatusBarWidget::new(app.session.phase(), app.input_mode, &app.theme)
        .message(app.status_message());
    frame.render_widget(status_bar, layout.status_bar);

    let hotkeys = HotkeyBarWidget::new(app.session.phase(), app.input_mode, &app.theme);
    frame.render_widget(hotkeys, layout.hotkey_bar);

    render_input(frame, app, layout.input_area);
}

/// Report layout: the parsed personality report, full width.
fn render_report_screen(frame: &mut Frame, app: &App, area: Rect) {
    let layout = ReportLayout::calculate(area);

    let title = Line::from(Span::styled(
        " Sir Interruptsalot — Debate Complete ",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title), layout.title_area);

    if let Some(outcome) = app.session.outcome() {
        let report = ReportWidget::new(outcome, &app.theme).scroll(app.report_scroll);
        frame.render_widget(report, layout.report_area);
    }

    let hint = Line::from(Span::styled(
        " j/k scroll · q quit",
        app.theme.system_style(),
    ));
    frame.render_widget(Paragraph::new(hint), layout.hotkey_bar);
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let phase = match app.session.phase() {
        Phase::Idle => "warming up",
        Phase::Active => "round in progress",
        Phase::Overtime => "overtime",
        Phase::Ended => "complete",
    };
    let title = format!(" Sir Interruptsalot — The Undefeated Debate Champion | {phase} ");

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the input area
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = matches!(app.input_mode, InputMode::Insert | InputMode::Command);
    let is_command = matches!(app.input_mode, InputMode::Command);

    let (locked, placeholder) = match app.session.phase() {
        Phase::Overtime | Phase::Ended => (true, "Time's up - waiting for your report..."),
        _ if app.session.is_pending() => (true, "Waiting for the rebuttal..."),
        Phase::Idle => (false, "State your claim..."),
        _ => (false, "Make your point... (press 'i' to type)"),
    };

    let input = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(is_active)
        .command_mode(is_command)
        .locked(locked && !is_command)
        .placeholder(placeholder);

    frame.render_widget(input, area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(48, 19, area);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " Sir Interruptsalot — Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Input Modes:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  i       Enter INSERT mode (type arguments)"),
        Line::from("  :       Enter COMMAND mode"),
        Line::from("  Esc     Return to NORMAL mode"),
        Line::from(""),
        Line::from(Span::styled(
            "Navigation (NORMAL mode):",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  j/k or ↑/↓     Scroll the transcript"),
        Line::from("  g/G            Jump to top/bottom"),
        Line::from("  Mouse wheel    Scroll the transcript"),
        Line::from(""),
        Line::from(Span::styled(
            "Commands:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  :q      Quit"),
        Line::from("  :end    Concede the clock, fetch the report"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
