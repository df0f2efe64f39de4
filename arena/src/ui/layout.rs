//! Layout calculations for the arena TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the arena screen (70/30 main split)
pub struct AppLayout {
    pub title_area: Rect,
    pub transcript_area: Rect,
    pub sidebar_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
    pub input_area: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Min(5),    // transcript + sidebar
                Constraint::Length(3), // status bar
                Constraint::Length(1), // hotkey bar
                Constraint::Length(3), // input
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[1]);

        Self {
            title_area: rows[0],
            transcript_area: columns[0],
            sidebar_area: columns[1],
            status_bar: rows[2],
            hotkey_bar: rows[3],
            input_area: rows[4],
        }
    }
}

/// Areas of the report screen
pub struct ReportLayout {
    pub title_area: Rect,
    pub report_area: Rect,
    pub hotkey_bar: Rect,
}

impl ReportLayout {
    pub fn calculate(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            title_area: rows[0],
            report_area: rows[1],
            hotkey_bar: rows[2],
        }
    }
}

/// A fixed-size rectangle centered in `area`, clamped to fit.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
