//! Screen layout and status bar

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Key hints shown in the status bar
const KEY_HINTS: &[(&str, &str)] = &[
    ("q", "quit"),
    ("←/→", "focus"),
    ("Enter", "press"),
    ("a/d", "add/remove twoFactor"),
    ("s", "set value"),
    ("r", "reset"),
    ("x", "remove email"),
    ("↑/↓", "scroll"),
];

/// Areas of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub card: Rect,
    pub console: Option<Rect>,
    pub status: Rect,
}

/// Split the screen into card, optional console panel and status bar
pub fn create_layout(area: Rect, show_console: bool) -> ScreenLayout {
    // Reserve bottom line for status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    if !show_console {
        return ScreenLayout {
            card: rows[0],
            console: None,
            status: rows[1],
        };
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Card
            Constraint::Percentage(45), // Console
        ])
        .split(rows[0]);

    ScreenLayout {
        card: columns[0],
        console: Some(columns[1]),
        status: rows[1],
    }
}

/// Draw the status bar: last status message, otherwise key hints
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.state.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Yellow),
        )),
        None => {
            let mut spans = Vec::new();
            for (key, action) in KEY_HINTS {
                spans.push(Span::styled(
                    format!(" {key}"),
                    Style::default().fg(Color::Cyan),
                ));
                spans.push(Span::styled(
                    format!(" {action} "),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
