//! Console panel: demo log plus the live login form value

use crate::app::App;
use crate::state::Outcome;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn outcome_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Info => Style::default().fg(Color::DarkGray),
        Outcome::Allowed => Style::default().fg(Color::Green),
        Outcome::Rejected => Style::default().fg(Color::Red),
    }
}

/// Draw the console panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = serde_json::to_string_pretty(&app.state.login.value())
        .unwrap_or_else(|_| app.state.login.value().to_string());
    let snapshot_height = (snapshot.lines().count() as u16 + 2).min(area.height / 2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                  // Log
            Constraint::Length(snapshot_height), // Live value
        ])
        .split(area);

    let items: Vec<ListItem> = app
        .state
        .console
        .entries()
        .iter()
        .map(|entry| {
            let style = outcome_style(entry.outcome);
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", entry.outcome.label()), style),
                Span::raw(entry.message.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Console ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    // Keep the selected line in view while scrolling
    let selected = (!app.state.console.is_empty()).then_some(app.state.console_selected);
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let value = Paragraph::new(snapshot)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" login.value ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(value, chunks[1]);
}
