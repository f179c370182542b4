//! Card with header, tile grid and action buttons

use super::components::{action_label, button_width, render_action_button, BUTTON_HEIGHT};
use super::grid::{self, GridMetrics};
use crate::app::App;
use crate::state::CardButton;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub const CARD_TITLE: &str = "Typed form example";
pub const CARD_SUBTITLE: &str = "Example how to use typed forms";

/// Widest the card is allowed to grow
const MAX_CARD_WIDTH: u16 = 60;

/// Center a rectangle of at most `max_width` columns inside `area`
pub fn centered_width(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// Draw the card
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let area = centered_width(area, MAX_CARD_WIDTH);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(0),                // Tile grid
            Constraint::Length(BUTTON_HEIGHT), // Actions
        ])
        .split(inner);

    draw_header(frame, chunks[0]);

    let metrics = GridMetrics {
        columns: app.config.grid_columns(),
        row_height: app.config.row_height(),
        gutter: app.config.gutter(),
    };
    let grid_area = Rect {
        x: chunks[1].x + 1,
        width: chunks[1].width.saturating_sub(2),
        ..chunks[1]
    };
    grid::draw(frame, grid_area, &app.state.tiles, metrics);

    draw_actions(frame, chunks[2], app);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled(" ◆ ", Style::default().fg(Color::Yellow)),
            Span::styled(
                CARD_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("   {CARD_SUBTITLE}"),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_actions(frame: &mut Frame, area: Rect, app: &App) {
    let mut x = area.x + 1;
    for button in CardButton::ALL {
        let presses = match button {
            CardButton::Like => app.state.like_count,
            CardButton::Share => app.state.share_count,
        };
        let width = button_width(&action_label(button, presses));
        if x + width > area.right() {
            break;
        }
        let button_area = Rect {
            x,
            y: area.y,
            width,
            height: area.height,
        };
        render_action_button(
            frame,
            button_area,
            button,
            presses,
            app.state.focused_button == button,
        );
        x += width + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_width_limits_and_centers() {
        let area = Rect::new(0, 0, 100, 10);
        assert_eq!(centered_width(area, 60), Rect::new(20, 0, 60, 10));
    }

    #[test]
    fn test_centered_width_keeps_narrow_area() {
        let area = Rect::new(5, 2, 40, 10);
        assert_eq!(centered_width(area, 60), area);
    }
}
