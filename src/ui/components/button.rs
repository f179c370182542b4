//! Button component for TUI

use crate::state::CardButton;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Width needed to render a button label with its border and padding
pub fn button_width(content: &str) -> u16 {
    content.chars().count() as u16 + 4
}

/// Render a generic button with border
pub fn render_button(frame: &mut Frame, area: Rect, content: &str, is_focused: bool) {
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render one of the card's action buttons, with its press count once pressed
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    button: CardButton,
    presses: u32,
    is_focused: bool,
) {
    let content = action_label(button, presses);
    render_button(frame, area, &content, is_focused);
}

pub fn action_label(button: CardButton, presses: u32) -> String {
    if presses == 0 {
        button.label().to_string()
    } else {
        format!("{} {presses}", button.label())
    }
}
