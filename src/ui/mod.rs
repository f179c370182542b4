//! UI module for rendering the TUI

mod card;
mod components;
mod console_panel;
mod grid;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let screen = layout::create_layout(frame.area(), app.config.show_console());

    card::draw(frame, screen.card, app);
    if let Some(console_area) = screen.console {
        console_panel::draw(frame, console_area, app);
    }

    layout::draw_status_bar(frame, screen.status, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draws_card_and_console() {
        let app = App::new(DemoConfig::default()).unwrap();
        let screen = render(&app, 140, 40);
        assert!(screen.contains(card::CARD_TITLE));
        assert!(screen.contains(" One "));
        assert!(screen.contains("LIKE"));
        assert!(screen.contains("SHARE"));
        assert!(screen.contains("Console"));
        assert!(screen.contains("login.value"));
    }

    #[test]
    fn test_console_can_be_hidden() {
        let config = DemoConfig {
            show_console: Some(false),
            ..Default::default()
        };
        let app = App::new(config).unwrap();
        let screen = render(&app, 80, 30);
        assert!(screen.contains(card::CARD_TITLE));
        assert!(!screen.contains("Console"));
    }

    #[test]
    fn test_oversized_grid_config_does_not_panic() {
        let config = DemoConfig {
            row_height: Some(30000),
            gutter: Some(u16::MAX),
            ..Default::default()
        };
        let app = App::new(config).unwrap();
        let screen = render(&app, 140, 40);
        assert!(screen.contains(card::CARD_TITLE));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let app = App::new(DemoConfig::default()).unwrap();
        render(&app, 10, 4);
    }
}
