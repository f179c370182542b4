//! Application state definitions

use super::console::Console;
use super::forms::FormGroup;

/// A colored tile in the card's grid list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub text: String,
    /// Column span
    pub cols: u16,
    /// Row span
    pub rows: u16,
    /// CSS-style color name
    pub color: String,
}

impl Tile {
    pub fn new(text: &str, cols: u16, rows: u16, color: &str) -> Self {
        Self {
            text: text.to_string(),
            cols,
            rows,
            color: color.to_string(),
        }
    }
}

/// The fixed tiles shown in the card
pub fn default_tiles() -> Vec<Tile> {
    vec![
        Tile::new("One", 2, 2, "lightblue"),
        Tile::new("Two", 2, 1, "lightgreen"),
        Tile::new("Three", 2, 1, "lightblue"),
        Tile::new("Four", 2, 1, "lightgreen"),
    ]
}

/// Action buttons at the bottom of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardButton {
    #[default]
    Like,
    Share,
}

impl CardButton {
    pub const ALL: [CardButton; 2] = [CardButton::Like, CardButton::Share];

    pub fn next(&self) -> Self {
        match self {
            Self::Like => Self::Share,
            Self::Share => Self::Like,
        }
    }

    pub fn prev(&self) -> Self {
        // Two buttons: previous and next coincide
        self.next()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Like => "LIKE",
            Self::Share => "SHARE",
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub tiles: Vec<Tile>,
    pub focused_button: CardButton,
    pub like_count: u32,
    pub share_count: u32,
    /// Log of demo operations
    pub console: Console,
    /// Selected console line (the list scrolls to keep it visible)
    pub console_selected: usize,
    /// Live login form driven from the keyboard
    pub login: FormGroup,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(console: Console, login: FormGroup) -> Self {
        let mut state = Self {
            tiles: default_tiles(),
            focused_button: CardButton::default(),
            like_count: 0,
            share_count: 0,
            console,
            console_selected: 0,
            login,
            status_message: None,
        };
        state.follow_console();
        state
    }

    /// Select the newest console line
    pub fn follow_console(&mut self) {
        self.console_selected = self.console.len().saturating_sub(1);
    }

    pub fn scroll_console_up(&mut self) {
        self.console_selected = self.console_selected.saturating_sub(1);
    }

    pub fn scroll_console_down(&mut self) {
        let last = self.console.len().saturating_sub(1);
        self.console_selected = (self.console_selected + 1).min(last);
    }

    /// Press the focused card button
    pub fn press_focused_button(&mut self) {
        let message = match self.focused_button {
            CardButton::Like => {
                self.like_count += 1;
                format!("Liked ({})", self.like_count)
            }
            CardButton::Share => {
                self.share_count += 1;
                format!("Shared ({})", self.share_count)
            }
        };
        self.status_message = Some(message);
    }
}
