//! Reusable UI components

mod button;

pub use button::{action_label, button_width, render_action_button, BUTTON_HEIGHT};
