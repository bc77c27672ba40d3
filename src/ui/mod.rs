//! UI rendering module for weatherview
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod backdrop;
pub mod help_overlay;
pub mod weather_view;

use ratatui::{layout::Rect, Frame};

use crate::app::App;

/// Renders the whole screen for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    weather_view::render(frame, app);
    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Centers a `width` x `height` box in `area`, shrunk to fit
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Full-height column no wider than `max_width`, centered horizontally
pub(crate) fn centered_column(area: Rect, max_width: u16) -> Rect {
    centered_rect(max_width, area.height, area)
}
