//! Decorative background
//!
//! A vertical gradient in the current theme's colors, three slowly floating
//! bubbles, and the loading spinner. All animation is driven by the app's
//! tick counter, so rendering stays a pure function of state.

use std::f64::consts::TAU;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::theme::{gradient_at, ThemeId};

/// Spinner frames, one per tick
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A floating bubble: horizontal/vertical anchor in percent of the screen,
/// float period in ticks, and float amplitude in rows
struct Bubble {
    x_pct: u16,
    y_pct: u16,
    period: u64,
    amplitude: f64,
    glyph: &'static str,
}

const BUBBLES: [Bubble; 3] = [
    Bubble {
        x_pct: 8,
        y_pct: 12,
        period: 6,
        amplitude: 2.0,
        glyph: "\u{25EF}", // ◯
    },
    Bubble {
        x_pct: 85,
        y_pct: 35,
        period: 8,
        amplitude: 1.5,
        glyph: "\u{25CB}", // ○
    },
    Bubble {
        x_pct: 33,
        y_pct: 85,
        period: 10,
        amplitude: 1.0,
        glyph: "\u{25E6}", // ◦
    },
];

/// Fills the area with the theme's vertical gradient
pub fn render_gradient(frame: &mut Frame, area: Rect, theme: ThemeId) {
    let stops = theme.gradient();
    let span = area.height.saturating_sub(1).max(1) as f64;

    for row in 0..area.height {
        let (r, g, b) = gradient_at(stops, row as f64 / span);
        let line = Rect {
            x: area.x,
            y: area.y + row,
            width: area.width,
            height: 1,
        };
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(r, g, b))),
            line,
        );
    }
}

/// Draws the floating bubbles for the given animation frame
pub fn render_bubbles(frame: &mut Frame, area: Rect, tick: u64) {
    if area.width < 2 || area.height < 2 {
        return;
    }

    for bubble in &BUBBLES {
        let base_x = (u32::from(area.width.saturating_sub(1)) * u32::from(bubble.x_pct) / 100) as u16;
        let base_y = (u32::from(area.height.saturating_sub(1)) * u32::from(bubble.y_pct) / 100) as i32;
        let y = (base_y + float_offset(tick, bubble.period, bubble.amplitude))
            .clamp(0, area.height as i32 - 1) as u16;

        let cell = Rect {
            x: area.x + base_x,
            y: area.y + y,
            width: 1,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                bubble.glyph,
                Style::default().fg(Color::Rgb(241, 245, 249)),
            )),
            cell,
        );
    }
}

/// Vertical offset in rows at `tick` for a float of the given period.
///
/// Negative values move up. The offset returns to zero every period.
pub fn float_offset(tick: u64, period: u64, amplitude: f64) -> i32 {
    if period == 0 {
        return 0;
    }
    let phase = (tick % period) as f64 / period as f64;
    -((phase * TAU).sin() * amplitude).round() as i32
}

/// Spinner glyph for the given animation frame
pub fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}
