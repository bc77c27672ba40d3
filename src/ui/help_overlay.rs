//! Help overlay listing the weatherview key bindings

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::centered_rect;

const OVERLAY_WIDTH: u16 = 50;

/// Bindings grouped by section, as (key, action)
const SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Search",
        &[
            ("type", "Edit the city name"),
            ("Backspace", "Delete last character"),
            ("Ctrl+U", "Clear the search box"),
            ("Enter", "Fetch weather for the city"),
        ],
    ),
    ("Location", &[("Ctrl+L", "Use current location")]),
    (
        "Other",
        &[
            ("F1", "Toggle this help"),
            ("Esc", "Close help / Quit"),
            ("Ctrl+C", "Quit application"),
        ],
    ),
];

/// Renders the help overlay on top of the weather screen
pub fn render(frame: &mut Frame) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (title, bindings) in SECTIONS {
        lines.push(Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(bindings.iter().map(|&(key, action)| binding_line(key, action)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Press Esc or F1 to close",
        Style::default().fg(Color::DarkGray),
    )));

    // Borders take one row above and one below
    let height = lines.len() as u16 + 2;
    let area = centered_rect(OVERLAY_WIDTH, height, frame.area());

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn binding_line(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}
