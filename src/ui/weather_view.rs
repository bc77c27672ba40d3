//! Main weather screen
//!
//! Renders the header clock, the search box, any error message, the current
//! conditions card and the detail tiles over a condition-themed gradient.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{Condition, WeatherResult};
use crate::theme::ThemeId;
use crate::ui::{backdrop, centered_column};

/// Color scheme for text drawn over the gradient
mod colors {
    use ratatui::style::Color;

    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Borders of cards and tiles
    pub const BORDER: Color = Color::Rgb(226, 232, 240);
    /// Error box
    pub const ERROR: Color = Color::Rgb(248, 113, 113);
    /// Search prompt accent
    pub const ACCENT: Color = Color::Yellow;
}

/// Widest the content column gets
const MAX_CONTENT_WIDTH: u16 = 72;

/// Placeholder for values the backend did not report
const MISSING: &str = "--";

/// Renders the weather screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let theme = app
        .result
        .as_ref()
        .map(|r| r.condition)
        .unwrap_or(Condition::Other)
        .theme();
    backdrop::render_gradient(frame, area, theme);
    backdrop::render_bubbles(frame, area, app.frame);

    let content = centered_column(area, MAX_CONTENT_WIDTH);

    let error_height = if app.error.is_some() { 3 } else { 0 };
    let (card_height, details_height) = if app.result.is_some() { (7, 5) } else { (0, 0) };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),              // Header with clock
            Constraint::Length(3),              // Search box
            Constraint::Length(2),              // Key hints
            Constraint::Length(error_height),   // Error message
            Constraint::Length(card_height),    // Current conditions
            Constraint::Length(details_height), // Detail tiles
            Constraint::Min(0),
            Constraint::Length(1),              // Footer
        ])
        .split(content);

    render_header(frame, chunks[0], app.now);
    render_search(frame, chunks[1], app);
    render_hints(frame, chunks[2]);

    if let Some(error) = &app.error {
        render_error(frame, chunks[3], error);
    }

    if let Some(result) = &app.result {
        render_card(frame, chunks[4], result);
        render_details(frame, chunks[5], result);
    } else if !app.loading && app.error.is_none() {
        render_idle(frame, chunks[6]);
    }

    render_footer(frame, chunks[7], theme);
}

/// Renders the title, the long date and the time
fn render_header(frame: &mut Frame, area: Rect, now: DateTime<Local>) {
    let lines = vec![
        Line::from(Span::styled(
            "Weather",
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_date(now),
            Style::default().fg(colors::PRIMARY),
        )),
        Line::from(Span::styled(
            format_time(now),
            Style::default().fg(colors::SECONDARY),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Renders the city input with a spinner while loading
fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .title(Span::styled(" City ", Style::default().fg(colors::PRIMARY)));

    let mut spans = vec![Span::styled("\u{1F50D} ", Style::default().fg(colors::ACCENT))];
    if app.input.is_empty() {
        spans.push(Span::styled(
            "Enter city name...",
            Style::default().fg(colors::SECONDARY),
        ));
    } else {
        spans.push(Span::styled(
            app.input.clone(),
            Style::default().fg(colors::PRIMARY),
        ));
    }
    spans.push(Span::styled(
        "\u{2588}",
        Style::default().fg(colors::SECONDARY),
    ));
    if app.loading {
        spans.push(Span::styled(
            format!("  {} Loading", backdrop::spinner(app.frame)),
            Style::default().fg(colors::ACCENT),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Renders the key hint line
fn render_hints(frame: &mut Frame, area: Rect) {
    let hint = Line::from(vec![
        Span::styled("Enter", Style::default().fg(colors::ACCENT)),
        Span::styled(" search   ", Style::default().fg(colors::SECONDARY)),
        Span::styled("Ctrl+L", Style::default().fg(colors::ACCENT)),
        Span::styled(" use current location   ", Style::default().fg(colors::SECONDARY)),
        Span::styled("F1", Style::default().fg(colors::ACCENT)),
        Span::styled(" help", Style::default().fg(colors::SECONDARY)),
    ]);
    frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), area);
}

/// Renders the error box
fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::ERROR));

    let line = Line::from(vec![
        Span::styled("\u{26A0} ", Style::default().fg(colors::ERROR)),
        Span::styled(message.to_string(), Style::default().fg(colors::PRIMARY)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Renders the current conditions card
fn render_card(frame: &mut Frame, area: Rect, result: &WeatherResult) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER));

    let icon = result.condition.icon();
    let description = result
        .description
        .as_deref()
        .map(title_case)
        .unwrap_or_default();

    let lines = vec![
        Line::from(vec![
            Span::styled("\u{1F4CD} ", Style::default().fg(colors::ERROR)),
            Span::styled(
                location_label(result),
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{}  ", icon.glyph())),
            Span::styled(
                format_temperature(result.temperature),
                Style::default()
                    .fg(temperature_color(result.temperature))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            description,
            Style::default().fg(colors::PRIMARY),
        )),
        Line::from(Span::styled(
            format!("Feels like {}", format_temperature(result.feels_like)),
            Style::default().fg(colors::SECONDARY),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

/// Renders the four detail tiles
fn render_details(frame: &mut Frame, area: Rect, result: &WeatherResult) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let aux = aux_metric(result);

    render_tile(frame, tiles[0], "\u{1F4A8}", "Wind Speed", format_wind(result.wind_speed));
    render_tile(
        frame,
        tiles[1],
        "\u{1F4A7}",
        "Humidity",
        result
            .humidity
            .map(|h| format!("{}%", h))
            .unwrap_or_else(|| MISSING.to_string()),
    );
    render_tile(frame, tiles[2], "\u{1F441}", aux.label(), aux.value());
    render_tile(
        frame,
        tiles[3],
        "\u{1F321}",
        "Feels Like",
        format_temperature(result.feels_like),
    );
}

fn render_tile(frame: &mut Frame, area: Rect, icon: &str, label: &str, value: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER));

    let lines = vec![
        Line::from(icon.to_string()),
        Line::from(Span::styled(
            value,
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(colors::SECONDARY),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

/// Shown before anything has been fetched
fn render_idle(frame: &mut Frame, area: Rect) {
    let text = Paragraph::new("Search for a city to see its weather")
        .style(Style::default().fg(colors::SECONDARY))
        .alignment(Alignment::Center);
    frame.render_widget(text, area);
}

fn render_footer(frame: &mut Frame, area: Rect, theme: ThemeId) {
    let footer = Paragraph::new(format!("Powered by OpenWeatherMap API \u{00B7} {}", theme.as_str()))
        .style(Style::default().fg(colors::SECONDARY))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// The auxiliary tile: visibility when reported, otherwise pressure
#[derive(Debug, Clone, PartialEq)]
pub enum AuxMetric {
    /// Visibility in kilometers
    Visibility(f64),
    /// Pressure in hPa
    Pressure(i32),
    /// Neither was reported
    Unavailable,
}

impl AuxMetric {
    pub fn label(&self) -> &'static str {
        match self {
            AuxMetric::Visibility(_) => "Visibility",
            AuxMetric::Pressure(_) | AuxMetric::Unavailable => "Pressure",
        }
    }

    pub fn value(&self) -> String {
        match self {
            AuxMetric::Visibility(km) => format!("{:.1} km", km),
            AuxMetric::Pressure(hpa) => format!("{} hPa", hpa),
            AuxMetric::Unavailable => MISSING.to_string(),
        }
    }
}

/// Picks the auxiliary metric for a result
pub fn aux_metric(result: &WeatherResult) -> AuxMetric {
    match (result.visibility, result.pressure) {
        (Some(meters), _) => AuxMetric::Visibility(meters as f64 / 1000.0),
        (None, Some(hpa)) => AuxMetric::Pressure(hpa),
        (None, None) => AuxMetric::Unavailable,
    }
}

/// Rounds half up, so 18.5 -> 19 and -2.5 -> -2
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Formats a temperature as whole degrees, e.g. "18°C"
pub fn format_temperature(celsius: f64) -> String {
    format!("{}\u{00B0}C", round_half_up(celsius))
}

/// Formats a wind speed as reported, e.g. "3.5 m/s" or "4 m/s"
pub fn format_wind(speed: Option<f64>) -> String {
    speed
        .map(|s| format!("{} m/s", s))
        .unwrap_or_else(|| MISSING.to_string())
}

/// Long date, e.g. "Monday, October 19, 2026"
pub fn format_date(now: DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

/// 12-hour time with seconds, e.g. "3:04:05 PM"
pub fn format_time(now: DateTime<Local>) -> String {
    now.format("%-I:%M:%S %p").to_string()
}

/// "London, GB", or just the name when no country is reported
pub fn location_label(result: &WeatherResult) -> String {
    let name = if result.location.is_empty() {
        "Unknown location"
    } else {
        result.location.as_str()
    };
    match &result.country {
        Some(country) if !country.is_empty() => format!("{}, {}", name, country),
        _ => name.to_string(),
    }
}

/// Capitalizes the first letter of every word
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the color for a temperature value
fn temperature_color(temp: f64) -> Color {
    if temp >= 30.0 {
        Color::Red
    } else if temp >= 25.0 {
        Color::LightRed
    } else if temp >= 20.0 {
        Color::Yellow
    } else if temp >= 10.0 {
        Color::White
    } else if temp >= 0.0 {
        Color::Cyan
    } else {
        Color::LightBlue
    }
}
