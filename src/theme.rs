//! Condition to icon and background theme mapping
//!
//! Both mappings are total: every condition, including unknown or missing
//! codes, resolves to an icon and a theme. Rain and drizzle share an icon
//! and a theme.

use crate::data::Condition;

/// Icon shown next to the temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    Sun,
    Cloud,
    CloudRain,
    CloudSnow,
    Lightning,
}

impl IconId {
    /// Stable identifier for this icon
    pub fn as_str(&self) -> &'static str {
        match self {
            IconId::Sun => "sun",
            IconId::Cloud => "cloud",
            IconId::CloudRain => "cloud-rain",
            IconId::CloudSnow => "cloud-snow",
            IconId::Lightning => "lightning",
        }
    }

    /// Terminal glyph for this icon
    pub fn glyph(&self) -> &'static str {
        match self {
            IconId::Sun => "\u{2600}",        // ☀
            IconId::Cloud => "\u{2601}",      // ☁
            IconId::CloudRain => "\u{1F327}", // 🌧
            IconId::CloudSnow => "\u{1F328}", // 🌨
            IconId::Lightning => "\u{26A1}",  // ⚡
        }
    }
}

/// Named background theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeId {
    Clear,
    Clouds,
    Rain,
    Snow,
    Storm,
    Default,
}

/// An RGB color stop
pub type Rgb = (u8, u8, u8);

impl ThemeId {
    /// Stable identifier for this theme
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Clear => "clear",
            ThemeId::Clouds => "clouds",
            ThemeId::Rain => "rain",
            ThemeId::Snow => "snow",
            ThemeId::Storm => "storm",
            ThemeId::Default => "default",
        }
    }

    /// Top, middle and bottom stops of the background gradient
    pub fn gradient(&self) -> [Rgb; 3] {
        match self {
            // blue-400 / blue-500 / blue-600
            ThemeId::Clear => [(96, 165, 250), (59, 130, 246), (37, 99, 235)],
            // gray-400 / gray-500 / gray-600
            ThemeId::Clouds => [(156, 163, 175), (107, 114, 128), (75, 85, 99)],
            // gray-600 / gray-700 / gray-800
            ThemeId::Rain => [(75, 85, 99), (55, 65, 81), (31, 41, 55)],
            // blue-200 / blue-300 / blue-400
            ThemeId::Snow => [(191, 219, 254), (147, 197, 253), (96, 165, 250)],
            // gray-800 / gray-900 / black
            ThemeId::Storm => [(31, 41, 55), (17, 24, 39), (0, 0, 0)],
            // blue-400 / purple-500 / pink-500
            ThemeId::Default => [(96, 165, 250), (168, 85, 247), (236, 72, 153)],
        }
    }
}

impl Condition {
    /// Icon for this condition. Unrecognized conditions get the sun.
    pub fn icon(&self) -> IconId {
        match self {
            Condition::Clear => IconId::Sun,
            Condition::Clouds => IconId::Cloud,
            Condition::Rain | Condition::Drizzle => IconId::CloudRain,
            Condition::Snow => IconId::CloudSnow,
            Condition::Thunderstorm => IconId::Lightning,
            Condition::Other => IconId::Sun,
        }
    }

    /// Background theme for this condition
    pub fn theme(&self) -> ThemeId {
        match self {
            Condition::Clear => ThemeId::Clear,
            Condition::Clouds => ThemeId::Clouds,
            Condition::Rain | Condition::Drizzle => ThemeId::Rain,
            Condition::Snow => ThemeId::Snow,
            Condition::Thunderstorm => ThemeId::Storm,
            Condition::Other => ThemeId::Default,
        }
    }
}

/// Icon for a raw condition code, case-insensitive
pub fn icon_for(code: Option<&str>) -> IconId {
    code.map(Condition::from_code)
        .unwrap_or(Condition::Other)
        .icon()
}

/// Background theme for a raw condition code, case-insensitive
pub fn theme_for(code: Option<&str>) -> ThemeId {
    code.map(Condition::from_code)
        .unwrap_or(Condition::Other)
        .theme()
}

/// Linear interpolation across the three gradient stops, `t` in `[0, 1]`
pub fn gradient_at(stops: [Rgb; 3], t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let (from, to, local) = if t <= 0.5 {
        (stops[0], stops[1], t * 2.0)
    } else {
        (stops[1], stops[2], (t - 0.5) * 2.0)
    };
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * local).round() as u8;
    (lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}
