//! Core data models for weatherview
//!
//! This module contains the query and result types exchanged between the
//! weather client and the view, plus the error taxonomy for fetches.

pub mod weather;

pub use weather::{HealthStatus, WeatherClient};

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while acquiring a location or fetching weather.
///
/// The `Display` text of each variant is the short message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The query was rejected locally, before any network call
    #[error("{0}")]
    Validation(String),

    /// The backend answered a city lookup with a non-success status
    #[error("City not found")]
    NotFound,

    /// The backend answered a coordinates lookup with a non-success status
    #[error("Failed to get weather for current location")]
    LocationUnavailable,

    /// Transport, body or payload failure. The detail is kept for logging.
    #[error("Failed to fetch weather data")]
    Network(String),

    /// No location provider is available on this device
    #[error("Geolocation is not supported on this device")]
    GeolocationUnsupported,

    /// The location provider refused or failed to resolve a position
    #[error("Unable to retrieve your location")]
    GeolocationDenied,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Network(format!("invalid weather payload: {}", err))
    }
}

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Creates validated coordinates.
    ///
    /// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self, FetchError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(FetchError::Validation(format!(
                "Latitude {} is out of range",
                lat
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(FetchError::Validation(format!(
                "Longitude {} is out of range",
                lon
            )));
        }
        Ok(Self { lat, lon })
    }
}

/// What to fetch weather for
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    /// Lookup by free-text city name (stored trimmed)
    City { name: String },
    /// Lookup by position
    Coordinates(Coordinates),
}

impl WeatherQuery {
    /// Builds a city query, rejecting names that are empty after trimming
    pub fn city(name: &str) -> Result<Self, FetchError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(FetchError::Validation(
                "Please enter a city name".to_string(),
            ));
        }
        Ok(WeatherQuery::City {
            name: trimmed.to_string(),
        })
    }

    /// Builds a coordinates query from raw degrees
    pub fn coordinates(lat: f64, lon: f64) -> Result<Self, FetchError> {
        Coordinates::new(lat, lon).map(WeatherQuery::Coordinates)
    }
}

/// Primary weather condition reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    Other,
}

/// Condition codes as the backend spells them (compared case-insensitively)
const CONDITION_CODES: [(&str, Condition); 6] = [
    ("clear", Condition::Clear),
    ("clouds", Condition::Clouds),
    ("rain", Condition::Rain),
    ("drizzle", Condition::Drizzle),
    ("snow", Condition::Snow),
    ("thunderstorm", Condition::Thunderstorm),
];

impl Condition {
    /// Parses a condition code, case-insensitively.
    ///
    /// Unrecognized codes map to `Condition::Other`.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        CONDITION_CODES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(code))
            .map(|(_, condition)| *condition)
            .unwrap_or(Condition::Other)
    }

    /// Returns the lowercase code for this condition
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Clear => "clear",
            Condition::Clouds => "clouds",
            Condition::Rain => "rain",
            Condition::Drizzle => "drizzle",
            Condition::Snow => "snow",
            Condition::Thunderstorm => "thunderstorm",
            Condition::Other => "other",
        }
    }
}

/// Normalized weather observation, built fresh on every successful fetch
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResult {
    /// Location name as reported by the backend (empty if absent)
    pub location: String,
    /// ISO country code, if reported
    pub country: Option<String>,
    /// Primary condition
    pub condition: Condition,
    /// Human-readable description, e.g. "scattered clouds"
    pub description: Option<String>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: Option<u8>,
    /// Sea-level pressure in hPa
    pub pressure: Option<i32>,
    /// Wind speed in m/s
    pub wind_speed: Option<f64>,
    /// Visibility in meters
    pub visibility: Option<u32>,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}
