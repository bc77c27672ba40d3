//! Command-line interface parsing for weatherview
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into a validated `StartupConfig`: the backend base URL, an optional city
//! to load on start, an optional device location and logging settings.

use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::data::Coordinates;

/// Backend used when neither `--base-url` nor `WEATHER_API_URL` is given
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The base URL could not be parsed or cannot carry a path
    #[error("Invalid base URL: '{0}'. Expected something like http://localhost:8080")]
    InvalidBaseUrl(String),

    /// The location is not a valid "LAT,LON" pair
    #[error("Invalid location: '{0}'. Expected LAT,LON with -90..90 and -180..180")]
    InvalidLocation(String),

    /// The startup city is blank
    #[error("Invalid city: the name must not be empty")]
    EmptyCity,
}

/// weatherview - current weather for a city or your location
#[derive(Parser, Debug)]
#[command(name = "weatherview")]
#[command(about = "Current weather for a city or your location")]
#[command(version)]
pub struct Cli {
    /// Base URL of the weather backend
    #[arg(long, env = "WEATHER_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// City to load on startup
    ///
    /// Without it the screen starts empty.
    #[arg(long, value_name = "NAME")]
    pub city: Option<String>,

    /// Position reported as the current location, e.g. 51.5,-0.12
    ///
    /// Without it, "use current location" reports that geolocation is
    /// not supported.
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub location: Option<String>,

    /// File to write logs to (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level filter, e.g. info, debug, weatherview=trace
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Check that the backend is healthy and exit
    #[arg(long)]
    pub check: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Backend base URL
    pub base_url: Url,
    /// City to fetch on startup (trimmed)
    pub initial_city: Option<String>,
    /// Fixed device location, if one was given
    pub location: Option<Coordinates>,
    /// Explicit log file path
    pub log_file: Option<PathBuf>,
    /// Log level filter directive
    pub log_level: String,
    /// Run the health check instead of the UI
    pub check_only: bool,
}

/// Parses a base URL argument.
///
/// # Returns
/// * `Ok(Url)` if the string is an http(s) URL that can carry a path
/// * `Err(CliError::InvalidBaseUrl)` otherwise
pub fn parse_base_url_arg(s: &str) -> Result<Url, CliError> {
    let url = Url::parse(s.trim()).map_err(|_| CliError::InvalidBaseUrl(s.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(CliError::InvalidBaseUrl(s.to_string()));
    }
    Ok(url)
}

/// Parses a "LAT,LON" location argument.
///
/// # Returns
/// * `Ok(Coordinates)` if both parts parse and are in range
/// * `Err(CliError::InvalidLocation)` otherwise
pub fn parse_location_arg(s: &str) -> Result<Coordinates, CliError> {
    let invalid = || CliError::InvalidLocation(s.to_string());

    let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

    Coordinates::new(lat, lon).map_err(|_| invalid())
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated settings
    /// * `Err(CliError)` if any argument is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let base_url = parse_base_url_arg(&cli.base_url)?;

        let initial_city = match &cli.city {
            None => None,
            Some(city) if city.trim().is_empty() => return Err(CliError::EmptyCity),
            Some(city) => Some(city.trim().to_string()),
        };

        let location = cli
            .location
            .as_deref()
            .map(parse_location_arg)
            .transpose()?;

        Ok(StartupConfig {
            base_url,
            initial_city,
            location,
            log_file: cli.log_file.clone(),
            log_level: cli.log_level.clone(),
            check_only: cli.check,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_arg_valid() {
        let url = parse_base_url_arg("http://localhost:8080").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/");

        let url = parse_base_url_arg("https://weather.example.com/backend/").unwrap();
        assert_eq!(url.path(), "/backend/");
    }

    #[test]
    fn test_parse_base_url_arg_invalid() {
        assert!(parse_base_url_arg("not a url").is_err());
        assert!(parse_base_url_arg("mailto:someone@example.com").is_err());
        assert!(parse_base_url_arg("ftp://example.com").is_err());

        let err = parse_base_url_arg("nope").unwrap_err();
        assert!(err.to_string().contains("Invalid base URL"));
    }

    #[test]
    fn test_parse_location_arg_valid() {
        let coords = parse_location_arg("51.5,-0.12").unwrap();
        assert_eq!(coords.lat, 51.5);
        assert_eq!(coords.lon, -0.12);

        let coords = parse_location_arg(" -33.87 , 151.21 ").unwrap();
        assert_eq!(coords.lat, -33.87);
        assert_eq!(coords.lon, 151.21);
    }

    #[test]
    fn test_parse_location_arg_invalid() {
        assert!(parse_location_arg("51.5").is_err());
        assert!(parse_location_arg("north,west").is_err());
        assert!(parse_location_arg("91,0").is_err());
        assert!(parse_location_arg("0,181").is_err());

        let err = parse_location_arg("abc").unwrap_err();
        assert!(err.to_string().contains("Invalid location"));
    }

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["weatherview", "--base-url", DEFAULT_BASE_URL]);
        assert!(cli.city.is_none());
        assert!(cli.location.is_none());
        assert!(cli.log_file.is_none());
        assert_eq!(cli.log_level, "info");
        assert!(!cli.check);
    }

    #[test]
    fn test_cli_parse_negative_location() {
        let cli = Cli::parse_from(["weatherview", "--location", "-33.87,151.21"]);
        assert_eq!(cli.location.as_deref(), Some("-33.87,151.21"));
    }

    #[test]
    fn test_startup_config_from_cli() {
        let cli = Cli::parse_from([
            "weatherview",
            "--base-url",
            "http://10.0.0.2:9000",
            "--city",
            "  London ",
            "--location",
            "51.5,-0.12",
            "--check",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        assert_eq!(config.base_url.as_str(), "http://10.0.0.2:9000/");
        assert_eq!(config.initial_city.as_deref(), Some("London"));
        assert_eq!(config.location, Some(Coordinates { lat: 51.5, lon: -0.12 }));
        assert!(config.check_only);
    }

    #[test]
    fn test_startup_config_blank_city() {
        let cli = Cli::parse_from(["weatherview", "--city", "   "]);
        let result = StartupConfig::from_cli(&cli);
        assert!(matches!(result, Err(CliError::EmptyCity)));
    }

    #[test]
    fn test_startup_config_invalid_location() {
        let cli = Cli::parse_from(["weatherview", "--location", "200,0"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(matches!(result, Err(CliError::InvalidLocation(_))));
    }
}
