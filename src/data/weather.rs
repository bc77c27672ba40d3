//! Weather backend API client
//!
//! This module fetches current conditions from the weather backend
//! (`/api/weather/...`) and normalizes the payload into a `WeatherResult`.

use chrono::Utc;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use super::{Condition, Coordinates, FetchError, WeatherQuery, WeatherResult};

/// Backend health as reported by `/api/weather/health`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    /// Whether the backend reports itself as up
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

/// Client for the weather backend
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: Url,
}

impl WeatherClient {
    /// Create a new WeatherClient for the given backend base URL
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// The backend base URL this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch current weather for a city name
    ///
    /// Blank names are rejected without a network call. Any non-success
    /// status maps to `FetchError::NotFound`.
    pub async fn fetch_by_city(&self, name: &str) -> Result<WeatherResult, FetchError> {
        let query = WeatherQuery::city(name)?;
        self.fetch(&query).await
    }

    /// Fetch current weather for a position
    ///
    /// Out-of-range coordinates are rejected without a network call. Any
    /// non-success status maps to `FetchError::LocationUnavailable`.
    pub async fn fetch_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherResult, FetchError> {
        let query = WeatherQuery::coordinates(lat, lon)?;
        self.fetch(&query).await
    }

    /// Fetch current weather for an already validated query
    pub async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherResult, FetchError> {
        let (url, status_error) = match query {
            WeatherQuery::City { name } => (
                self.endpoint(&["api", "weather", "city", name.as_str()])?,
                FetchError::NotFound,
            ),
            WeatherQuery::Coordinates(Coordinates { lat, lon }) => {
                let mut url = self.endpoint(&["api", "weather", "coordinates"])?;
                url.query_pairs_mut()
                    .append_pair("lat", &lat.to_string())
                    .append_pair("lon", &lon.to_string());
                (url, FetchError::LocationUnavailable)
            }
        };

        debug!(%url, "requesting weather");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(%url, error = %e, "weather request failed");
            FetchError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "weather backend returned an error status");
            return Err(status_error);
        }

        let text = response.text().await?;
        parse_weather(&text).map_err(|e| {
            warn!(%url, error = ?e, "unusable weather payload");
            e
        })
    }

    /// Query the backend health endpoint
    pub async fn health(&self) -> Result<HealthStatus, FetchError> {
        let url = self.endpoint(&["api", "weather", "health"])?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "health check returned {}",
                status
            )));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Appends percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::Network(format!("base URL {} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Parse a backend weather payload into a WeatherResult
///
/// Every level of the payload is optional. Only the temperature pair is
/// required; a payload without it is rejected.
pub fn parse_weather(body: &str) -> Result<WeatherResult, FetchError> {
    let payload: WeatherPayload = serde_json::from_str(body)?;

    let main = payload.main.unwrap_or_default();
    let (temperature, feels_like) = match (main.temp, main.feels_like) {
        (Some(temp), Some(feels_like)) => (temp, feels_like),
        _ => {
            return Err(FetchError::Network(
                "payload is missing main.temp or main.feels_like".to_string(),
            ))
        }
    };

    let primary = payload.weather.unwrap_or_default().into_iter().next();
    let condition = primary
        .as_ref()
        .and_then(|w| w.main.as_deref())
        .map(Condition::from_code)
        .unwrap_or(Condition::Other);
    let description = primary.and_then(|w| w.description);

    Ok(WeatherResult {
        location: payload.name.unwrap_or_default(),
        country: payload.sys.and_then(|s| s.country),
        condition,
        description,
        temperature,
        feels_like,
        humidity: main.humidity.map(|h| h.round().clamp(0.0, 100.0) as u8),
        pressure: main.pressure.map(|p| p.round() as i32),
        wind_speed: payload.wind.and_then(|w| w.speed),
        visibility: payload
            .visibility
            .filter(|v| *v >= 0.0)
            .map(|v| v.round() as u32),
        fetched_at: Utc::now(),
    })
}

/// Weather backend response structure
///
/// Everything outside `main.temp`/`main.feels_like` is read with `lenient`:
/// a field of the wrong shape is treated as absent.
#[derive(Debug, Deserialize)]
struct WeatherPayload {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    sys: Option<SysSection>,
    #[serde(default, deserialize_with = "lenient")]
    weather: Option<Vec<ConditionEntry>>,
    #[serde(default, deserialize_with = "lenient")]
    main: Option<MainSection>,
    #[serde(default, deserialize_with = "lenient")]
    wind: Option<WindSection>,
    #[serde(default, deserialize_with = "lenient")]
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SysSection {
    #[serde(default, deserialize_with = "lenient")]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    #[serde(default, deserialize_with = "lenient")]
    main: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MainSection {
    temp: Option<f64>,
    feels_like: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WindSection {
    #[serde(default, deserialize_with = "lenient")]
    speed: Option<f64>,
}

/// Reads an optional field, mapping `null` or a mismatched type to `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}
