//! Application state management for weatherview
//!
//! This module contains the view state, handling keyboard input, fetch
//! lifecycle transitions and stale-response filtering.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::data::{FetchError, WeatherQuery, WeatherResult};
use crate::dispatch::{Effect, FetchOutcome};

/// Where the view is in the fetch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    /// Nothing fetched yet, nothing failed
    Idle,
    /// A request is in flight
    Loading,
    /// The last request produced a result
    Success,
    /// The last request failed
    Failed,
}

/// Main application struct managing view state
#[derive(Debug)]
pub struct App {
    /// Text typed into the search box
    pub input: String,
    /// True while the latest request is unresolved
    pub loading: bool,
    /// User-facing message from the last failure
    pub error: Option<String>,
    /// Result of the last successful fetch
    pub result: Option<WeatherResult>,
    /// Time shown in the header
    pub now: DateTime<Local>,
    /// Animation frame, advanced on every clock tick
    pub frame: u64,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Whether a location provider is available
    location_supported: bool,
    /// Sequence number of the most recent request
    seq: u64,
    /// City fetched once at startup, if configured
    initial_city: Option<String>,
}

impl App {
    /// Creates a new App instance in the idle state
    pub fn new(location_supported: bool) -> Self {
        Self {
            input: String::new(),
            loading: false,
            error: None,
            result: None,
            now: Local::now(),
            frame: 0,
            show_help: false,
            should_quit: false,
            location_supported,
            seq: 0,
            initial_city: None,
        }
    }

    /// Sets a city to fetch as soon as the app starts
    pub fn with_initial_city(mut self, city: impl Into<String>) -> Self {
        let city = city.into();
        self.input = city.clone();
        self.initial_city = Some(city);
        self
    }

    /// Returns the effect for the configured startup city, if any
    pub fn initial_effect(&mut self) -> Option<Effect> {
        let city = self.initial_city.take()?;
        self.begin_city_fetch(&city)
    }

    /// Current lifecycle state, derived from the fields
    pub fn status(&self) -> ViewStatus {
        if self.loading {
            ViewStatus::Loading
        } else if self.error.is_some() {
            ViewStatus::Failed
        } else if self.result.is_some() {
            ViewStatus::Success
        } else {
            ViewStatus::Idle
        }
    }

    /// Sequence number of the most recent request
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Submits the search box contents
    ///
    /// Blank input is ignored: no effect, no state change.
    pub fn submit_city(&mut self) -> Option<Effect> {
        let city = self.input.clone();
        self.begin_city_fetch(&city)
    }

    fn begin_city_fetch(&mut self, city: &str) -> Option<Effect> {
        let query = match WeatherQuery::city(city) {
            Ok(query) => query,
            Err(err) => {
                debug!(error = %err, "ignoring blank city submission");
                return None;
            }
        };

        let seq = self.begin_request();
        info!(seq, ?query, "fetching weather");
        Some(Effect::Fetch { seq, query })
    }

    /// Requests weather for the device location
    ///
    /// Without a location provider the view fails immediately and no
    /// effect is returned.
    pub fn request_location(&mut self) -> Option<Effect> {
        if !self.location_supported {
            // Invalidate anything still in flight
            self.seq += 1;
            self.fail(&FetchError::GeolocationUnsupported);
            return None;
        }

        let seq = self.begin_request();
        info!(seq, "fetching weather for current location");
        Some(Effect::Locate { seq })
    }

    /// Enters the loading state and returns the new request's number
    fn begin_request(&mut self) -> u64 {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        self.result = None;
        self.seq
    }

    /// Applies a finished request
    ///
    /// Returns false if the outcome belongs to a superseded request and was
    /// discarded.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq != self.seq {
            debug!(
                stale = outcome.seq,
                current = self.seq,
                "discarding stale weather response"
            );
            return false;
        }

        match outcome.result {
            Ok(result) => {
                self.loading = false;
                self.error = None;
                self.result = Some(result);
            }
            Err(err) => self.fail(&err),
        }
        true
    }

    fn fail(&mut self, err: &FetchError) {
        info!(error = %err, "weather request failed");
        self.loading = false;
        self.result = None;
        self.error = Some(err.to_string());
    }

    /// Records a clock tick
    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.now = now;
        self.frame = self.frame.wrapping_add(1);
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - printable keys: edit the search box
    /// - `Backspace`: delete the last character
    /// - `Enter`: search for the typed city
    /// - `Ctrl+L`: use the current location
    /// - `F1`: toggle help
    /// - `Esc`: close help, or quit
    /// - `Ctrl+C`: quit
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Option<Effect> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::F(1) => self.show_help = false,
                KeyCode::Char('c') if ctrl => self.should_quit = true,
                _ => {}
            }
            return None;
        }

        match key_event.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('l') if ctrl => self.request_location(),
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                None
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter => self.submit_city(),
            KeyCode::F(1) => {
                self.show_help = true;
                None
            }
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Condition;
    use chrono::Utc;

    /// Helper to create a KeyEvent for testing
    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key_event(KeyCode::Char(c)));
        }
    }

    fn sample_result(location: &str) -> WeatherResult {
        WeatherResult {
            location: location.to_string(),
            country: Some("GB".to_string()),
            condition: Condition::Clear,
            description: Some("clear sky".to_string()),
            temperature: 18.4,
            feels_like: 17.9,
            humidity: Some(65),
            pressure: Some(1013),
            wind_speed: Some(3.5),
            visibility: Some(10000),
            fetched_at: Utc::now(),
        }
    }

    fn success(seq: u64, location: &str) -> FetchOutcome {
        FetchOutcome {
            seq,
            result: Ok(sample_result(location)),
        }
    }

    fn failure(seq: u64, err: FetchError) -> FetchOutcome {
        FetchOutcome {
            seq,
            result: Err(err),
        }
    }

    fn assert_settled(app: &App) {
        assert!(!app.loading);
        assert!(
            app.error.is_some() != app.result.is_some(),
            "exactly one of error and result must be set"
        );
    }

    #[test]
    fn test_initial_state_is_idle() {
        let app = App::new(true);
        assert_eq!(app.status(), ViewStatus::Idle);
        assert!(app.input.is_empty());
        assert!(!app.loading);
        assert!(app.error.is_none());
        assert!(app.result.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut app = App::new(true);
        type_text(&mut app, "   ");

        let effect = app.handle_key(key_event(KeyCode::Enter));

        assert!(effect.is_none());
        assert!(!app.loading);
        assert_eq!(app.status(), ViewStatus::Idle);
        assert_eq!(app.seq(), 0);
    }

    #[test]
    fn test_blank_submit_keeps_previous_error() {
        let mut app = App::new(true);
        app.input = "Nowhere123".to_string();
        let Some(Effect::Fetch { seq, .. }) = app.submit_city() else {
            panic!("expected a fetch effect");
        };
        app.apply_outcome(failure(seq, FetchError::NotFound));

        app.input = " ".to_string();
        assert!(app.submit_city().is_none());
        assert_eq!(app.error.as_deref(), Some("City not found"));
        assert_eq!(app.status(), ViewStatus::Failed);
    }

    #[test]
    fn test_submit_enters_loading_with_trimmed_query() {
        let mut app = App::new(true);
        type_text(&mut app, "  London ");

        let effect = app.handle_key(key_event(KeyCode::Enter));

        assert_eq!(
            effect,
            Some(Effect::Fetch {
                seq: 1,
                query: WeatherQuery::City {
                    name: "London".to_string()
                },
            })
        );
        assert!(app.loading);
        assert_eq!(app.status(), ViewStatus::Loading);
    }

    #[test]
    fn test_entering_loading_clears_error() {
        let mut app = App::new(true);
        app.error = Some("City not found".to_string());
        app.input = "Paris".to_string();

        app.submit_city();

        assert!(app.error.is_none());
        assert!(app.loading);
    }

    #[test]
    fn test_successful_fetch_populates_result() {
        let mut app = App::new(true);
        app.input = "London".to_string();
        app.submit_city();

        assert!(app.apply_outcome(success(1, "London")));

        assert_settled(&app);
        assert_eq!(app.status(), ViewStatus::Success);
        assert_eq!(app.result.as_ref().unwrap().location, "London");
    }

    #[test]
    fn test_new_fetch_clears_previous_result() {
        let mut app = App::new(true);
        app.input = "London".to_string();
        app.submit_city();
        app.apply_outcome(success(1, "London"));

        app.input = "Paris".to_string();
        assert!(app.submit_city().is_some());

        assert!(app.loading);
        assert!(app.result.is_none());
        assert!(app.error.is_none());
        assert_eq!(app.status(), ViewStatus::Loading);
    }

    #[test]
    fn test_failed_fetch_clears_result() {
        let mut app = App::new(true);
        app.input = "London".to_string();
        app.submit_city();
        app.apply_outcome(success(1, "London"));

        app.input = "Nowhere123".to_string();
        app.submit_city();
        assert!(app.apply_outcome(failure(2, FetchError::NotFound)));

        assert_settled(&app);
        assert_eq!(app.status(), ViewStatus::Failed);
        assert!(app.result.is_none());
        assert_eq!(app.error.as_deref(), Some("City not found"));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut app = App::new(true);

        app.input = "Paris".to_string();
        let a = app.submit_city();
        app.input = "Berlin".to_string();
        let b = app.submit_city();
        assert!(matches!(a, Some(Effect::Fetch { seq: 1, .. })));
        assert!(matches!(b, Some(Effect::Fetch { seq: 2, .. })));

        // B resolves first, then A arrives late
        assert!(app.apply_outcome(success(2, "Berlin")));
        assert!(!app.apply_outcome(failure(1, FetchError::NotFound)));

        assert_settled(&app);
        assert_eq!(app.result.as_ref().unwrap().location, "Berlin");
        assert!(app.error.is_none());
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut app = App::new(true);
        app.input = "Paris".to_string();
        app.submit_city();
        app.input = "Berlin".to_string();
        app.submit_city();

        assert!(!app.apply_outcome(success(1, "Paris")));

        assert!(app.loading);
        assert!(app.result.is_none());
    }

    #[test]
    fn test_location_unsupported_fails_immediately() {
        let mut app = App::new(false);

        let effect = app.handle_key(ctrl('l'));

        assert!(effect.is_none());
        assert_settled(&app);
        assert_eq!(
            app.error.as_deref(),
            Some("Geolocation is not supported on this device")
        );
    }

    #[test]
    fn test_location_unsupported_invalidates_in_flight_request() {
        let mut app = App::new(false);
        app.input = "London".to_string();
        app.submit_city();

        app.request_location();
        assert!(!app.apply_outcome(success(1, "London")));

        assert!(app.result.is_none());
        assert_eq!(app.status(), ViewStatus::Failed);
    }

    #[test]
    fn test_location_request_enters_loading() {
        let mut app = App::new(true);
        app.error = Some("City not found".to_string());

        let effect = app.handle_key(ctrl('l'));

        assert_eq!(effect, Some(Effect::Locate { seq: 1 }));
        assert!(app.loading);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_location_denied_shows_message() {
        let mut app = App::new(true);
        let Some(Effect::Locate { seq }) = app.request_location() else {
            panic!("expected a locate effect");
        };

        app.apply_outcome(failure(seq, FetchError::GeolocationDenied));

        assert_settled(&app);
        assert_eq!(
            app.error.as_deref(),
            Some("Unable to retrieve your location")
        );
    }

    #[test]
    fn test_initial_city_produces_one_effect() {
        let mut app = App::new(true).with_initial_city("London");
        assert_eq!(app.input, "London");

        assert!(matches!(
            app.initial_effect(),
            Some(Effect::Fetch { seq: 1, .. })
        ));
        assert!(app.initial_effect().is_none());
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut app = App::new(true);
        type_text(&mut app, "Osloo");
        app.handle_key(key_event(KeyCode::Backspace));
        assert_eq!(app.input, "Oslo");

        app.handle_key(ctrl('u'));
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(true);
        app.handle_key(ctrl('c'));
        assert!(app.should_quit);

        let mut app = App::new(true);
        app.handle_key(key_event(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = App::new(true);
        app.handle_key(key_event(KeyCode::F(1)));
        assert!(app.show_help);

        type_text(&mut app, "abc");
        assert!(app.input.is_empty());

        app.handle_key(key_event(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tick_advances_clock_and_frame() {
        let mut app = App::new(true);
        let later = app.now + chrono::Duration::seconds(5);

        app.on_tick(later);

        assert_eq!(app.now, later);
        assert_eq!(app.frame, 1);
    }
}
