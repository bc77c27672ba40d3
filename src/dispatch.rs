//! Fetch dispatching
//!
//! Effects returned by the app are run here as tokio tasks. Each task
//! reports a `FetchOutcome` tagged with the request's sequence number, so
//! the app can drop responses that a newer request has superseded.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::data::{FetchError, WeatherClient, WeatherQuery, WeatherResult};
use crate::location::LocationProvider;

/// Side effects requested by the app
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch weather for a validated query
    Fetch { seq: u64, query: WeatherQuery },
    /// Resolve the device location, then fetch weather for it
    Locate { seq: u64 },
}

/// Result of one dispatched effect
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// Sequence number of the request this answers
    pub seq: u64,
    pub result: Result<WeatherResult, FetchError>,
}

/// Runs effects in the background and reports their outcomes
#[derive(Clone)]
pub struct Dispatcher {
    client: WeatherClient,
    location: Arc<dyn LocationProvider>,
    sender: mpsc::Sender<FetchOutcome>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("client", &self.client)
            .field("location_supported", &self.location.is_supported())
            .finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher and the channel its outcomes arrive on
    pub fn new(
        client: WeatherClient,
        location: Arc<dyn LocationProvider>,
    ) -> (Self, mpsc::Receiver<FetchOutcome>) {
        let (sender, receiver) = mpsc::channel(16);
        (
            Self {
                client,
                location,
                sender,
            },
            receiver,
        )
    }

    /// Whether the location provider can resolve a position
    pub fn location_supported(&self) -> bool {
        self.location.is_supported()
    }

    /// Spawns a task running the effect
    pub fn dispatch(&self, effect: Effect) {
        let this = self.clone();
        tokio::spawn(async move {
            let outcome = this.run(effect).await;
            // The receiver is gone only when the app is shutting down
            let _ = this.sender.send(outcome).await;
        });
    }

    /// Runs the effect to completion on the current task
    pub async fn run(&self, effect: Effect) -> FetchOutcome {
        match effect {
            Effect::Fetch { seq, query } => {
                debug!(seq, ?query, "dispatching fetch");
                FetchOutcome {
                    seq,
                    result: self.client.fetch(&query).await,
                }
            }
            Effect::Locate { seq } => {
                debug!(seq, "resolving device location");
                let result = match self.location.current_position().await {
                    Ok(coords) => {
                        self.client
                            .fetch(&WeatherQuery::Coordinates(coords))
                            .await
                    }
                    Err(err) => Err(err),
                };
                FetchOutcome { seq, result }
            }
        }
    }
}
