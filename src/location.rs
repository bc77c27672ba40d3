//! Device location providers
//!
//! The view never reads a position itself. It asks a `LocationProvider`,
//! which either resolves coordinates, refuses, or reports that location is
//! not supported at all.

use async_trait::async_trait;

use crate::data::{Coordinates, FetchError};

/// Source of the user's current position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether this device can provide a position at all
    fn is_supported(&self) -> bool;

    /// Resolve the current position.
    ///
    /// Returns `FetchError::GeolocationDenied` when the position cannot be
    /// obtained, and `FetchError::GeolocationUnsupported` when the provider
    /// is not supported.
    async fn current_position(&self) -> Result<Coordinates, FetchError>;
}

/// A position configured up front, e.g. from `--location`
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, FetchError> {
        Ok(self.coordinates)
    }
}

/// No location capability on this device
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, FetchError> {
        Err(FetchError::GeolocationUnsupported)
    }
}
