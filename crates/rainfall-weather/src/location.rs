//! Geolocation capability used by current location mode.
//!
//! A request is single-shot: no tracking, no cancellation, no timeout beyond
//! whatever the platform applies.

use crate::types::{Coordinates, LocationError};

#[allow(async_fn_in_trait)]
pub trait Geolocator {
    /// Whether the host exposes a geolocation capability at all
    fn is_supported(&self) -> bool;

    /// Request the current position once
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Reports a preconfigured position, e.g. from the `[location]` config section.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    coords: Coordinates,
}

impl FixedGeolocator {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coords: Coordinates {
                latitude,
                longitude,
            },
        }
    }
}

impl Geolocator for FixedGeolocator {
    fn is_supported(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        tracing::debug!(
            "Reporting fixed position {}, {}",
            self.coords.latitude,
            self.coords.longitude
        );
        Ok(self.coords)
    }
}

/// A host without any geolocation capability
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl Geolocator for NoGeolocation {
    fn is_supported(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PositionUnavailable(
            "Geolocation is not available".to_string(),
        ))
    }
}

/// Either a fixed position or none, chosen at startup from configuration.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredGeolocator {
    Fixed(FixedGeolocator),
    Unsupported(NoGeolocation),
}

impl ConfiguredGeolocator {
    pub fn from_position(position: Option<(f64, f64)>) -> Self {
        match position {
            Some((latitude, longitude)) => {
                Self::Fixed(FixedGeolocator::new(latitude, longitude))
            }
            None => Self::Unsupported(NoGeolocation),
        }
    }
}

impl Geolocator for ConfiguredGeolocator {
    fn is_supported(&self) -> bool {
        match self {
            Self::Fixed(g) => g.is_supported(),
            Self::Unsupported(g) => g.is_supported(),
        }
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match self {
            Self::Fixed(g) => g.current_position().await,
            Self::Unsupported(g) => g.current_position().await,
        }
    }
}
