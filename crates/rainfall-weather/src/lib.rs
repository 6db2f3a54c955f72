//! Weather data and prediction backend access for the rainfall form.
//!
//! Provides the seven-field parameter record, validated decoding of the
//! backend's loosely shaped JSON responses, the HTTP client for the three
//! backend endpoints, and the geolocation capability used by current
//! location mode.

pub mod client;
pub mod location;
pub mod types;

pub use client::{BackendClient, WeatherBackend};
pub use location::{ConfiguredGeolocator, FixedGeolocator, Geolocator, NoGeolocation};
pub use types::*;
