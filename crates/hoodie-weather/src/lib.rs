//! Weather acquisition for the hoodie widget.
//!
//! Normalizes three public HTTP services (geo-IP lookup, free-text
//! geocoding, current-conditions forecast) into the widget's own types,
//! and provides the synthetic fallback observation used when any live
//! call fails.

pub mod demo;
pub mod provider;
pub mod types;

pub use demo::{demo_location, generate_demo_observation};
pub use provider::{Endpoints, WeatherProvider};
pub use types::{FetchError, Location, Precipitation, WeatherObservation};
