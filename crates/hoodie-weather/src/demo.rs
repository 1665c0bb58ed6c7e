//! Synthetic fallback observation, used whenever any live call fails.
//! The only resilience mechanism in the system: no retry, no backoff.

use chrono::Utc;
use rand::Rng;

use crate::types::{Location, Precipitation, WeatherObservation};

const DEMO_CONDITION: &str = "Demo";

/// Display name shown alongside a synthetic observation.
pub const DEMO_LOCATION_NAME: &str = "Demo Mode";

/// Produce a plausible synthetic reading with `is_demo = true`.
///
/// Temperature follows a 24h pseudo-cycle (15°C base rising to 25°C over
/// the day) plus small jitter; humidity, wind, and the occasional bout of
/// rain are randomized within plausible physical ranges.
pub fn generate_demo_observation() -> WeatherObservation {
    let mut rng = rand::rng();

    let now = Utc::now();
    let secs_of_day = now.timestamp().rem_euclid(86_400) as f64;
    let base_temp = 15.0 + secs_of_day / 86_400.0 * 10.0;

    let precipitation = if rng.random_bool(0.3) {
        Some(Precipitation::Rain(round1(rng.random_range(0.1..=2.0))))
    } else {
        None
    };

    WeatherObservation {
        temperature_c: round1(base_temp + rng.random_range(-2.0..=2.0)),
        humidity_pct: rng.random_range(45..=85),
        wind_speed_ms: round1(rng.random_range(1.0..=8.0)),
        precipitation,
        condition_text: DEMO_CONDITION.to_string(),
        is_demo: true,
        fetched_at: now,
    }
}

/// Placeholder location paired with demo observations.
pub fn demo_location() -> Location {
    Location {
        latitude: 0.0,
        longitude: 0.0,
        display_name: DEMO_LOCATION_NAME.to_string(),
        is_manual: false,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
