//! Hoodie comfort scoring.
//!
//! Maps a weather observation to a score in [0, 1] (0 = ideal hoodie
//! weather, 1 = unsuitable) and a recommendation string. Deterministic and
//! total: a missing observation degrades to a neutral placeholder, never
//! an error.

use serde::{Deserialize, Serialize};

use hoodie_weather::WeatherObservation;

const NEUTRAL_SCORE: f64 = 0.5;

const MSG_CHECKING: &str = "Checking conditions...";
const MSG_PERFECT: &str = "Perfect hoodie weather! 👍";
const MSG_GREAT: &str = "Great for a hoodie! 😊";
const MSG_GOOD: &str = "Good for a light hoodie 👌";
const MSG_WARM: &str = "A bit warm for a hoodie 🌡️";
const MSG_HOT: &str = "Too hot for a hoodie ☀️";
const MSG_COLD: &str = "Perfect for a thick hoodie! 🧥";
const MSG_FREEZING: &str = "Bundle up! Extra layers needed! ❄️";
const MSG_SNOW: &str = "Perfect hoodie weather for snow! ❄️🧥";
const MSG_RAIN: &str = "Great hoodie weather for rain! 🌧️👍";

/// Score plus recommendation, derived entirely from one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComfortResult {
    /// Always in [0, 1] regardless of intermediate arithmetic.
    pub score: f64,
    pub recommendation: String,
}

/// Coarse bucketing of a comfort score for display accents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComfortCategory {
    Excellent,
    Good,
    Poor,
}

impl ComfortCategory {
    pub fn from_score(score: f64) -> Self {
        if score < 0.33 {
            Self::Excellent
        } else if score < 0.66 {
            Self::Good
        } else {
            Self::Poor
        }
    }
}

/// Score an observation. `None` yields the neutral placeholder result.
pub fn score(observation: Option<&WeatherObservation>) -> ComfortResult {
    let Some(obs) = observation else {
        return ComfortResult {
            score: NEUTRAL_SCORE,
            recommendation: MSG_CHECKING.to_string(),
        };
    };

    let raw = temperature_score(obs.temperature_c)
        + wind_adjustment(obs.wind_speed_ms)
        + precipitation_adjustment(obs)
        + humidity_adjustment(obs.humidity_pct);
    let score = raw.clamp(0.0, 1.0);

    ComfortResult {
        score,
        recommendation: recommendation(obs, score).to_string(),
    }
}

/// Base score: monotonic step function of temperature in °C.
fn temperature_score(temp: f64) -> f64 {
    if temp < -5.0 {
        0.0
    } else if temp < 0.0 {
        0.1
    } else if temp < 10.0 {
        0.15
    } else if temp < 15.0 {
        0.2
    } else if temp < 22.0 {
        0.3
    } else if temp < 28.0 {
        0.7
    } else if temp < 35.0 {
        0.85
    } else {
        0.95
    }
}

// Wind makes a hoodie relatively more desirable, lowering the score.
fn wind_adjustment(wind_speed_ms: f64) -> f64 {
    if wind_speed_ms > 10.0 {
        -0.2
    } else if wind_speed_ms > 5.0 {
        -0.1
    } else {
        0.0
    }
}

fn precipitation_adjustment(obs: &WeatherObservation) -> f64 {
    if obs.has_snow() {
        -0.15
    } else if obs.has_rain() {
        -0.1
    } else {
        0.0
    }
}

fn humidity_adjustment(humidity_pct: u8) -> f64 {
    if humidity_pct > 85 {
        0.15
    } else if humidity_pct > 75 {
        0.1
    } else {
        0.0
    }
}

// First match wins; extreme cold and precipitation trump the score buckets.
fn recommendation(obs: &WeatherObservation, score: f64) -> &'static str {
    if obs.temperature_c < -10.0 {
        MSG_FREEZING
    } else if obs.temperature_c < 0.0 {
        MSG_COLD
    } else if obs.has_snow() {
        MSG_SNOW
    } else if obs.has_rain() && obs.temperature_c < 20.0 {
        MSG_RAIN
    } else if score < 0.25 {
        MSG_PERFECT
    } else if score < 0.4 {
        MSG_GREAT
    } else if score < 0.6 {
        MSG_GOOD
    } else if score < 0.8 {
        MSG_WARM
    } else {
        MSG_HOT
    }
}

/// Multi-line breakdown of how each factor reads for hoodie wear.
pub fn detailed_analysis(observation: Option<&WeatherObservation>) -> String {
    let Some(obs) = observation else {
        return "No weather data available".to_string();
    };

    let mut lines = Vec::new();

    if obs.temperature_c < 5.0 {
        lines.push("🌡️ Cold temperature - perfect for hoodie");
    } else if obs.temperature_c < 20.0 {
        lines.push("🌡️ Mild temperature - good for hoodie");
    } else if obs.temperature_c < 30.0 {
        lines.push("🌡️ Warm temperature - light hoodie only");
    } else {
        lines.push("🌡️ Hot temperature - avoid hoodie");
    }

    if obs.wind_speed_ms > 7.0 {
        lines.push("💨 Windy conditions - hoodie recommended");
    } else if obs.wind_speed_ms > 3.0 {
        lines.push("💨 Light breeze - hoodie comfortable");
    }

    if obs.humidity_pct > 80 {
        lines.push("💧 High humidity - may feel stuffy in hoodie");
    } else if obs.humidity_pct < 30 {
        lines.push("💧 Low humidity - hoodie very comfortable");
    }

    if obs.has_rain() {
        lines.push("🌧️ Rain detected - hoodie provides good coverage");
    }
    if obs.has_snow() {
        lines.push("❄️ Snow conditions - hoodie highly recommended");
    }

    lines.join("\n")
}
