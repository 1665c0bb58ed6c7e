use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic location with a human-readable name.
///
/// Either auto-detected from the user's IP (lives for one fetch cycle) or
/// entered manually and persisted in settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    #[serde(default)]
    pub is_manual: bool,
}

/// Precipitation normalized at the fetch boundary.
///
/// The kind is decided once from the provider's numeric weather code;
/// downstream code never inspects provider fields. Amount is millimetres
/// over the last report period and is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount_mm", rename_all = "snake_case")]
pub enum Precipitation {
    Rain(f64),
    Snow(f64),
}

impl Precipitation {
    pub fn amount_mm(&self) -> f64 {
        match self {
            Self::Rain(mm) | Self::Snow(mm) => *mm,
        }
    }

    pub fn is_rain(&self) -> bool {
        matches!(self, Self::Rain(_))
    }

    pub fn is_snow(&self) -> bool {
        matches!(self, Self::Snow(_))
    }
}

/// One current-conditions reading. Immutable once constructed; produced
/// fresh on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    /// Relative humidity, clamped to [0, 100] at the fetch boundary.
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub precipitation: Option<Precipitation>,
    pub condition_text: String,
    /// True when this reading is synthetic fallback data.
    pub is_demo: bool,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherObservation {
    pub fn has_rain(&self) -> bool {
        self.precipitation.is_some_and(|p| p.is_rain())
    }

    pub fn has_snow(&self) -> bool {
        self.precipitation.is_some_and(|p| p.is_snow())
    }
}

/// Failures crossing the fetch boundary. Exactly two kinds: the caller's
/// only branch is success vs. failure, plus an actionable message for
/// failures caused by direct user input.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Timeout, connection failure, non-2xx status, or a malformed/missing
    /// field in a remote response.
    #[error("network or data error: {0}")]
    Network(String),

    /// A lookup that completed but returned no usable location.
    #[error("not found: {0}")]
    NotFound(String),
}

impl FetchError {
    /// User-facing message for manual-location entry failures.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Network(_) => {
                "Weather service unreachable. Check your connection and try again."
            }
            FetchError::NotFound(_) => "Location not found. Check the spelling and try again.",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Network(format!("request timed out: {}", err))
        } else if err.is_connect() {
            FetchError::Network(format!("connection failed: {}", err))
        } else if err.is_decode() {
            FetchError::Network(format!("malformed response: {}", err))
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Convert a forecast-service weather code to a display description.
/// Codes outside the published 0-99 table map to "Unknown".
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "Clear Sky",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing Rime Fog",
        51 => "Light Drizzle",
        53 => "Moderate Drizzle",
        55 => "Dense Drizzle",
        56 => "Light Freezing Drizzle",
        57 => "Dense Freezing Drizzle",
        61 => "Slight Rain",
        63 => "Moderate Rain",
        65 => "Heavy Rain",
        66 => "Light Freezing Rain",
        67 => "Heavy Freezing Rain",
        71 => "Slight Snow",
        73 => "Moderate Snow",
        75 => "Heavy Snow",
        77 => "Snow Grains",
        80 => "Slight Rain Showers",
        81 => "Moderate Rain Showers",
        82 => "Violent Rain Showers",
        85 => "Slight Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with Slight Hail",
        99 => "Thunderstorm with Heavy Hail",
        _ => "Unknown",
    }
}

/// Snow-bearing weather codes.
pub fn is_snow_code(code: u16) -> bool {
    matches!(code, 71 | 73 | 75 | 77 | 85 | 86)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn observation_with(precipitation: Option<Precipitation>) -> WeatherObservation {
        WeatherObservation {
            temperature_c: 10.0,
            humidity_pct: 50,
            wind_speed_ms: 2.0,
            precipitation,
            condition_text: "Clear Sky".to_string(),
            is_demo: false,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_weather_code_descriptions() {
        assert_eq!(describe_weather_code(0), "Clear Sky");
        assert_eq!(describe_weather_code(3), "Overcast");
        assert_eq!(describe_weather_code(55), "Dense Drizzle");
        assert_eq!(describe_weather_code(75), "Heavy Snow");
        assert_eq!(describe_weather_code(95), "Thunderstorm");
        assert_eq!(describe_weather_code(99), "Thunderstorm with Heavy Hail");
    }

    #[test]
    fn test_unmapped_weather_code_is_unknown() {
        assert_eq!(describe_weather_code(4), "Unknown");
        assert_eq!(describe_weather_code(100), "Unknown");
        assert_eq!(describe_weather_code(9999), "Unknown");
    }

    #[test]
    fn test_snow_codes() {
        for code in [71, 73, 75, 77, 85, 86] {
            assert!(is_snow_code(code), "code {} should be snow", code);
        }
        // Freezing rain and drizzle are not snow
        for code in [56, 57, 61, 66, 67, 80, 95] {
            assert!(!is_snow_code(code), "code {} should not be snow", code);
        }
    }

    #[test]
    fn test_precipitation_helpers() {
        let rain = Precipitation::Rain(0.8);
        assert!(rain.is_rain());
        assert!(!rain.is_snow());
        assert_eq!(rain.amount_mm(), 0.8);

        let snow = Precipitation::Snow(1.2);
        assert!(snow.is_snow());
        assert_eq!(snow.amount_mm(), 1.2);
    }

    #[test]
    fn test_observation_precipitation_flags() {
        assert!(!observation_with(None).has_rain());
        assert!(!observation_with(None).has_snow());
        assert!(observation_with(Some(Precipitation::Rain(0.5))).has_rain());
        assert!(observation_with(Some(Precipitation::Snow(0.5))).has_snow());
        assert!(!observation_with(Some(Precipitation::Snow(0.5))).has_rain());
    }

    #[test]
    fn test_fetch_error_user_messages() {
        let network = FetchError::Network("boom".to_string());
        let not_found = FetchError::NotFound("nowhere".to_string());
        assert!(network.user_message().contains("connection"));
        assert!(not_found.user_message().contains("Location not found"));
    }
}
