//! Weather, geocoding, and geo-IP lookups against public HTTP services.
//!
//! Every provider-specific response shape stays private to this module;
//! callers only ever see `Location` and `WeatherObservation`. All three
//! operations share one client with a fixed timeout and report failures
//! as `FetchError`, never by panicking.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::types::{
    describe_weather_code, is_snow_code, FetchError, Location, Precipitation, WeatherObservation,
};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "HoodieWeatherWidget/1.0";

/// Service endpoints. Defaults point at the public services; tests point
/// them at a local mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub geo_ip: String,
    pub geocoding: String,
    pub forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geo_ip: "http://ip-api.com/json/".to_string(),
            geocoding: "https://nominatim.openstreetmap.org/search".to_string(),
            forecast: "https://api.open-meteo.com/v1/forecast".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    endpoints: Endpoints,
}

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

// Nominatim reports coordinates as strings.
#[derive(Debug, Deserialize)]
struct GeocodeResult {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditionsRaw,
}

#[derive(Debug, Deserialize)]
struct CurrentConditionsRaw {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    precipitation: f64,
    weather_code: u16,
    wind_speed_10m: f64,
}

impl WeatherProvider {
    /// Create a provider against the public services.
    ///
    /// # Errors
    /// Returns `FetchError::Network` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_endpoints(Endpoints::default())
    }

    /// Create a provider against the given endpoints.
    ///
    /// # Errors
    /// Returns `FetchError::Network` if the HTTP client cannot be built.
    pub fn with_endpoints(endpoints: Endpoints) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, endpoints })
    }

    /// Detect the user's location from their IP address.
    ///
    /// # Errors
    /// `NotFound` when the service reports no usable location; `Network`
    /// for transport, status, or parse failures.
    pub async fn locate_by_ip(&self) -> Result<Location, FetchError> {
        let response = self.client.get(&self.endpoints.geo_ip).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "geo-IP service returned {}",
                response.status()
            )));
        }

        let body: GeoIpResponse = response.json().await?;
        if body.status != "success" {
            return Err(FetchError::NotFound("location detection failed".to_string()));
        }

        let (latitude, longitude) = match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(FetchError::Network(
                    "geo-IP response missing coordinates".to_string(),
                ))
            }
        };

        let display_name = [body.city, body.region_name, body.country]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        tracing::info!("Located by IP: {}", display_name);
        Ok(Location {
            latitude,
            longitude,
            display_name,
            is_manual: false,
        })
    }

    /// Resolve a free-text place name to coordinates.
    ///
    /// # Errors
    /// `NotFound` when the query matches nothing (including an empty
    /// query); `Network` for transport, status, or parse failures.
    pub async fn geocode(&self, query: &str) -> Result<Location, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::NotFound("empty location query".to_string()));
        }

        let response = self
            .client
            .get(&self.endpoints.geocoding)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "geocoding service returned {}",
                response.status()
            )));
        }

        let results: Vec<GeocodeResult> = response.json().await?;
        let Some(hit) = results.into_iter().next() else {
            return Err(FetchError::NotFound(format!("no match for '{}'", query)));
        };

        let latitude = parse_coordinate(&hit.lat)?;
        let longitude = parse_coordinate(&hit.lon)?;

        tracing::info!("Geocoded '{}' to {}", query, hit.display_name);
        Ok(Location {
            latitude,
            longitude,
            display_name: hit.display_name,
            is_manual: true,
        })
    }

    /// Fetch current conditions for the given coordinates.
    ///
    /// Wind speed is converted from the service's km/h to m/s, the numeric
    /// condition code becomes display text, and precipitation is carried
    /// through only when positive.
    ///
    /// # Errors
    /// `Network` for transport, status, or parse failures.
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherObservation, FetchError> {
        let response = self
            .client
            .get(&self.endpoints.forecast)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                (
                    "current",
                    "temperature_2m,relative_humidity_2m,precipitation,weather_code,wind_speed_10m"
                        .to_string(),
                ),
                ("timezone", "auto".to_string()),
                ("forecast_days", "1".to_string()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "forecast service returned {}",
                response.status()
            )));
        }

        let body: ForecastResponse = response.json().await?;
        let current = body.current;

        let precipitation = if current.precipitation > 0.0 {
            Some(if is_snow_code(current.weather_code) {
                Precipitation::Snow(current.precipitation)
            } else {
                Precipitation::Rain(current.precipitation)
            })
        } else {
            None
        };

        Ok(WeatherObservation {
            temperature_c: current.temperature_2m,
            humidity_pct: clamp_humidity(current.relative_humidity_2m),
            wind_speed_ms: kmh_to_ms(current.wind_speed_10m),
            precipitation,
            condition_text: describe_weather_code(current.weather_code).to_string(),
            is_demo: false,
            fetched_at: Utc::now(),
        })
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, FetchError> {
    raw.parse()
        .map_err(|_| FetchError::Network(format!("unparseable coordinate '{}'", raw)))
}

/// km/h as reported by the forecast service, to m/s rounded to 1 decimal.
pub(crate) fn kmh_to_ms(kmh: f64) -> f64 {
    (kmh / 3.6 * 10.0).round() / 10.0
}

pub(crate) fn clamp_humidity(pct: f64) -> u8 {
    pct.round().clamp(0.0, 100.0) as u8
}
