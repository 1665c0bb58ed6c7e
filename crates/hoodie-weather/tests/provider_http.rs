//! HTTP-level tests for `WeatherProvider` against a mock server.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use hoodie_weather::{Endpoints, FetchError, Precipitation, WeatherProvider};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> WeatherProvider {
    WeatherProvider::with_endpoints(Endpoints {
        geo_ip: format!("{}/geo", server.uri()),
        geocoding: format!("{}/search", server.uri()),
        forecast: format!("{}/v1/forecast", server.uri()),
    })
    .unwrap()
}

#[tokio::test]
async fn locate_by_ip_maps_response_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "lat": 46.05,
            "lon": 14.51,
            "city": "Ljubljana",
            "regionName": "Osrednjeslovenska",
            "country": "Slovenia"
        })))
        .mount(&server)
        .await;

    let location = provider_for(&server).locate_by_ip().await.unwrap();
    assert_eq!(location.latitude, 46.05);
    assert_eq!(location.longitude, 14.51);
    assert_eq!(
        location.display_name,
        "Ljubljana, Osrednjeslovenska, Slovenia"
    );
    assert!(!location.is_manual);
}

#[tokio::test]
async fn locate_by_ip_failure_status_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "fail"})))
        .mount(&server)
        .await;

    let result = provider_for(&server).locate_by_ip().await;
    assert!(matches!(result, Err(FetchError::NotFound(_))));
}

#[tokio::test]
async fn locate_by_ip_server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = provider_for(&server).locate_by_ip().await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}

#[tokio::test]
async fn locate_by_ip_malformed_body_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = provider_for(&server).locate_by_ip().await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}

#[tokio::test]
async fn geocode_uses_first_hit_and_identifies_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Berlin"))
        .and(query_param("limit", "1"))
        .and(header("user-agent", "HoodieWeatherWidget/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "52.52", "lon": "13.405", "display_name": "Berlin, Deutschland"},
        ])))
        .mount(&server)
        .await;

    let location = provider_for(&server).geocode("Berlin").await.unwrap();
    assert_eq!(location.latitude, 52.52);
    assert_eq!(location.longitude, 13.405);
    assert_eq!(location.display_name, "Berlin, Deutschland");
    assert!(location.is_manual);
}

#[tokio::test]
async fn geocode_empty_results_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = provider_for(&server).geocode("nowhere at all").await;
    assert!(matches!(result, Err(FetchError::NotFound(_))));
}

#[tokio::test]
async fn geocode_empty_query_is_not_found_without_a_request() {
    let server = MockServer::start().await;

    let result = provider_for(&server).geocode("   ").await;
    assert!(matches!(result, Err(FetchError::NotFound(_))));
}

#[tokio::test]
async fn geocode_unparseable_coordinates_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "fifty-two", "lon": "13.405", "display_name": "Berlin"},
        ])))
        .mount(&server)
        .await;

    let result = provider_for(&server).geocode("Berlin").await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}

#[tokio::test]
async fn forecast_converts_wind_and_maps_condition() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.405"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "temperature_2m": 12.3,
                "relative_humidity_2m": 50.0,
                "precipitation": 0.0,
                "weather_code": 2,
                "wind_speed_10m": 36.0
            }
        })))
        .mount(&server)
        .await;

    let observation = provider_for(&server)
        .fetch_forecast(52.52, 13.405)
        .await
        .unwrap();
    assert_eq!(observation.temperature_c, 12.3);
    assert_eq!(observation.humidity_pct, 50);
    assert_eq!(observation.wind_speed_ms, 10.0);
    assert_eq!(observation.condition_text, "Partly Cloudy");
    assert_eq!(observation.precipitation, None);
    assert!(!observation.is_demo);
}

#[tokio::test]
async fn forecast_positive_precipitation_is_rain_for_rain_codes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "temperature_2m": 8.0,
                "relative_humidity_2m": 80.0,
                "precipitation": 0.8,
                "weather_code": 61,
                "wind_speed_10m": 7.2
            }
        })))
        .mount(&server)
        .await;

    let observation = provider_for(&server).fetch_forecast(0.0, 0.0).await.unwrap();
    assert_eq!(observation.precipitation, Some(Precipitation::Rain(0.8)));
    assert_eq!(observation.condition_text, "Slight Rain");
}

#[tokio::test]
async fn forecast_positive_precipitation_is_snow_for_snow_codes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "temperature_2m": -2.0,
                "relative_humidity_2m": 90.0,
                "precipitation": 1.2,
                "weather_code": 73,
                "wind_speed_10m": 3.6
            }
        })))
        .mount(&server)
        .await;

    let observation = provider_for(&server).fetch_forecast(0.0, 0.0).await.unwrap();
    assert_eq!(observation.precipitation, Some(Precipitation::Snow(1.2)));
    assert_eq!(observation.condition_text, "Moderate Snow");
}

#[tokio::test]
async fn forecast_missing_current_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"latitude": 0.0})))
        .mount(&server)
        .await;

    let result = provider_for(&server).fetch_forecast(0.0, 0.0).await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}
