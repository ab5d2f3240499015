//! Integration tests for the OpenWeather fetch cycle using wiremock
//!
//! Both endpoints are served by a mock server so the tests cover the
//! request parameters, the fork-join and every failure path.

use std::sync::Arc;

use chrono::NaiveDate;
use clima_core::{
    Config, CurrentConditions, Endpoint, OpenWeatherProvider, WeatherClient, WeatherError,
    WeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const KEY: &str = "TEST_KEY";

fn current_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -46.64, "lat": -23.55 },
        "weather": [{ "id": 500, "main": "Rain", "description": "chuva leve", "icon": "10d" }],
        "main": {
            "temp": 21.4,
            "feels_like": 21.6,
            "temp_min": 20.0,
            "temp_max": 22.3,
            "pressure": 1014,
            "humidity": 55
        },
        "wind": { "speed": 3.0, "deg": 140 },
        "dt": 1704891600,
        "name": "São Paulo",
        "cod": 200
    })
}

fn forecast_entry(dt_txt: &str, description: &str, max: f64, min: f64) -> serde_json::Value {
    serde_json::json!({
        "dt": 0,
        "main": { "temp": (max + min) / 2.0, "temp_min": min, "temp_max": max, "humidity": 70 },
        "weather": [{ "id": 800, "main": "Clouds", "description": description, "icon": "04d" }],
        "wind": { "speed": 2.1, "deg": 100 },
        "dt_txt": dt_txt
    })
}

fn forecast_response() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "cnt": 6,
        "list": [
            forecast_entry("2024-01-10 09:00:00", "névoa", 19.0, 17.0),
            forecast_entry("2024-01-10 12:00:00", "céu limpo", 28.5, 20.1),
            forecast_entry("2024-01-10 15:00:00", "nublado", 27.0, 21.0),
            forecast_entry("2024-01-11 12:00:00", "chuva moderada", 24.0, 18.0),
            forecast_entry("2024-01-12 12:00:00", "tempestade", 23.2, 19.9),
            forecast_entry("2024-01-13 12:00:00", "nublado", 25.0, 18.0)
        ],
        "city": { "name": "São Paulo", "country": "BR" }
    })
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

fn config_for(server: &MockServer, api_key: Option<&str>) -> Config {
    Config {
        api_key: api_key.map(str::to_string),
        default_city: None,
        base_url: Some(server.uri()),
    }
}

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/{endpoint}")))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn snapshot_from_both_endpoints() {
    let server = MockServer::start().await;
    mount(&server, "weather", ResponseTemplate::new(200).set_body_json(current_response())).await;
    mount(&server, "forecast", ResponseTemplate::new(200).set_body_json(forecast_response())).await;

    let client = WeatherClient::from_config(&config_for(&server, Some(KEY)));
    let snapshot = client
        .fetch_weather_on("São Paulo", today())
        .await
        .expect("snapshot expected");

    assert_eq!(
        snapshot.current,
        CurrentConditions {
            temperature_c: 21.4,
            condition: "chuva leve".into(),
            humidity_pct: 55,
            wind_speed_mps: 3.0,
        }
    );

    let labels: Vec<_> = snapshot.forecast.iter().map(|d| d.day_label.as_str()).collect();
    assert_eq!(labels, ["Today", "11/01", "12/01"]);
    assert_eq!(snapshot.forecast[0].condition, "céu limpo");
    assert_eq!(snapshot.forecast[2].condition, "tempestade");
    assert_eq!(snapshot.forecast[1].high_c, 24.0);
    assert_eq!(snapshot.forecast[1].low_c, 18.0);
}

#[tokio::test]
async fn requests_carry_city_units_key_and_language() {
    let server = MockServer::start().await;

    for (endpoint, body) in [("weather", current_response()), ("forecast", forecast_response())] {
        Mock::given(method("GET"))
            .and(path(format!("/{endpoint}")))
            .and(query_param("q", "São Paulo"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", KEY))
            .and(query_param("lang", "pt_br"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let provider = OpenWeatherProvider::with_base_url(KEY.into(), server.uri());
    let result = provider.get_snapshot("São Paulo", today()).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn refresh_stores_snapshot_in_view() {
    let server = MockServer::start().await;
    mount(&server, "weather", ResponseTemplate::new(200).set_body_json(current_response())).await;
    mount(&server, "forecast", ResponseTemplate::new(200).set_body_json(forecast_response())).await;

    let client = WeatherClient::from_config(&config_for(&server, Some(KEY)));
    assert!(client.refresh_on("São Paulo", today()).await);

    let view = client.view();
    assert!(!view.loading);
    assert_eq!(view.forecast_slot(0).map(|d| d.day_label.as_str()), Some("Today"));
}

// ============================================================================
// Failure scenarios
// ============================================================================

#[tokio::test]
async fn no_api_key_means_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = WeatherClient::from_config(&config_for(&server, None));

    assert_eq!(client.fetch_weather_on("São Paulo", today()).await, None);
    assert!(!client.refresh_on("Recife", today()).await);
    assert!(client.view().snapshot.is_none());
}

#[tokio::test]
async fn unknown_city_yields_no_snapshot() {
    let server = MockServer::start().await;
    let not_found = serde_json::json!({ "cod": "404", "message": "city not found" });
    mount(&server, "weather", ResponseTemplate::new(404).set_body_json(not_found.clone())).await;
    mount(&server, "forecast", ResponseTemplate::new(404).set_body_json(not_found)).await;

    let client = WeatherClient::from_config(&config_for(&server, Some(KEY)));

    assert_eq!(client.fetch_weather_on("Atlantis", today()).await, None);
    let err = client.try_fetch_weather("Atlantis", today()).await.unwrap_err();
    assert!(matches!(err, WeatherError::ProviderRequestFailed { .. }));
}

#[tokio::test]
async fn forecast_failure_discards_current_conditions() {
    let server = MockServer::start().await;
    mount(&server, "weather", ResponseTemplate::new(200).set_body_json(current_response())).await;
    mount(&server, "forecast", ResponseTemplate::new(500).set_body_string("upstream down")).await;

    let client = WeatherClient::from_config(&config_for(&server, Some(KEY)));

    let err = client.try_fetch_weather("São Paulo", today()).await.unwrap_err();
    match err {
        WeatherError::ProviderRequestFailed { endpoint, status, body } => {
            assert_eq!(endpoint, Endpoint::Forecast);
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.fetch_weather_on("São Paulo", today()).await, None);
}

#[tokio::test]
async fn malformed_json_is_a_parse_failure() {
    let server = MockServer::start().await;
    mount(&server, "weather", ResponseTemplate::new(200).set_body_string("{ not json")).await;
    mount(&server, "forecast", ResponseTemplate::new(200).set_body_json(forecast_response())).await;

    let client = WeatherClient::from_config(&config_for(&server, Some(KEY)));

    let err = client.try_fetch_weather("São Paulo", today()).await.unwrap_err();
    assert!(matches!(
        err,
        WeatherError::NetworkOrParseFailure { endpoint: Endpoint::Current, .. }
    ));
}

#[tokio::test]
async fn unreachable_provider_is_a_network_failure() {
    // nothing listens on the discard port
    let config = Config {
        api_key: Some(KEY.into()),
        default_city: None,
        base_url: Some("http://127.0.0.1:9".into()),
    };
    let client = WeatherClient::from_config(&config);

    let err = client.try_fetch_weather("São Paulo", today()).await.unwrap_err();
    assert!(matches!(err, WeatherError::NetworkOrParseFailure { .. }));
}

#[tokio::test]
async fn failed_refresh_resets_previous_snapshot() {
    let server = MockServer::start().await;
    mount(&server, "forecast", ResponseTemplate::new(200).set_body_json(forecast_response())).await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_response()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = WeatherClient::with_provider(Arc::new(OpenWeatherProvider::with_base_url(
        KEY.into(),
        server.uri(),
    )));

    client.refresh_on("São Paulo", today()).await;
    assert!(client.view().snapshot.is_some());

    client.refresh_on("São Paulo", today()).await;
    assert!(client.view().snapshot.is_none());
}
