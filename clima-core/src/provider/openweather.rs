use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    config::DEFAULT_BASE_URL,
    error::{Endpoint, WeatherError},
    forecast::{RawForecastEntry, RawWeather, primary_description, reduce_forecast},
    model::{CurrentConditions, WeatherSnapshot},
};

use super::WeatherProvider;

/// Temperatures in Celsius, wind in m/s.
const UNITS: &str = "metric";

/// Condition texts come back in Brazilian Portuguese.
const LANG: &str = "pt_br";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint.path());
        debug!(%endpoint, %url, "Requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", UNITS),
                ("appid", self.api_key.as_str()),
                ("lang", LANG),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::network(endpoint, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::network(endpoint, e))?;

        if !status.is_success() {
            return Err(WeatherError::ProviderRequestFailed {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::network(endpoint, format!("malformed JSON: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    #[serde(default)]
    weather: Vec<RawWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<RawForecastEntry>,
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        CurrentConditions {
            temperature_c: parsed.main.temp,
            condition: primary_description(&parsed.weather),
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(provider = "openweather"))]
    async fn get_snapshot(
        &self,
        city: &str,
        today: NaiveDate,
    ) -> Result<WeatherSnapshot, WeatherError> {
        // both must succeed; the first failure drops the other request
        let (current, forecast) = tokio::try_join!(
            self.fetch::<OwCurrentResponse>(Endpoint::Current, city),
            self.fetch::<OwForecastResponse>(Endpoint::Forecast, city),
        )?;

        let forecast = reduce_forecast(&forecast.list, today);
        debug!(days = forecast.len(), "Reduced forecast");

        Ok(WeatherSnapshot {
            current: current.into(),
            forecast,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
