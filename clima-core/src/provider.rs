use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{Config, WeatherError, WeatherSnapshot, provider::openweather::OpenWeatherProvider};

pub mod openweather;

/// Source of complete snapshots. One call is one fetch cycle.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions and forecast for `city`. Forecast day labels
    /// are computed relative to `today`.
    async fn get_snapshot(
        &self,
        city: &str,
        today: NaiveDate,
    ) -> Result<WeatherSnapshot, WeatherError>;
}

/// Build the provider for `config`, or [`WeatherError::MissingCredential`]
/// when no API key is set.
pub fn provider_from_config(config: &Config) -> Result<Arc<dyn WeatherProvider>, WeatherError> {
    let api_key = config.api_key().ok_or(WeatherError::MissingCredential)?;

    Ok(Arc::new(OpenWeatherProvider::with_base_url(
        api_key.to_owned(),
        config.base_url().to_owned(),
    )))
}
