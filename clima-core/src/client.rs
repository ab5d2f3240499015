//! Fetch cycles: the credential guard, failure collapsing and the snapshot slot.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::{
    Config, WeatherError, WeatherSnapshot, WidgetView,
    provider::{WeatherProvider, provider_from_config},
    snapshot::SnapshotSlot,
};

/// Entry point for the widget. Cheap to clone; clones share the same slot.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    provider: Option<Arc<dyn WeatherProvider>>,
    slot: Arc<SnapshotSlot>,
}

impl WeatherClient {
    /// A client for `config`. Without an API key the client is disabled and
    /// never touches the network.
    pub fn from_config(config: &Config) -> Self {
        match provider_from_config(config) {
            Ok(provider) => Self::with_provider(provider),
            Err(_) => Self::disabled(),
        }
    }

    pub fn with_provider(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider: Some(provider),
            slot: Arc::new(SnapshotSlot::new()),
        }
    }

    pub fn disabled() -> Self {
        Self {
            provider: None,
            slot: Arc::new(SnapshotSlot::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// One fetch cycle with today's local date. Any failure is logged and
    /// yields `None`.
    pub async fn fetch_weather(&self, city: &str) -> Option<WeatherSnapshot> {
        self.fetch_weather_on(city, Local::now().date_naive()).await
    }

    pub async fn fetch_weather_on(
        &self,
        city: &str,
        today: NaiveDate,
    ) -> Option<WeatherSnapshot> {
        match self.try_fetch_weather(city, today).await {
            Ok(snapshot) => Some(snapshot),
            Err(WeatherError::MissingCredential) => {
                debug!("No API key configured, skipping weather fetch");
                None
            }
            Err(err) => {
                warn!(%city, error = %err, "Weather fetch failed");
                None
            }
        }
    }

    /// Same as [`fetch_weather_on`](Self::fetch_weather_on) but keeps the error.
    pub async fn try_fetch_weather(
        &self,
        city: &str,
        today: NaiveDate,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(WeatherError::MissingCredential)?;

        provider.get_snapshot(city, today).await
    }

    /// Run a cycle and store its outcome in the shared slot. Returns `false`
    /// if a newer cycle committed first and this result was dropped.
    pub async fn refresh(&self, city: &str) -> bool {
        self.refresh_on(city, Local::now().date_naive()).await
    }

    pub async fn refresh_on(&self, city: &str, today: NaiveDate) -> bool {
        if !self.is_enabled() {
            debug!("No API key configured, leaving snapshot absent");
            return false;
        }

        let ticket = self.slot.begin();
        let snapshot = self.fetch_weather_on(city, today).await;
        let applied = self.slot.commit(ticket, snapshot);

        if applied {
            info!(generation = ticket.generation(), %city, "Weather snapshot updated");
        } else {
            debug!(generation = ticket.generation(), "Dropping superseded weather result");
        }
        applied
    }

    pub fn view(&self) -> WidgetView {
        self.slot.view()
    }
}
