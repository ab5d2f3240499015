use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::model::ForecastDay;

/// Substring of `dt_txt` that marks the noon reading of a day.
pub const NOON_MARKER: &str = "12:00:00";

/// Label of the first forecast slot.
pub const TODAY_LABEL: &str = "Today";

/// How many days the widget shows.
pub const FORECAST_DAYS: usize = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastMain {
    pub temp_max: f64,
    pub temp_min: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWeather {
    pub description: String,
}

/// One 3-hour record of the provider's forecast `list`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastEntry {
    pub dt_txt: String,
    pub main: RawForecastMain,
    #[serde(default)]
    pub weather: Vec<RawWeather>,
}

impl RawForecastEntry {
    fn is_noon(&self) -> bool {
        self.dt_txt.contains(NOON_MARKER)
    }
}

/// Select the first three noon entries and turn them into display days.
///
/// Labels come from `reference` (the local date at fetch time), not from the
/// entries' own timestamps.
pub fn reduce_forecast(raw: &[RawForecastEntry], reference: NaiveDate) -> Vec<ForecastDay> {
    raw.iter()
        .filter(|entry| entry.is_noon())
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(i, entry)| ForecastDay {
            day_label: day_label(i, reference),
            condition: primary_description(&entry.weather),
            high_c: entry.main.temp_max,
            low_c: entry.main.temp_min,
        })
        .collect()
}

/// `Today` for slot 0, otherwise the `DD/MM` date `index` days ahead.
pub fn day_label(index: usize, reference: NaiveDate) -> String {
    if index == 0 {
        return TODAY_LABEL.to_string();
    }
    let date = reference + Duration::days(index as i64);
    date.format("%d/%m").to_string()
}

pub(crate) fn primary_description(weather: &[RawWeather]) -> String {
    weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_default()
}
