use serde::{Deserialize, Serialize};

/// Conditions reported by the current-weather endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// One representative reading per day, taken from the noon forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day_label: String,
    pub condition: String,
    pub high_c: f64,
    pub low_c: f64,
}

/// Everything one fetch cycle produces. Never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

/// What the presentation layer reads: the latest snapshot, if any, and
/// whether a fetch cycle is still outstanding.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WidgetView {
    pub snapshot: Option<WeatherSnapshot>,
    pub loading: bool,
}

impl WidgetView {
    pub fn forecast_slot(&self, index: usize) -> Option<&ForecastDay> {
        self.snapshot.as_ref().and_then(|s| s.forecast.get(index))
    }
}
