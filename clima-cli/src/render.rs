//! Text rendering of the widget.
//!
//! Absent data never produces an error: every missing value is shown as a
//! placeholder, so the layout is always the same.

use std::fmt::Write as _;

use clima_core::{ForecastDay, WidgetView, forecast::FORECAST_DAYS, resolve_icon};

pub const TEMP_PLACEHOLDER: &str = "--°C";
pub const TEXT_PLACEHOLDER: &str = "---";
pub const HUMIDITY_PLACEHOLDER: &str = "--%";
pub const WIND_PLACEHOLDER: &str = "-- km/h";

/// Labels for forecast slots that have no data.
const FALLBACK_LABELS: [&str; FORECAST_DAYS] = ["Today", "Tomorrow", "Day after tomorrow"];

/// Half-up rounding, so `-2.5` becomes `-2` rather than `-3`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_temp(value: Option<f64>) -> String {
    match value {
        Some(t) => format!("{}°C", round_half_up(t)),
        None => TEMP_PLACEHOLDER.to_string(),
    }
}

/// Wind arrives in m/s and is shown in km/h with one decimal.
pub fn format_wind(speed_mps: Option<f64>) -> String {
    match speed_mps {
        Some(speed) => format!("{:.1} km/h", speed * 3.6),
        None => WIND_PLACEHOLDER.to_string(),
    }
}

pub fn format_humidity(humidity_pct: Option<u8>) -> String {
    match humidity_pct {
        Some(h) => format!("{h}%"),
        None => HUMIDITY_PLACEHOLDER.to_string(),
    }
}

/// Render the whole widget. `local_hour` decides day/night icons.
pub fn render(view: &WidgetView, city: &str, local_hour: u32) -> String {
    let mut out = String::new();
    let current = view.snapshot.as_ref().map(|s| &s.current);

    let _ = writeln!(out, "Weather forecast: {city}");
    if view.loading {
        let _ = writeln!(out, "Loading...");
    }
    let _ = writeln!(out);

    let condition = current.map(|c| c.condition.as_str());
    let _ = writeln!(out, "Now");
    let _ = writeln!(out, "  {}", format_temp(current.map(|c| c.temperature_c)));
    let _ = writeln!(
        out,
        "  {} {}",
        resolve_icon(condition.unwrap_or(""), local_hour),
        condition.unwrap_or(TEXT_PLACEHOLDER)
    );
    let _ = writeln!(
        out,
        "  Humidity: {}",
        format_humidity(current.map(|c| c.humidity_pct))
    );
    let _ = writeln!(
        out,
        "  Wind: {}",
        format_wind(current.map(|c| c.wind_speed_mps))
    );

    for (i, fallback) in FALLBACK_LABELS.iter().enumerate() {
        let _ = writeln!(out);
        out.push_str(&render_day(view.forecast_slot(i), fallback, local_hour));
    }

    out
}

fn render_day(day: Option<&ForecastDay>, fallback_label: &str, local_hour: u32) -> String {
    let mut out = String::new();
    let condition = day.map(|d| d.condition.as_str());

    let _ = writeln!(out, "{}", day.map_or(fallback_label, |d| d.day_label.as_str()));
    let _ = writeln!(out, "  {}", resolve_icon(condition.unwrap_or(""), local_hour));
    let _ = writeln!(
        out,
        "  Min: {} | Max: {}",
        format_temp(day.map(|d| d.low_c)),
        format_temp(day.map(|d| d.high_c))
    );
    let _ = writeln!(out, "  {}", condition.unwrap_or(TEXT_PLACEHOLDER));
    out
}
