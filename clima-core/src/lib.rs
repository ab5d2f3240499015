//! Core library for the `clima` weather widget.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather fetch cycle and its failure taxonomy
//! - Forecast reduction and icon selection
//! - The snapshot slot the presentation layer reads from
//!
//! It is used by `clima-cli`, but carries no presentation logic of its own.

pub mod client;
pub mod config;
pub mod error;
pub mod forecast;
pub mod icon;
pub mod model;
pub mod provider;
pub mod snapshot;

pub use client::WeatherClient;
pub use config::Config;
pub use error::{Endpoint, WeatherError};
pub use forecast::{RawForecastEntry, reduce_forecast};
pub use icon::{IconId, is_night, resolve_icon};
pub use model::{CurrentConditions, ForecastDay, WeatherSnapshot, WidgetView};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use snapshot::{CycleTicket, SnapshotSlot};
