use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result, bail};
use chrono::{Local, Timelike};
use clap::{Parser, Subcommand};
use clima_core::{Config, WeatherClient};
use inquire::{Password, PasswordDisplayMode, Text};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Current weather and a 3-day forecast")]
pub struct Cli {
    /// Path to the config file (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default city.
    Configure,

    /// Show the weather widget for a city.
    Show {
        /// City name; defaults to the configured city, then São Paulo.
        city: Option<String>,

        /// Print the widget data as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Refresh every SECS seconds until interrupted.
        #[arg(long, value_name = "SECS")]
        watch: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Configure => configure(&path),
            Command::Show { city, json, watch } => {
                let config = Config::load_from(&path)?.with_env_overrides();
                let city = city.unwrap_or_else(|| config.city().to_string());
                let client = WeatherClient::from_config(&config);
                if !client.is_enabled() {
                    info!(
                        "No API key configured; run `clima configure` or set {}",
                        clima_core::config::API_KEY_ENV
                    );
                }

                match watch {
                    Some(0) => bail!("--watch interval must be at least one second"),
                    Some(secs) if client.is_enabled() => {
                        watch_loop(client, city, json, Duration::from_secs(secs)).await
                    }
                    _ => {
                        client.refresh(&city).await;
                        print_view(&client, &city, json)
                    }
                }
            }
        }
    }
}

fn configure(path: &std::path::Path) -> Result<()> {
    let mut config = Config::load_from(path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key);

    let city = Text::new("Default city:")
        .with_default(config.city())
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_string());

    config.save_to(path)?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn print_view(client: &WeatherClient, city: &str, json: bool) -> Result<()> {
    let view = client.view();
    if json {
        let out = serde_json::to_string_pretty(&view).context("Failed to serialize weather")?;
        println!("{out}");
    } else {
        print!("{}", render::render(&view, city, Local::now().hour()));
    }
    Ok(())
}

/// Start a cycle on every tick. A cycle still running when the next tick
/// fires is aborted; an aborted cycle never touches the snapshot.
async fn watch_loop(
    client: WeatherClient,
    city: String,
    json: bool,
    every: Duration,
) -> Result<()> {
    let mut ticker = tokio::time::interval(every);
    let mut in_flight: Option<JoinHandle<()>> = None;
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(handle) = in_flight.take() {
                    if !handle.is_finished() {
                        debug!("Previous refresh still running, aborting it");
                    }
                    handle.abort();
                }

                let client = client.clone();
                let city = city.clone();
                in_flight = Some(tokio::spawn(async move {
                    if client.refresh(&city).await {
                        if let Err(err) = print_view(&client, &city, json) {
                            tracing::error!(error = %err, "Failed to print weather");
                        }
                    }
                }));
            }
            _ = &mut shutdown => {
                if let Some(handle) = in_flight.take() {
                    handle.abort();
                }
                info!("Stopping");
                return Ok(());
            }
        }
    }
}
