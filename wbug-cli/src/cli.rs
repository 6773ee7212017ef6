use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::prelude::ToPrimitive;

use wbug_core::data::{format_number, format_timestamp};
use wbug_core::{Config, Forecasts, WeatherBugService};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wbug", version, about = "WeatherBug CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the WeatherBug API code and an optional default ZIP code.
    Configure,

    /// Show active severe weather alerts for a ZIP code.
    Alerts {
        /// ZIP code; falls back to the configured default.
        zip: Option<String>,
    },

    /// List the weather stations around a ZIP code.
    Stations {
        /// ZIP code; falls back to the configured default.
        zip: Option<String>,
    },

    /// Show the seven day forecast for a ZIP code.
    Forecast {
        /// ZIP code; falls back to the configured default.
        zip: Option<String>,
    },

    /// Search for locations by city name or postal code.
    Locations {
        /// City name or postal code to search for.
        search: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        tracing::debug!(command = ?self.command, "running command");

        match self.command {
            Command::Configure => configure(),
            Command::Alerts { zip } => {
                let (service, zip) = service_and_zip(zip)?;
                show_alerts(&service, &zip).await
            }
            Command::Stations { zip } => {
                let (service, zip) = service_and_zip(zip)?;
                show_stations(&service, &zip).await
            }
            Command::Forecast { zip } => {
                let (service, zip) = service_and_zip(zip)?;
                show_forecast(&service, &zip).await
            }
            Command::Locations { search } => {
                let config = Config::load()?;
                let service = WeatherBugService::new(config.api_code()?.to_owned());
                show_locations(&service, &search).await
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_code = inquire::Text::new("WeatherBug API code:").prompt()?;
    config.set_api_code(api_code);

    let default_zip = inquire::Text::new("Default ZIP code (leave empty to skip):").prompt()?;
    config.default_zip = if default_zip.is_empty() { None } else { Some(default_zip) };

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

fn service_and_zip(zip: Option<String>) -> Result<(WeatherBugService, String)> {
    let config = Config::load()?;
    let service = WeatherBugService::new(config.api_code()?.to_owned());
    let zip = config.resolve_zip(zip)?;

    Ok((service, zip))
}

async fn show_alerts(service: &WeatherBugService, zip: &str) -> Result<()> {
    let alerts = service.alerts(zip).await?;

    if alerts.is_empty() {
        println!("No active alerts for {zip}.");
        return Ok(());
    }

    let now = chrono::Utc::now();
    for alert in &alerts {
        println!("{} - {}", alert.alert_type(), alert.title());
        println!(
            "  posted  {}",
            format_timestamp(&alert.posted_time(), "%Y-%m-%d %H:%M UTC")
        );
        println!(
            "  expires {}{}",
            format_timestamp(&alert.expires_time(), "%Y-%m-%d %H:%M UTC"),
            if alert.expires_time() < now { " (expired)" } else { "" }
        );
        if !alert.message_summary().is_empty() {
            println!("  {}", alert.message_summary());
        }
    }

    Ok(())
}

async fn show_stations(service: &WeatherBugService, zip: &str) -> Result<()> {
    let stations = service.stations(zip).await?;

    if stations.is_empty() {
        println!("No stations found around {zip}.");
        return Ok(());
    }

    for station in &stations {
        let distance = station
            .distance()
            .and_then(|d| d.to_f64())
            .map(|d| format!("{} {}", format_number(d, 1), station.unit()))
            .unwrap_or_else(|| "unknown distance".to_string());

        println!("{}  {} ({}, {})  {}", station.id(), station.name(), station.city(), station.state(), distance);
    }

    Ok(())
}

async fn show_forecast(service: &WeatherBugService, zip: &str) -> Result<()> {
    let Some(forecasts) = service.forecasts(zip).await? else {
        println!("No forecast available for {zip}.");
        return Ok(());
    };

    print_forecasts(&forecasts);
    Ok(())
}

fn print_forecasts(forecasts: &Forecasts) {
    println!("Forecast for {}, {} ({})", forecasts.city(), forecasts.state(), forecasts.zone());

    for day in forecasts.forecasts() {
        println!(
            "  {:<10} {:>4}{} / {:>4}{}  {}",
            day.title(),
            day.high(),
            day.units(),
            day.low(),
            day.units(),
            day.short_prediction()
        );
    }

    if let Some(url) = forecasts.site_url() {
        println!("  more: {url}");
    }
}

async fn show_locations(service: &WeatherBugService, search: &str) -> Result<()> {
    let locations = service.locations(search).await?;

    if locations.is_empty() {
        println!("No locations matched '{search}'.");
        return Ok(());
    }

    for location in &locations {
        let code = if location.is_us_city() {
            format!("zip {:05}", location.zip_code())
        } else {
            format!("city code {}", location.city_code())
        };

        println!(
            "{}, {} {} ({})",
            location.city_name(),
            location.state_name(),
            location.country_name(),
            code
        );
    }

    Ok(())
}
