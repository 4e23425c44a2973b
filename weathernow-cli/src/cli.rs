use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, InquireError, Password, PasswordDisplayMode, Text};
use serde::Serialize;
use tracing::debug;
use weathernow_core::{
    Config, ConfiguredLocationAccess, HttpWeatherClient, SearchView, WeatherSession,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernow", version, about = "Current weather and 5-day forecasts")]
pub struct Cli {
    /// Print normalized records as JSON instead of text cards.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set endpoint URLs, API key and location access.
    Configure,

    /// Show current conditions for a city.
    Now {
        /// City name.
        #[arg(required_unless_present = "here", conflicts_with = "here")]
        city: Option<String>,

        /// Use "my location" instead of a city name.
        #[arg(long)]
        here: bool,
    },

    /// Show the 5-day forecast for a city.
    Forecast {
        /// City name; without it nothing is searched.
        #[arg(conflicts_with = "here")]
        city: Option<String>,

        /// Use "my location" instead of a city name.
        #[arg(long)]
        here: bool,
    },

    /// Prompt for cities repeatedly, keeping the last good result on screen.
    Shell,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let json = self.json;

        match self.command {
            Command::Configure => configure(),
            Command::Now { city, here } => {
                let config = Config::load()?.with_env_overrides();
                let session = session_from(&config)?;

                if here {
                    session.search_current_here(&location_access(&config)).await;
                } else if let Some(city) = city {
                    session.search_current(&city).await;
                }

                let view = session.current_view().await;
                print_view(json, &view, render::current_card)?;
                if !json {
                    if let Some(city) = session.forecast_city().await {
                        println!("\n{}", render::forecast_hint(&city));
                    }
                }
                Ok(())
            }
            Command::Forecast { city: None, here: false } => {
                print_view(json, &SearchView::default(), render::forecast_cards)
            }
            Command::Forecast { city, here } => {
                let config = Config::load()?.with_env_overrides();
                let session = session_from(&config)?;

                if here {
                    session.search_forecast_here(&location_access(&config)).await;
                } else {
                    session.open_forecast(city.as_deref()).await;
                }

                print_view(json, &session.forecast_view().await, render::forecast_cards)
            }
            Command::Shell => shell(json).await,
        }
    }
}

fn session_from(config: &Config) -> anyhow::Result<WeatherSession> {
    let endpoints = config.endpoints()?;
    Ok(WeatherSession::new(Arc::new(HttpWeatherClient::new(endpoints))))
}

fn location_access(config: &Config) -> ConfiguredLocationAccess {
    ConfiguredLocationAccess::new(config.location.allow)
}

fn print_view<T: Serialize>(
    json: bool,
    view: &SearchView<T>,
    card: fn(&SearchView<T>) -> String,
) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(&view.result())
            .context("Failed to serialize result as JSON")?;
        println!("{out}");
    } else {
        println!("{}", card(view));
    }
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let ep = &mut config.endpoints;

    let weather_url = Text::new("Current-weather URL (city is appended):")
        .with_default(ep.weather_url.as_deref().unwrap_or(""))
        .with_help_message("e.g. https://api.openweathermap.org/data/2.5/weather?q=")
        .prompt()?;

    let forecast_url = Text::new("Forecast URL (city is appended):")
        .with_default(ep.forecast_url.as_deref().unwrap_or(""))
        .with_help_message("e.g. https://api.openweathermap.org/data/2.5/forecast?q=")
        .prompt()?;

    let api_key = Password::new("API key segment (appended after the city):")
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("e.g. &appid=<key>&units=metric; leave empty to keep the current one")
        .without_confirmation()
        .prompt()?;

    let allow = Confirm::new("Allow \"my location\" lookups?")
        .with_default(config.location.allow.unwrap_or(false))
        .prompt()?;

    ep.weather_url = non_empty(weather_url).or(ep.weather_url.take());
    ep.forecast_url = non_empty(forecast_url).or(ep.forecast_url.take());
    ep.api_key = non_empty(api_key).or(ep.api_key.take());
    config.location.allow = Some(allow);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

async fn shell(json: bool) -> anyhow::Result<()> {
    let config = Config::load()?.with_env_overrides();
    let session = session_from(&config)?;
    let access = location_access(&config);

    println!("{}", render::SHELL_HELP);

    loop {
        let input = match Text::new("City:").with_placeholder("Enter city name...").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match input.trim() {
            "/quit" | "/q" => break,
            "/here" => {
                session.search_current_here(&access).await;
            }
            "/forecast" => {
                let city = session.forecast_city().await;
                session.open_forecast(city.as_deref()).await;
                print_view(json, &session.forecast_view().await, render::forecast_cards)?;
                continue;
            }
            other => {
                if !session.search_current(other).await {
                    debug!("blank input, nothing searched");
                    continue;
                }
            }
        }

        print_view(json, &session.current_view().await, render::current_card)?;
    }

    Ok(())
}
