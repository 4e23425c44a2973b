use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{client::Endpoints, error::WeatherError};

pub const ENV_WEATHER_URL: &str = "WEATHERNOW_WEATHER_URL";
pub const ENV_FORECAST_URL: &str = "WEATHERNOW_FORECAST_URL";
pub const ENV_API_KEY: &str = "WEATHERNOW_API_KEY";

/// Provider endpoint settings. No defaults; missing values make every
/// request fail.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Current-conditions base, e.g. "https://api.openweathermap.org/data/2.5/weather?q="
    pub weather_url: Option<String>,
    /// Forecast base, e.g. "https://api.openweathermap.org/data/2.5/forecast?q="
    pub forecast_url: Option<String>,
    /// Appended after the city, e.g. "&appid=...&units=metric"
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LocationConfig {
    pub allow: Option<bool>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [endpoints]
/// weather_url = "https://api.openweathermap.org/data/2.5/weather?q="
/// forecast_url = "https://api.openweathermap.org/data/2.5/forecast?q="
/// api_key = "&appid=...&units=metric"
///
/// [location]
/// allow = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default)]
    pub location: LocationConfig,
}

impl Config {
    /// Load config from the platform path, or an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform path, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weathernow", "weathernow")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override endpoint values from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Environment values win over file values. Empty values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_WEATHER_URL) {
            self.endpoints.weather_url = Some(v);
        }
        if let Some(v) = get(ENV_FORECAST_URL) {
            self.endpoints.forecast_url = Some(v);
        }
        if let Some(v) = get(ENV_API_KEY) {
            self.endpoints.api_key = Some(v);
        }
        self
    }

    pub fn endpoints(&self) -> Result<Endpoints, WeatherError> {
        let ep = &self.endpoints;
        Ok(Endpoints {
            current_url: ep.weather_url.clone().ok_or(WeatherError::NotConfigured("weather_url"))?,
            forecast_url: ep
                .forecast_url
                .clone()
                .ok_or(WeatherError::NotConfigured("forecast_url"))?,
            api_key: ep.api_key.clone().ok_or(WeatherError::NotConfigured("api_key"))?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoints().is_ok()
    }
}
