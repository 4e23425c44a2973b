use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastReport, RawCurrentWeather, RawForecastResponse},
    normalize,
};

/// Where the two provider endpoints live.
///
/// Request URLs are built by concatenating base, city and key segment, so
/// the bases normally end in `?q=` and the key segment carries `&appid=...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub current_url: String,
    pub forecast_url: String,
    pub api_key: String,
}

impl Endpoints {
    pub fn current_for(&self, city: &str) -> String {
        format!("{}{}{}", self.current_url, city, self.api_key)
    }

    pub fn forecast_for(&self, city: &str) -> String {
        format!("{}{}{}", self.forecast_url, city, self.api_key)
    }
}

/// Source of raw provider payloads.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<RawCurrentWeather, WeatherError>;

    async fn fetch_forecast(&self, city: &str) -> Result<RawForecastResponse, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    endpoints: Endpoints,
    http: Client,
}

impl HttpWeatherClient {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints, http: Client::new() }
    }

    pub async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let raw = self.fetch_current(city).await?;
        normalize::normalize_current(&raw)
    }

    pub async fn forecast(&self, city: &str) -> Result<ForecastReport, WeatherError> {
        let raw = self.fetch_forecast(city).await?;
        normalize::normalize_forecast(&raw)
    }

    async fn get_body(&self, url: &str, what: &str) -> Result<String, WeatherError> {
        debug!(what, "requesting weather data");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(what, %status, "weather service returned an error status");
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherSource for HttpWeatherClient {
    async fn fetch_current(&self, city: &str) -> Result<RawCurrentWeather, WeatherError> {
        let body = self.get_body(&self.endpoints.current_for(city), "current").await?;
        normalize::parse_current(&body)
    }

    async fn fetch_forecast(&self, city: &str) -> Result<RawForecastResponse, WeatherError> {
        let body = self.get_body(&self.endpoints.forecast_for(city), "forecast").await?;
        normalize::parse_forecast(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
