//! Core library for the `weathernow` CLI.
//!
//! This crate defines:
//! - Provider payload types and the normalizers that turn them into display records
//! - An HTTP client for the current-conditions and forecast endpoints
//! - View state that settles overlapping lookups on the latest request
//! - Configuration of endpoints and location access
//!
//! It is used by `weathernow-cli`, but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod normalize;
pub mod view;

pub use client::{Endpoints, HttpWeatherClient, WeatherSource};
pub use config::Config;
pub use error::WeatherError;
pub use geolocation::{ConfiguredLocationAccess, LocationAccess, LocationPermission};
pub use model::{ConditionIcon, CurrentConditions, DailyForecast, ForecastReport};
pub use view::{SearchView, WeatherSession};
