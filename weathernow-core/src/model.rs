use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Provider payloads. Only the fields the normalizers read are declared;
// everything else in the response is ignored by serde.

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWeather {
    /// Category such as "Clear", "Clouds" or "Rain".
    #[serde(default)]
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWind {
    pub speed: f64,
}

/// Current-conditions payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCurrentWeather {
    pub name: String,
    pub main: RawMain,
    pub weather: Vec<RawWeather>,
    pub wind: RawWind,
    /// Meters.
    pub visibility: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastMain {
    pub temp_max: f64,
    pub temp_min: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

/// One three-hour slot of the forecast payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastEntry {
    /// e.g. "2025-09-25 12:00:00"
    pub dt_txt: String,
    pub main: RawForecastMain,
    pub weather: Vec<RawWeather>,
    pub wind: RawWind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCity {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastResponse {
    pub city: RawCity,
    #[serde(default)]
    pub list: Vec<RawForecastEntry>,
}

/// Display-ready current conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_kmh: f64,
    pub visibility_km: f64,
    pub feels_like_c: f64,
}

/// Icon group a forecast condition is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionIcon {
    Sun,
    Cloud,
    CloudRain,
}

impl ConditionIcon {
    /// Exact match on the provider's main category. Anything outside
    /// Clear/Clouds/Rain is shown with the sun icon, same as Clear.
    pub fn from_main(main: &str) -> Self {
        match main {
            "Clouds" => Self::Cloud,
            "Rain" => Self::CloudRain,
            _ => Self::Sun,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Sun => "sun-icon",
            Self::Cloud => "cloud-icon",
            Self::CloudRain => "rain-icon",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "☀",
            Self::Cloud => "☁",
            Self::CloudRain => "☂",
        }
    }
}

/// One sampled forecast day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weekday: String,
    /// Provider category, shown as text.
    pub condition: String,
    pub icon: ConditionIcon,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub humidity_pct: u8,
    pub wind_kmh: i64,
    pub feels_like_c: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub city: String,
    pub country: &'static str,
    pub days: Vec<DailyForecast>,
}

impl ForecastReport {
    /// Title line for the forecast view; `None` means nothing was searched yet.
    pub fn header(report: Option<&ForecastReport>) -> String {
        match report {
            Some(r) if !r.city.is_empty() => format!("{}, {}", r.city, r.country),
            _ => "Search your city".to_string(),
        }
    }
}
