//! Pure transforms from provider payloads to display records.
//!
//! Neither function looks at the clock or keeps state, so normalizing the
//! same payload twice gives the same output.

use chrono::NaiveDateTime;

use crate::{
    error::WeatherError,
    model::{
        ConditionIcon, CurrentConditions, DailyForecast, ForecastReport, RawCurrentWeather,
        RawForecastEntry, RawForecastResponse,
    },
};

/// Forecast slots per day at the provider's three-hour cadence.
pub const SLOTS_PER_DAY: usize = 8;

/// Upper bound on sampled forecast days.
pub const MAX_DAYS: usize = 5;

pub const UNKNOWN_COUNTRY: &str = "Unknown Country";

pub fn parse_current(body: &str) -> Result<RawCurrentWeather, WeatherError> {
    Ok(serde_json::from_str(body)?)
}

pub fn parse_forecast(body: &str) -> Result<RawForecastResponse, WeatherError> {
    Ok(serde_json::from_str(body)?)
}

pub fn normalize_current(raw: &RawCurrentWeather) -> Result<CurrentConditions, WeatherError> {
    let condition = raw
        .weather
        .first()
        .map(|w| w.description.clone())
        .ok_or_else(|| WeatherError::malformed("current weather has no weather entries"))?;

    Ok(CurrentConditions {
        city: raw.name.clone(),
        temperature_c: raw.main.temp,
        condition,
        humidity_pct: raw.main.humidity,
        wind_kmh: current_wind_kmh(raw.wind.speed),
        visibility_km: raw.visibility / 1000.0,
        feels_like_c: raw.main.feels_like,
    })
}

/// Display adjustment used for the current-conditions card, one decimal.
/// Not a unit conversion; forecast days use [`forecast_wind_kmh`] instead.
pub fn current_wind_kmh(speed: f64) -> f64 {
    ((speed + 1.0) * 2.0 * 10.0).round() / 10.0
}

pub fn forecast_wind_kmh(speed: f64) -> i64 {
    speed.round() as i64
}

/// Every eighth slot starting at index 0, at most [`MAX_DAYS`] of them.
///
/// Counts slots only. Timestamps are not consulted, so a provider that
/// changes cadence or starts mid-day shifts which hour each "day" shows.
pub fn sample_daily<T>(entries: &[T]) -> impl Iterator<Item = &T> {
    entries.iter().step_by(SLOTS_PER_DAY).take(MAX_DAYS)
}

pub fn normalize_forecast(raw: &RawForecastResponse) -> Result<ForecastReport, WeatherError> {
    let days = sample_daily(&raw.list)
        .map(normalize_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForecastReport {
        city: raw.city.name.clone(),
        country: country_display_name(&raw.city.country),
        days,
    })
}

fn normalize_entry(entry: &RawForecastEntry) -> Result<DailyForecast, WeatherError> {
    let when = parse_slot_time(&entry.dt_txt)?;
    let weather = entry.weather.first().ok_or_else(|| {
        WeatherError::malformed(format!("forecast slot {} has no weather entries", entry.dt_txt))
    })?;

    Ok(DailyForecast {
        date: when.date(),
        weekday: when.format("%A").to_string(),
        condition: weather.main.clone(),
        icon: ConditionIcon::from_main(&weather.main),
        temp_max_c: entry.main.temp_max,
        temp_min_c: entry.main.temp_min,
        humidity_pct: entry.main.humidity,
        wind_kmh: forecast_wind_kmh(entry.wind.speed),
        feels_like_c: entry.main.feels_like,
        description: weather.description.clone(),
    })
}

/// Provider timestamps are "YYYY-MM-DD HH:MM:SS"; normalize to the
/// combined `T` form before parsing.
fn parse_slot_time(dt_txt: &str) -> Result<NaiveDateTime, WeatherError> {
    let combined = dt_txt.trim().replacen(' ', "T", 1);
    NaiveDateTime::parse_from_str(&combined, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| WeatherError::malformed(format!("bad forecast timestamp {dt_txt:?}: {e}")))
}

pub fn country_display_name(code: &str) -> &'static str {
    match code.to_uppercase().as_str() {
        "IN" => "India",
        "US" => "United States",
        "GB" => "United Kingdom",
        "CA" => "Canada",
        "AU" => "Australia",
        _ => UNKNOWN_COUNTRY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawCity, RawForecastMain, RawMain, RawWeather, RawWind};
    use chrono::NaiveDate;

    fn current(speed: f64, visibility: f64) -> RawCurrentWeather {
        RawCurrentWeather {
            name: "London".into(),
            main: RawMain { temp: 14.2, feels_like: 13.1, humidity: 81 },
            weather: vec![RawWeather { main: "Clouds".into(), description: "broken clouds".into() }],
            wind: RawWind { speed },
            visibility,
        }
    }

    fn entry(index: usize, main: &str, max: f64, min: f64, humidity: u8, wind: f64) -> RawForecastEntry {
        let day = 1 + index / SLOTS_PER_DAY;
        let hour = (index % SLOTS_PER_DAY) * 3;
        RawForecastEntry {
            dt_txt: format!("2025-09-{day:02} {hour:02}:00:00"),
            main: RawForecastMain { temp_max: max, temp_min: min, feels_like: max - 1.0, humidity },
            weather: vec![RawWeather {
                main: main.into(),
                description: format!("{} today", main.to_lowercase()),
            }],
            wind: RawWind { speed: wind },
        }
    }

    fn forecast(list: Vec<RawForecastEntry>, country: &str) -> RawForecastResponse {
        RawForecastResponse {
            city: RawCity { name: "Mumbai".into(), country: country.into() },
            list,
        }
    }

    #[test]
    fn current_copies_fields_verbatim() {
        let out = normalize_current(&current(4.12, 10000.0)).unwrap();

        assert_eq!(out.city, "London");
        assert_eq!(out.temperature_c, 14.2);
        assert_eq!(out.feels_like_c, 13.1);
        assert_eq!(out.humidity_pct, 81);
        assert_eq!(out.condition, "broken clouds");
    }

    #[test]
    fn current_visibility_is_meters_over_thousand() {
        for meters in [0.0, 1.0, 750.0, 9999.0, 10000.0] {
            let out = normalize_current(&current(1.0, meters)).unwrap();
            assert_eq!(out.visibility_km, meters / 1000.0);
        }
    }

    #[test]
    fn current_wind_uses_offset_and_scale() {
        for speed in [0.0, 0.5, 1.03, 3.3, 7.77, 12.0] {
            let out = normalize_current(&current(speed, 1000.0)).unwrap();
            assert_eq!(out.wind_kmh, ((speed + 1.0) * 2.0 * 10.0).round() / 10.0);
        }
        assert_eq!(current_wind_kmh(3.3), 8.6);
        assert_eq!(current_wind_kmh(0.0), 2.0);
    }

    #[test]
    fn current_without_weather_entries_is_malformed() {
        let mut raw = current(1.0, 1000.0);
        raw.weather.clear();

        let err = normalize_current(&raw).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn parse_current_reports_missing_fields() {
        let err = parse_current(r#"{"name":"Paris","main":{"temp":1.0}}"#).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn sampling_picks_every_eighth_index() {
        let idx: Vec<usize> = (0..40).collect();
        assert_eq!(sample_daily(&idx).copied().collect::<Vec<_>>(), vec![0, 8, 16, 24, 32]);

        let idx: Vec<usize> = (0..17).collect();
        assert_eq!(sample_daily(&idx).copied().collect::<Vec<_>>(), vec![0, 8, 16]);

        // more than five days available, still capped
        let idx: Vec<usize> = (0..60).collect();
        assert_eq!(sample_daily(&idx).count(), MAX_DAYS);

        let empty: Vec<usize> = Vec::new();
        assert_eq!(sample_daily(&empty).count(), 0);
    }

    #[test]
    fn forty_slot_scenario() {
        let list = (0..40)
            .map(|i| match i {
                0 => entry(i, "Clear", 22.0, 15.0, 65, 3.3),
                8 => entry(i, "Clouds", 18.0, 12.0, 72, 2.2),
                _ => entry(i, "Rain", 10.0, 5.0, 90, 9.9),
            })
            .collect();

        let report = normalize_forecast(&forecast(list, "IN")).unwrap();

        assert_eq!(report.days.len(), 5);
        let first = &report.days[0];
        let second = &report.days[1];

        assert_eq!(first.condition, "Clear");
        assert_eq!(first.icon, ConditionIcon::Sun);
        assert_eq!(first.temp_max_c, 22.0);
        assert_eq!(first.temp_min_c, 15.0);
        assert_eq!(first.humidity_pct, 65);
        assert_eq!(first.wind_kmh, 3);

        assert_eq!(second.condition, "Clouds");
        assert_eq!(second.icon, ConditionIcon::Cloud);
        assert_eq!(second.humidity_pct, 72);
        assert_eq!(second.wind_kmh, 2);

        assert_eq!(report.city, "Mumbai");
        assert_eq!(report.country, "India");
    }

    #[test]
    fn short_list_yields_single_day() {
        let list = (0..3).map(|i| entry(i, "Clear", 20.0, 10.0, 50, 1.0)).collect();
        let report = normalize_forecast(&forecast(list, "US")).unwrap();

        assert_eq!(report.days.len(), 1);
        assert_eq!(report.days[0].date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let report = normalize_forecast(&forecast(Vec::new(), "GB")).unwrap();
        assert!(report.days.is_empty());
        assert_eq!(report.country, "United Kingdom");
    }

    #[test]
    fn missing_list_parses_as_empty() {
        let raw = parse_forecast(r#"{"city":{"name":"Oslo","country":"NO"}}"#).unwrap();
        let report = normalize_forecast(&raw).unwrap();

        assert!(report.days.is_empty());
        assert_eq!(report.country, UNKNOWN_COUNTRY);
    }

    #[test]
    fn date_and_weekday_come_from_one_timestamp() {
        let mut e = entry(0, "Clear", 20.0, 10.0, 50, 1.0);
        e.dt_txt = "2025-09-25 21:00:00".into();

        let report = normalize_forecast(&forecast(vec![e], "CA")).unwrap();
        let day = &report.days[0];

        assert_eq!(day.date.to_string(), "2025-09-25");
        assert_eq!(day.weekday, "Thursday");
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        let mut e = entry(0, "Clear", 20.0, 10.0, 50, 1.0);
        e.dt_txt = "tomorrow-ish".into();

        let err = normalize_forecast(&forecast(vec![e], "CA")).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn unsampled_slots_are_not_validated() {
        let mut list: Vec<_> = (0..3).map(|i| entry(i, "Clear", 20.0, 10.0, 50, 1.0)).collect();
        list[1].weather.clear();

        assert_eq!(normalize_forecast(&forecast(list, "CA")).unwrap().days.len(), 1);
    }

    #[test]
    fn forecast_wind_is_plain_rounding() {
        assert_eq!(forecast_wind_kmh(3.3), 3);
        assert_eq!(forecast_wind_kmh(2.5), 3);
        assert_eq!(forecast_wind_kmh(2.2), 2);
        assert_eq!(forecast_wind_kmh(0.0), 0);
    }

    #[test]
    fn unmapped_categories_use_sun_icon() {
        let list = vec![entry(0, "Snow", 0.0, -4.0, 88, 5.0)];
        let report = normalize_forecast(&forecast(list, "CA")).unwrap();

        assert_eq!(report.days[0].condition, "Snow");
        assert_eq!(report.days[0].icon, ConditionIcon::Sun);
    }

    #[test]
    fn country_lookup_ignores_case() {
        for code in ["in", "In", "IN"] {
            assert_eq!(country_display_name(code), "India");
        }
        for code in ["au", "Au", "AU"] {
            assert_eq!(country_display_name(code), "Australia");
        }
        assert_eq!(country_display_name("us"), "United States");
        assert_eq!(country_display_name("gb"), "United Kingdom");
        assert_eq!(country_display_name("ca"), "Canada");
        assert_eq!(country_display_name("FR"), UNKNOWN_COUNTRY);
        assert_eq!(country_display_name("DE"), UNKNOWN_COUNTRY);
        assert_eq!(country_display_name(""), UNKNOWN_COUNTRY);
    }

    #[test]
    fn normalizing_twice_is_identical() {
        let raw = current(5.5, 8000.0);
        assert_eq!(normalize_current(&raw).unwrap(), normalize_current(&raw).unwrap());

        let raw = forecast((0..40).map(|i| entry(i, "Rain", 9.0, 3.0, 95, 6.6)).collect(), "AU");
        assert_eq!(normalize_forecast(&raw).unwrap(), normalize_forecast(&raw).unwrap());
    }
}
