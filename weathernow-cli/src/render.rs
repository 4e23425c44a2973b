use std::fmt::Write;

use weathernow_core::{CurrentConditions, DailyForecast, ForecastReport, SearchView};

pub const SHELL_HELP: &str = "Search for weather in any city worldwide.\n\
    Type a city name, /here for your location, /forecast for the 5-day forecast \
    of the last city, /quit to leave.";

const LOADING: &str = "Loading...";

/// Empty when nothing has loaded yet.
pub fn current_card(view: &SearchView<CurrentConditions>) -> String {
    if view.is_loading() {
        return LOADING.to_string();
    }
    let Some(c) = view.result() else {
        return String::new();
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", c.city);
    let _ = writeln!(out, "{}°C  {}", c.temperature_c, c.condition);
    let _ = writeln!(out, "Feels like {}°C", c.feels_like_c);
    let _ = write!(
        out,
        "Humidity {}%  |  Wind {}km/h  |  Visibility {}km",
        c.humidity_pct, c.wind_kmh, c.visibility_km
    );
    out
}

pub fn forecast_cards(view: &SearchView<ForecastReport>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "5-Day Forecast");
    let _ = write!(out, "{}", ForecastReport::header(view.result()));

    if view.is_loading() {
        let _ = write!(out, "\n\n{LOADING}");
        return out;
    }

    for day in view.result().map(|r| r.days.as_slice()).unwrap_or_default() {
        let _ = write!(out, "\n\n{}", day_card(day));
    }
    out
}

fn day_card(day: &DailyForecast) -> String {
    format!(
        "{}  {}\n{} {}  {}° / {}°\nHumidity {}%  |  Wind {} km/h\n{}",
        day.weekday,
        day.date,
        day.icon.glyph(),
        day.condition,
        day.temp_max_c,
        day.temp_min_c,
        day.humidity_pct,
        day.wind_kmh,
        day.description,
    )
}

pub fn forecast_hint(city: &str) -> String {
    format!("View 5-Day Forecast: weathernow forecast \"{city}\"")
}
