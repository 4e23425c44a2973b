//! Display state for the two lookup views.
//!
//! A view only changes when a request it issued completes. Each request gets
//! a sequence number; a completion whose number is older than the latest
//! issued one is dropped, so overlapping searches settle on the newest.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    client::WeatherSource,
    error::WeatherError,
    geolocation::{self, LocationAccess},
    model::{CurrentConditions, ForecastReport},
    normalize,
};

/// A non-blank, trimmed city name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Blank input issues no search.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() { None } else { Some(Self(trimmed.to_string())) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Updated,
    Failed,
    /// A newer request was issued after this one; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct SearchView<T> {
    result: Option<T>,
    loading: bool,
    last_error: Option<String>,
    last_query: Option<String>,
    issued: u64,
}

impl<T> Default for SearchView<T> {
    fn default() -> Self {
        Self { result: None, loading: false, last_error: None, last_query: None, issued: 0 }
    }
}

impl<T> SearchView<T> {
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn begin(&mut self, query: &SearchQuery) -> RequestTicket {
        self.issued += 1;
        self.loading = true;
        self.last_query = Some(query.as_str().to_string());
        RequestTicket(self.issued)
    }

    pub fn finish(&mut self, ticket: RequestTicket, outcome: Result<T, WeatherError>) -> Completion {
        if ticket.0 != self.issued {
            debug!(ticket = ticket.0, latest = self.issued, "dropping stale weather response");
            return Completion::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(value) => {
                self.result = Some(value);
                self.last_error = None;
                Completion::Updated
            }
            Err(err) => {
                warn!(error = %err, query = ?self.last_query, "weather lookup failed");
                self.last_error = Some(err.to_string());
                Completion::Failed
            }
        }
    }
}

/// Both lookup views plus the source they fetch from.
#[derive(Debug)]
pub struct WeatherSession {
    source: Arc<dyn WeatherSource>,
    current: Mutex<SearchView<CurrentConditions>>,
    forecast: Mutex<SearchView<ForecastReport>>,
    forecast_city: Mutex<Option<String>>,
}

impl WeatherSession {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self {
            source,
            current: Mutex::default(),
            forecast: Mutex::default(),
            forecast_city: Mutex::default(),
        }
    }

    /// Returns `false` when the input was blank and nothing was requested.
    pub async fn search_current(&self, input: &str) -> bool {
        let Some(query) = SearchQuery::parse(input) else {
            return false;
        };

        let ticket = self.current.lock().await.begin(&query);
        let outcome = match self.source.fetch_current(query.as_str()).await {
            Ok(raw) => normalize::normalize_current(&raw),
            Err(err) => Err(err),
        };

        let mut view = self.current.lock().await;
        if view.finish(ticket, outcome) == Completion::Updated {
            if let Some(current) = view.result() {
                *self.forecast_city.lock().await = Some(current.city.clone());
            }
        }
        true
    }

    pub async fn search_forecast(&self, input: &str) -> bool {
        let Some(query) = SearchQuery::parse(input) else {
            return false;
        };

        let ticket = self.forecast.lock().await.begin(&query);
        let outcome = match self.source.fetch_forecast(query.as_str()).await {
            Ok(raw) => normalize::normalize_forecast(&raw),
            Err(err) => Err(err),
        };

        self.forecast.lock().await.finish(ticket, outcome);
        true
    }

    /// Opens the forecast view from a `city` query parameter. Without one
    /// the view stays empty.
    pub async fn open_forecast(&self, city: Option<&str>) -> bool {
        match city {
            Some(city) => self.search_forecast(city).await,
            None => false,
        }
    }

    pub async fn search_current_here(&self, access: &dyn LocationAccess) -> bool {
        match geolocation::location_query(access.request_permission().await) {
            Some(placeholder) => self.search_current(placeholder).await,
            None => false,
        }
    }

    pub async fn search_forecast_here(&self, access: &dyn LocationAccess) -> bool {
        match geolocation::location_query(access.request_permission().await) {
            Some(placeholder) => self.search_forecast(placeholder).await,
            None => false,
        }
    }

    pub async fn current_view(&self) -> SearchView<CurrentConditions> {
        self.current.lock().await.clone()
    }

    pub async fn forecast_view(&self) -> SearchView<ForecastReport> {
        self.forecast.lock().await.clone()
    }

    /// City resolved by the last successful current-conditions search,
    /// handed to the forecast view.
    pub async fn forecast_city(&self) -> Option<String> {
        self.forecast_city.lock().await.clone()
    }
}
