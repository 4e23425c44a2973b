/// Failures a weather lookup can end in.
///
/// Every variant is handled the same way by [`crate::view::SearchView`]:
/// logged, loading cleared, previous result left on screen.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("request to weather service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed weather response: {0}")]
    MalformedResponse(String),

    #[error(
        "`{0}` is not configured.\n\
         Hint: run `weathernow configure` or set the matching WEATHERNOW_* variable."
    )]
    NotConfigured(&'static str),
}

impl WeatherError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
