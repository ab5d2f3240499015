use reqwest::StatusCode;
use thiserror::Error;

/// The two provider endpoints a fetch cycle calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl Endpoint {
    /// Path segment below the provider base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Current => "weather",
            Endpoint::Forecast => "forecast",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Current => f.write_str("current weather"),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

/// Why a fetch cycle produced no snapshot.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key; fetching is disabled rather than failing.
    #[error("No OpenWeather API key configured")]
    MissingCredential,

    /// The provider answered with a non-success status.
    #[error("City not found or provider error: {endpoint} request returned {status}: {body}")]
    ProviderRequestFailed {
        endpoint: Endpoint,
        status: StatusCode,
        body: String,
    },

    /// Transport error or a body that is not the expected JSON.
    #[error("{endpoint} request failed: {reason}")]
    NetworkOrParseFailure { endpoint: Endpoint, reason: String },
}

impl WeatherError {
    pub(crate) fn network(endpoint: Endpoint, err: impl std::fmt::Display) -> Self {
        WeatherError::NetworkOrParseFailure {
            endpoint,
            reason: err.to_string(),
        }
    }
}
