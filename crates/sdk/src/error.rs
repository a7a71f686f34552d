//! Error types for the PokeAPI SDK.

use serde::Deserialize;

/// Result type for SDK operations.
pub type PokeApiResult<T> = Result<T, PokeApiError>;

/// Error types that can occur when talking to PokeAPI.
#[derive(Debug, thiserror::Error)]
pub enum PokeApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl PokeApiError {
    /// Whether this error came from the HTTP layer (non-2xx status or
    /// network failure) as opposed to a local fault.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }

    /// Human-readable message for an upstream failure.
    ///
    /// For an API error this is the upstream-supplied `message` when the body
    /// carried one, otherwise the generic status text. For a network failure
    /// it is the client's error text.
    pub fn upstream_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Http(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|response| response.message)
            .unwrap_or_else(|| format!("Request failed with status code {}", status));

        Self::Api { status, message }
    }
}

/// Error body shape some upstream failures carry.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}
