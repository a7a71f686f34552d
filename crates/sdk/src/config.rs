//! Configuration types for the PokeAPI SDK.

use std::time::Duration;
use url::Url;

/// Public PokeAPI endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Configuration for the PokeAPI client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the version prefix.
    pub base_url: Url,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
        }
    }
}
