//! Main client for the PokeAPI SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::PokeApiResult;
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with PokeAPI.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl PokeApiClient {
    /// Create a new client builder.
    pub fn builder() -> PokeApiClientBuilder {
        PokeApiClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> PokeApiResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Get the Pokemon API.
    pub fn pokemon(&self) -> PokemonApi<'_> {
        PokemonApi::new(self)
    }
}

/// Builder for creating a PokeApiClient.
pub struct PokeApiClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl PokeApiClientBuilder {
    /// Create a new builder pointing at the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set the base URL of the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> PokeApiResult<PokeApiClient> {
        let base_url = Url::parse(&self.base_url)?;

        let mut config = ClientConfig::new(base_url);
        config.timeout = self.timeout;

        PokeApiClient::from_config(config)
    }
}

impl Default for PokeApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
