//! HTTP transport layer for the PokeAPI SDK.

use crate::config::ClientConfig;
use crate::error::{PokeApiError, PokeApiResult};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> PokeApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Build a URL below the base URL.
    ///
    /// Each segment is percent-encoded as a single path segment, so a value
    /// containing `/` or `?` cannot escape its position. Query pairs are
    /// appended in the order given; an empty slice leaves the query unset.
    pub fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> PokeApiResult<Url> {
        let mut url = self.config.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| {
                PokeApiError::Config(format!("base URL cannot have a path: {}", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    /// Execute a GET request and decode the body as arbitrary JSON.
    ///
    /// A success body that is not JSON (including an empty one) is returned
    /// as a JSON string holding the raw text.
    pub async fn get_json(&self, url: Url) -> PokeApiResult<serde_json::Value> {
        debug!(url = %url, "GET request");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request failed");
            PokeApiError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned error status");
            return Err(PokeApiError::from_response(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            debug!(url = %url, error = %e, "Success body is not JSON, relaying as text");
            serde_json::Value::String(body)
        }))
    }
}
