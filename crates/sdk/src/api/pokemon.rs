//! Pokemon API endpoints.

use crate::client::PokeApiClient;
use crate::error::{PokeApiError, PokeApiResult};
use std::fmt;

/// Page size used when a listing does not specify one.
pub const DEFAULT_LIST_LIMIT: &str = "5";

/// A Pokemon identifier, normalised to the lowercase form the API is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PokemonName(String);

impl PokemonName {
    /// Trim and lowercase a raw name. Empty names are rejected, as are `.`
    /// and `..`, which URL normalisation would collapse onto the list route.
    pub fn parse(raw: &str) -> PokeApiResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PokeApiError::InvalidInput("pokemon name must not be empty".to_string()));
        }
        if trimmed == "." || trimmed == ".." {
            return Err(PokeApiError::InvalidInput(format!(
                "pokemon name must not be a dot segment: {}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PokemonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pagination parameters for listing Pokemon, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: String,
    pub offset: Option<String>,
}

impl ListQuery {
    pub fn new(limit: impl Into<String>) -> Self {
        Self {
            limit: limit.into(),
            offset: None,
        }
    }

    pub fn with_offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// Query pairs in wire order: `limit` always, `offset` only when set.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = vec![("limit", self.limit.as_str())];
        if let Some(offset) = &self.offset {
            pairs.push(("offset", offset.as_str()));
        }
        pairs
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_LIMIT)
    }
}

/// Pokemon API for looking up and listing Pokemon.
pub struct PokemonApi<'a> {
    client: &'a PokeApiClient,
}

impl<'a> PokemonApi<'a> {
    pub(crate) fn new(client: &'a PokeApiClient) -> Self {
        Self { client }
    }

    /// Get a single Pokemon by name.
    pub async fn get(&self, name: &PokemonName) -> PokeApiResult<serde_json::Value> {
        let url = self.client.http.build_url(&["pokemon", name.as_str()], &[])?;
        self.client.http.get_json(url).await
    }

    /// List Pokemon with the given pagination.
    pub async fn list(&self, query: &ListQuery) -> PokeApiResult<serde_json::Value> {
        let url = self.client.http.build_url(&["pokemon"], &query.pairs())?;
        self.client.http.get_json(url).await
    }
}
