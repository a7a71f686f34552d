//! # PokeAPI SDK
//!
//! Minimal async client for the [PokeAPI](https://pokeapi.co) REST service.
//! Responses are returned as raw JSON so callers can relay them unchanged.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pokeapi_sdk::{ListQuery, PokeApiClient, PokeApiResult, PokemonName};
//!
//! #[tokio::main]
//! async fn main() -> PokeApiResult<()> {
//!     let client = PokeApiClient::builder().build()?;
//!
//!     let pikachu = client.pokemon().get(&PokemonName::parse("Pikachu")?).await?;
//!     println!("{}", pikachu["id"]);
//!
//!     let page = client.pokemon().list(&ListQuery::new("10").with_offset("20")).await?;
//!     println!("{}", page["count"]);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use api::{ListQuery, PokemonName, DEFAULT_LIST_LIMIT};
pub use client::{PokeApiClient, PokeApiClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{PokeApiError, PokeApiResult};
