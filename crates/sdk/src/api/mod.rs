//! API endpoint groups.

pub mod pokemon;

pub use pokemon::{ListQuery, PokemonApi, PokemonName, DEFAULT_LIST_LIMIT};
