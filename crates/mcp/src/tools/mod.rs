pub mod pokemon;
mod registry;

pub use pokemon::{GetPokemonTool, ListPokemonTool};
pub use registry::{json_schema_object, json_schema_string, Tool, ToolRegistry};

use pokeapi_sdk::PokeApiClient;
use std::sync::Arc;

/// Registry holding the PokeAPI tools, all sharing one client.
pub fn pokemon_registry(client: PokeApiClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GetPokemonTool::new(client.clone())));
    registry.register(Arc::new(ListPokemonTool::new(client)));
    registry
}
