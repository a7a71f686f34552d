// MCP (Model Context Protocol) server exposing PokeAPI lookups as tools

pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use error::ToolError;
pub use server::McpServer;
