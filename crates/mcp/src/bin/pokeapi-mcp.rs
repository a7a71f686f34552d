// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use pokeapi_mcp::config::ServerConfig;
use pokeapi_mcp::server::McpServer;
use pokeapi_mcp::tools::pokemon_registry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pokeapi-mcp")]
#[command(about = "MCP server exposing PokeAPI lookups over stdio", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "pokeapi-mcp.toml")]
    config: PathBuf,

    /// Override the upstream API base URL
    #[arg(long, env = "POKEAPI_BASE_URL")]
    base_url: Option<String>,
}

/// Resolves on the first interrupt signal. If the handler cannot be
/// installed the server keeps running until stdin closes.
async fn interrupt() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Interrupt received"),
        Err(e) => {
            tracing::error!("Failed to listen for interrupt: {}", e);
            std::future::pending::<()>().await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries protocol frames, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("PokeAPI MCP Server starting...");

    let config = ServerConfig::load(&args.config)?.with_base_url(args.base_url);
    let client = config.build_client()?;
    tracing::info!("Upstream API: {}", client.base_url());

    let registry = pokemon_registry(client);
    tracing::info!("Registered {} tools", registry.list_schemas().len());

    let server = McpServer::new(registry);
    server.start(interrupt()).await?;

    tracing::info!("PokeAPI MCP Server stopped");

    // The stdin reader may still be parked in a blocking read, which would
    // hold runtime shutdown open.
    std::process::exit(0)
}
