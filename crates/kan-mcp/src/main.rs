//! Kan MCP server binary.
//!
//! This binary runs the MCP server using stdio transport.

use kan::client::KanClient;
use kan::config::{API_KEY_VAR, KanConfig};
use kan_mcp::{KanMcpServer, logging};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match KanConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Generate a key at https://kan.bn (Account Settings), then set {API_KEY_VAR}=kan_..."
            );
            std::process::exit(1);
        }
    };

    logging::init(config.debug);
    tracing::info!(base_url = %config.base_url, debug = config.debug, "Starting kan-mcp server");

    let client = KanClient::from_config(&config)?;
    let server = KanMcpServer::new(Arc::new(client));
    server.run().await?;

    Ok(())
}
