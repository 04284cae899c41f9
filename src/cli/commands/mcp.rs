//! MCP command implementation.

use crate::backend::YoutubeBackend;
use crate::config::Settings;
use crate::mcp::McpServer;
use anyhow::Result;

/// Run the MCP server.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    let backend = YoutubeBackend::new(&settings.youtube)?;
    let server = McpServer::new(backend, &settings.server);
    server.run().await
}
