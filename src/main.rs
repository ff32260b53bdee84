use anyhow::Context;
use rmcp::{ServiceExt, transport::stdio};
use unity_mcp_bridge::logging::init_logging;
use unity_mcp_bridge::{BridgeConfig, ToolCatalogue, UnityMcpBridgeServer};
use unity_mcp_bridge::{error_log, info_log};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = BridgeConfig::from_env().context("Invalid bridge configuration")?;
    let catalogue = ToolCatalogue::load().context("Failed to load tool catalogue")?;
    info_log!(
        "Starting Unity MCP bridge with {} tools, forwarding to {}",
        catalogue.len(),
        config.unity_url
    );

    let server = UnityMcpBridgeServer::new(&config, catalogue)?;
    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| error_log!("Failed to start MCP session: {:?}", e))?;

    let reason = service.waiting().await?;
    info_log!("MCP session ended: {:?}", reason);
    Ok(())
}
