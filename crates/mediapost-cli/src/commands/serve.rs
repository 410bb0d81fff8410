//! `mediapost serve` -- run the gateway over stdio.

use mediapost_gateway::GatewayServer;
use mediapost_types::GatewayConfig;
use tokio::io::BufReader;
use tracing::info;

/// Serve JSON-RPC and line-protocol requests on stdin/stdout until EOF.
pub async fn run(config: &GatewayConfig) -> anyhow::Result<()> {
    info!(
        timeout_secs = config.timeout_secs,
        "starting mediapost gateway on stdio"
    );
    let server = GatewayServer::from_config(config)?;
    let reader = BufReader::new(tokio::io::stdin());
    server.run(reader, tokio::io::stdout()).await?;
    Ok(())
}
