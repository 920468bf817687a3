//! RUL Inference Gateway - Main Entry Point

use api::{init_logging, run_server, GatewayConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::load()?;
    init_logging(config.log_json)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    info!("=== RUL Gateway v{} ===", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(config).await {
        error!("Gateway failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
