//! House Price Predictor - Main Entry Point

use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("HOUSE_PRICE_CONFIG").ok();
    let config = AppConfig::load(config_path.as_deref())?;
    init_logging(&config.logging)?;

    info!("=== House Price Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Model {} ({:?}), features {}",
        config.model.path.display(),
        config.model.format,
        config.model.features_path.display()
    );

    run_server(config).await
}
