mod logger;

use clap::Parser;
use estate_catalog_error::{ECError, ECResult};
use estate_catalog_models::{constants::DEFAULT_CONFIG_FILE_NAME, settings::Settings};
use estate_catalog_storage::ECDbManager;
use estate_catalog_web::ECWebServer;
use logger::Logger;
use std::{env::current_dir, path::PathBuf};
use tracing::info;

/// Estate Catalog - schema manager for the marketplace admin backend
///
/// Serves the admin REST API for maintaining the attribute catalog,
/// property types and the ordered attribute scope of each type.
#[derive(Parser)]
#[command(name = "estate-catalog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Estate Catalog", long_about = None)]
struct Cli {
    /// Sets a custom config file with full path
    ///
    /// If not specified, the service will look for 'catalog.toml'
    /// in the current working directory.
    #[arg(short, long, env = "EC_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> ECResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(p) => p,
        None => {
            let dir = current_dir()
                .map_err(|e| ECError::from(format!("Failed to get current directory: {e}")))?;
            dir.join(DEFAULT_CONFIG_FILE_NAME)
        }
    };

    let settings = Settings::new(config_path.to_string_lossy().to_string())?;

    let mut logger = Logger::new(None);
    logger.initialize(&settings.general.log_dir)?;

    let db_manager = ECDbManager::init(&settings).await?;
    let web_server = ECWebServer::init(&settings, db_manager.get_connection()?).await?;

    info!("Catalog service started, press Ctrl+C to stop");
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| ECError::from(format!("Failed to listen for shutdown signal: {e}")))?;

    info!("Shutdown signal received");
    web_server.stop().await?;
    db_manager.close().await?;
    Ok(())
}
