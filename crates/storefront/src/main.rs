//! # Storefront Demo
//!
//! Starts the storefront against the configured API, loads the first page of the catalog and
//! shuts down.
//!
//! ```bash
//! RUST_LOG=info cargo run -p storefront -- storefront.toml
//! ```

use std::path::PathBuf;
use store_framework::tracing::setup_tracing;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::Storefront;
use storefront::model::LoadStatus;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = StorefrontConfig::load(config_path.as_deref()).map_err(|e| e.to_string())?;
    info!(api = %config.api_base_url, "Starting storefront");

    let system = Storefront::connect(&config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("catalog_browse");
    let first_page = async {
        info!("Loading first page");
        system.search.set_keyword("").await
    }
    .instrument(span)
    .await;

    match first_page {
        Ok(page) if page.status == LoadStatus::Succeeded => info!(
            items = page.items.len(),
            current_page = page.current_page,
            total_pages = page.total_pages,
            "First page loaded"
        ),
        Ok(page) => error!(
            error = page.error_message.as_deref().unwrap_or("unknown"),
            "First page failed to load"
        ),
        Err(e) => error!(error = %e, "Page store unavailable"),
    }

    system.shutdown().await?;

    info!("Storefront demo completed");
    Ok(())
}
