//! Barista café storefront

use std::io;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;

use barista::{
    catalog::CatalogLoader, config::StorefrontConfig, observability, pricing::currency_from_code,
    shell::Shell, storefront::Storefront,
};

/// Barista entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from .env and CLI arguments
    let config = StorefrontConfig::load().unwrap_or_else(|e| e.exit());

    observability::init_logging(&config.logging).context("failed to initialise logging")?;

    let currency = currency_from_code(&config.catalog.currency)
        .with_context(|| format!("unsupported currency {}", config.catalog.currency))?;

    let loader = CatalogLoader::new(
        config.catalog.menu.clone(),
        config.catalog.options.clone(),
        currency,
    )
    .with_timeout(config.catalog.fetch_timeout());

    info!(
        menu = %config.catalog.menu,
        options = %config.catalog.options,
        "loading catalog"
    );

    // A failed load is shown in the shell rather than aborting
    let catalog = loader.load_state().await;

    let storefront = Storefront::new(catalog, currency, config.checkout.timings());

    let mut shell = Shell::new(storefront, io::stdout().lock());

    shell
        .run(BufReader::new(tokio::io::stdin()))
        .await
        .context("shell terminated")?;

    Ok(())
}
