//! Catalog Config

use std::time::Duration;

use clap::Args;

use crate::catalog::DocumentSource;

/// Where the menu and options documents come from.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Menu document (file path or http(s) URL)
    #[arg(long, env = "BARISTA_MENU", default_value = "fixtures/menu.json")]
    pub menu: DocumentSource,

    /// Options document (file path or http(s) URL)
    #[arg(
        long,
        env = "BARISTA_OPTIONS",
        default_value = "fixtures/menu-options.json"
    )]
    pub options: DocumentSource,

    /// ISO 4217 code of the currency the documents are priced in
    #[arg(long, env = "BARISTA_CURRENCY", default_value = "THB")]
    pub currency: String,

    /// Timeout for fetching URL documents, in seconds.
    #[arg(long, env = "BARISTA_FETCH_TIMEOUT_SECS", default_value_t = 10_u64)]
    pub fetch_timeout_secs: u64,
}

impl CatalogConfig {
    /// Fetch timeout as a [`Duration`].
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
