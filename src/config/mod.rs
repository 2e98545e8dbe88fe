//! Storefront configuration

use clap::Parser;

use crate::config::{catalog::CatalogConfig, checkout::CheckoutConfig, logging::LoggingConfig};

pub mod catalog;
pub mod checkout;
pub mod logging;

pub use logging::LogFormat;

/// Barista café storefront configuration
#[derive(Debug, Parser)]
#[command(name = "barista", about = "Café ordering storefront", long_about = None)]
pub struct StorefrontConfig {
    /// Menu and options document settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Checkout timing settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use crate::catalog::DocumentSource;

    use super::*;

    #[test]
    fn defaults_point_at_bundled_fixtures() -> TestResult {
        let config = StorefrontConfig::try_parse_from(["barista"])?;

        assert_eq!(
            config.catalog.menu,
            DocumentSource::File("fixtures/menu.json".into())
        );
        assert_eq!(config.catalog.currency, "THB");
        assert_eq!(
            config.checkout.timings().processing_delay,
            Duration::from_millis(2000)
        );
        assert_eq!(
            config.checkout.timings().dismiss_delay,
            Duration::from_millis(3000)
        );

        Ok(())
    }

    #[test]
    fn urls_and_delays_can_be_overridden() -> TestResult {
        let config = StorefrontConfig::try_parse_from([
            "barista",
            "--menu",
            "https://example.com/menu.json",
            "--processing-delay-ms",
            "10",
            "--log-format",
            "json",
        ])?;

        assert_eq!(
            config.catalog.menu,
            DocumentSource::Url("https://example.com/menu.json".to_string())
        );
        assert_eq!(
            config.checkout.timings().processing_delay,
            Duration::from_millis(10)
        );
        assert!(matches!(config.logging.log_format, LogFormat::Json));

        Ok(())
    }
}
