//! Checkout Config

use std::time::Duration;

use clap::Args;

use crate::checkout::CheckoutTimings;

/// Checkout delays.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Simulated payment verification time, in milliseconds.
    #[arg(long, env = "BARISTA_PROCESSING_DELAY_MS", default_value_t = 2_000_u64)]
    pub processing_delay_ms: u64,

    /// Time the success screen stays up after the order is acknowledged, in milliseconds.
    #[arg(long, env = "BARISTA_DISMISS_DELAY_MS", default_value_t = 3_000_u64)]
    pub dismiss_delay_ms: u64,
}

impl CheckoutConfig {
    /// The configured delays.
    #[must_use]
    pub fn timings(&self) -> CheckoutTimings {
        CheckoutTimings {
            processing_delay: Duration::from_millis(self.processing_delay_ms),
            dismiss_delay: Duration::from_millis(self.dismiss_delay_ms),
        }
    }
}
