//! Observability setup.

use thiserror::Error;

mod logging;

pub use logging::init_logging;

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
