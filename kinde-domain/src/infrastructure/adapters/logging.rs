use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::ports::config::{LogFormat, LoggingConfig};
use crate::domain::errors::{DomainError, DomainResult};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Fails instead of panicking
/// when a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> DomainResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };

    result.map_err(|e| DomainError::Configuration {
        message: format!("Failed to install tracing subscriber: {}", e),
    })
}
