//! Tracing subscriber initialization.
//!
//! Logs are JSON in production and human-readable otherwise. The filter comes
//! from `RUST_LOG` when set, falling back to `server.log_level`.

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ServerConfig;

/// Errors that can occur during telemetry initialization
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive could not be parsed
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    /// A global subscriber was already installed
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Builds the filter from `RUST_LOG`, or from `fallback` when unset.
pub fn env_filter(fallback: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(fallback).map_err(|e| TelemetryError::InvalidFilter {
            directive: fallback.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Installs the global tracing subscriber.
pub fn init_tracing(server: &ServerConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(&server.log_level)?;

    let (json_layer, text_layer) = if server.is_production() {
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true);
        (Some(layer), None)
    } else {
        (None, Some(fmt::layer().with_target(true)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_level_parses() {
        let server = ServerConfig::default();
        assert!(EnvFilter::try_new(&server.log_level).is_ok());
    }

    #[test]
    fn invalid_directive_is_reported() {
        let err = EnvFilter::try_new("charter_forge=notalevel")
            .map_err(|e| TelemetryError::InvalidFilter {
                directive: "charter_forge=notalevel".to_string(),
                reason: e.to_string(),
            })
            .unwrap_err();
        assert!(err.to_string().contains("charter_forge=notalevel"));
    }
}
