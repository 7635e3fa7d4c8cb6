//! Tracing subscriber setup.

use crate::config::{LogConfig, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "stowage=info,warn";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
    #[error("Failed to init subscriber: {0}")]
    Init(String),
}

/// Filter from `RUST_LOG`, else the configured directive, else
/// [`DEFAULT_LOG_FILTER`].
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = config.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
    EnvFilter::try_new(directive).map_err(|e| TelemetryError::InvalidFilter {
        filter: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init_tracing(config: &LogConfig) -> Result<(), TelemetryError> {
    let env_filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::debug!(format = ?config.format, "tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_filter_must_parse() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let bad = LogConfig {
            format: LogFormat::Pretty,
            filter: Some("stowage=loud".to_string()),
        };
        assert!(matches!(
            env_filter(&bad),
            Err(TelemetryError::InvalidFilter { .. })
        ));

        let good = LogConfig {
            format: LogFormat::Json,
            filter: None,
        };
        assert!(env_filter(&good).is_ok());
    }
}
