//! Error types for the command-line client.

use crate::api_client::ApiClientError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use stowage_core::{ParseError, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiClientError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Usage: {0}")]
    Usage(String),
    #[error("Not signed in")]
    Unauthenticated,
    #[error("{0}")]
    Fetch(String),
}
