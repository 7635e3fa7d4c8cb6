//! Error types for Stowage core values

use thiserror::Error;

/// Validation errors raised when a list configuration is assembled.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate {what} key: {key}")]
    DuplicateKey { what: String, key: String },
}

/// Errors raised when parsing user-facing identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown entity kind: {0}")]
    UnknownEntityKind(String),

    #[error("Unknown destination type: {0}")]
    UnknownDestinationType(String),
}
