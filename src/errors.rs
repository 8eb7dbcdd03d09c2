// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for topology correlation

use thiserror::Error;

use crate::correlation::SynthesisError;
use crate::domain::NetworkError;

/// Errors that abort a correlation run
///
/// Non-fatal conditions never surface here; they are recorded as
/// [`Diagnostic`](crate::domain::Diagnostic)s on the merged result instead.
#[derive(Debug, Error)]
pub enum CorrelationError {
    /// Credential file unreadable or malformed
    #[error("Credential error: {0}")]
    Credential(String),

    /// DNS resolution of an endpoint failed
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Provider subnet is missing a field needed to build a CIDR
    #[error("Data integrity fault: {0}")]
    DataIntegrity(String),

    /// IPv6 prefix template does not parse
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// A collaborator query failed
    #[error("Upstream query error: {0}")]
    UpstreamQuery(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for correlation operations
pub type CorrelationResult<T> = Result<T, CorrelationError>;

impl From<serde_json::Error> for CorrelationError {
    fn from(err: serde_json::Error) -> Self {
        CorrelationError::Serialization(err.to_string())
    }
}

impl From<SynthesisError> for CorrelationError {
    fn from(err: SynthesisError) -> Self {
        CorrelationError::InvalidAddress(err.to_string())
    }
}

impl From<NetworkError> for CorrelationError {
    fn from(err: NetworkError) -> Self {
        CorrelationError::DataIntegrity(err.to_string())
    }
}

impl CorrelationError {
    /// Wrap a collaborator failure with the operation that produced it
    pub fn upstream(operation: &str, target: &str, err: impl std::fmt::Display) -> Self {
        CorrelationError::UpstreamQuery(format!("{} for {}: {}", operation, target, err))
    }
}
