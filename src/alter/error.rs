//! Alteration error definitions.

use thiserror::Error;

/// Reasons an alteration is rejected. Raised before any shared state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlterError {
    /// The request names strategies that do not exist.
    #[error("Traffic rule(s) do not exist: {}", .names.join(", "))]
    MissingStrategy { names: Vec<String> },

    /// The request uses algorithm or load balancer types nobody registered.
    #[error("Invalid traffic algorithm configuration: {}", .names.join(", "))]
    InvalidAlgorithmConfiguration { names: Vec<String> },
}

impl AlterError {
    /// Offending names carried by the error.
    pub fn names(&self) -> &[String] {
        match self {
            AlterError::MissingStrategy { names } => names,
            AlterError::InvalidAlgorithmConfiguration { names } => names,
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AlterError::MissingStrategy { .. } => "missing_strategy",
            AlterError::InvalidAlgorithmConfiguration { .. } => "invalid_algorithm",
        }
    }
}

/// Result type for alteration operations.
pub type AlterResult<T> = Result<T, AlterError>;
