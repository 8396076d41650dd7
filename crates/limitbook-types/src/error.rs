//! Error types for the LimitBook matching engine.
//!
//! All errors use the `LB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 5xx: Book / matching errors
//! - 6xx: Persistence errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::OrderSide;

/// Central error enum for all LimitBook operations.
#[derive(Debug, Error)]
pub enum LimitbookError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The order failed validation (non-positive price or quantity).
    #[error("LB_ERR_100: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    // =================================================================
    // Book Errors (5xx)
    // =================================================================
    /// Peek or pop on an empty book side. Engine methods never return this.
    #[error("LB_ERR_500: {side} side of the book is empty")]
    EmptyBook { side: OrderSide },

    // =================================================================
    // Persistence Errors (6xx)
    // =================================================================
    /// A snapshot could not be decoded. The whole load is rejected.
    #[error("LB_ERR_600: Corrupt snapshot: {reason}")]
    CorruptSnapshot { reason: String },

    /// A snapshot could not be written. The in-memory book is unaffected.
    #[error("LB_ERR_601: Snapshot write failed: {reason}")]
    PersistenceWrite { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("LB_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization error.
    #[error("LB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, bad values).
    #[error("LB_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error outside the snapshot path.
    #[error("LB_ERR_903: I/O error: {0}")]
    Io(String),
}

impl LimitbookError {
    pub fn invalid_order(reason: impl Into<String>) -> Self {
        Self::InvalidOrder {
            reason: reason.into(),
        }
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::CorruptSnapshot {
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LimitbookError>;

impl From<std::io::Error> for LimitbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
