// citrate/core/transactions/src/error.rs

use thiserror::Error;

/// Errors raised while building, encoding or signing transactions.
///
/// Encoding is deterministic, so none of these are transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Malformed field `{field}`: {reason}")]
    MalformedField { field: String, reason: String },

    #[error("Signing failed: {0}")]
    Signing(String),
}

impl TransactionError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TransactionError::MalformedField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(reason: impl Into<String>) -> Self {
        TransactionError::UnsupportedOperation(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, TransactionError>;
