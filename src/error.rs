//! Domain error types for the benchmark result store.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use sea_orm::DbErr;

use crate::auth::{Principal, Privilege};

/// Store-level errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required attribute is absent or has the wrong semantic type
    #[error("Validation failed for '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    /// The principal does not hold the requested privilege
    #[error("Principal '{principal}' is not authorized to {privilege}")]
    Authorization {
        principal: Principal,
        privilege: Privilege,
    },

    /// The storage engine cannot accept the operation (connectivity, capacity)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The engine accepted the request but the statement failed
    #[error("Database error: {0}")]
    Database(String),

    /// Malformed or refused input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StoreError {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            StoreError::Validation { field, .. } => Some(*field),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, StoreError::Authorization { .. })
    }

    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, StoreError::StorageUnavailable(_))
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// Conversion implementations for common error types

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                StoreError::StorageUnavailable(err.to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}
