//! # Store Error Types
//!
//! Error types for the persistence layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error / serde_json::Error                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI client shows a recoverable message; nothing is retried             │
//! │  automatically and nothing crashes the process                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use vivero_core::{Category, CoreError, ValidationError};

/// Persistence-layer errors.
///
/// Wraps domain errors from vivero-core and adds the failure modes only
/// the storage boundary can produce.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A business rule or validation failure from the core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bulk-loaded file's column set is not a superset of the
    /// category's canonical schema.
    ///
    /// ## When This Occurs
    /// - Uploading a plants CSV without `Precio Unitario`
    /// - Uploading any category CSV without `Cantidad`
    ///
    /// The previously persisted collection is left untouched.
    #[error("{category} file is missing required columns: {missing:?}")]
    SchemaMismatch {
        category: Category,
        missing: Vec<String>,
    },

    /// Account creation hit an existing username.
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// A persisted file exists but a cell in it cannot be interpreted.
    ///
    /// ## When This Occurs
    /// - `Cantidad` holds something that is not an integer
    /// - `Precio Unitario` is not a decimal amount
    /// - A ledger row's date or line array fails to parse
    #[error("{file}: {reason}")]
    Corrupt { file: String, reason: String },

    /// The underlying read or write failed.
    ///
    /// Surfaced, never retried; the caller decides whether to re-prompt.
    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl StoreError {
    /// Creates a Corrupt error for a given file and reason.
    pub fn corrupt(file: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            file: file.into(),
            reason: reason.into(),
        }
    }
}

/// Validation failures chain through the core taxonomy.
impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Persistence(err.to_string())
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Persistence(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_message() {
        let err = StoreError::SchemaMismatch {
            category: Category::Plants,
            missing: vec!["Cantidad".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "plantas file is missing required columns: [\"Cantidad\"]"
        );
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err: StoreError = CoreError::AuthFailure.into();
        assert_eq!(err.to_string(), "Authentication failed");
    }
}
