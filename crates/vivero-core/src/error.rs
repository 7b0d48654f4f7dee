//! # Error Types
//!
//! Domain-specific error types for vivero-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vivero-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vivero-store errors (separate crate)                                  │
//! │  └── StoreError       - Persistence failures (schema, I/O, corrupt)    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → UI client            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, id, stock levels)
//! 3. Errors are enum variants, never String
//! 4. Every error is local to the triggering operation; none crash the
//!    process and none are retried automatically

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - Updating an item id that is not in the collection
    /// - Selling a plant name that is not in the plants inventory
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A sale would drive stock negative.
    ///
    /// ## When This Occurs
    /// - A request line asks for more than the current stock
    /// - Several lines of one transaction name the same item and their
    ///   AGGREGATE exceeds the pre-transaction stock, even though each
    ///   line alone would pass
    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: String,
        available: i64,
        requested: i64,
    },

    /// Wrong username or wrong password.
    ///
    /// Deliberately carries no detail about which of the two failed.
    #[error("Authentication failed")]
    AuthFailure,

    /// The session's role does not permit the operation.
    #[error("Role is not permitted to {action}")]
    Forbidden { action: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Forbidden error for the named action.
    pub fn forbidden(action: impl Into<String>) -> Self {
        CoreError::Forbidden {
            action: action.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A sale needs at least one line.
    #[error("sale must contain at least one line")]
    EmptySale,

    /// Plants carry a unit price; the other categories must not.
    #[error("pricing does not match category '{category}'")]
    PricingMismatch { category: String },

    /// A priced item is missing its unit price.
    #[error("no unit price on record for '{item}'")]
    Unpriced { item: String },

    /// A value could not be parsed as money.
    #[error("'{value}' is not a valid amount")]
    InvalidAmount { value: String },

    /// A stored sale no longer reconciles with its own lines.
    #[error("stored total {stored} does not match line total {computed}")]
    TotalMismatch { stored: Money, computed: Money },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            item: "Rosa".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Rosa: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::TotalMismatch {
            stored: Money::from_cents(1000),
            computed: Money::from_cents(900),
        };
        assert_eq!(
            err.to_string(),
            "stored total $10.00 does not match line total $9.00"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptySale;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
