//! # Validation Module
//!
//! Input validation utilities for Vivero POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI client (forms)                                            │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE — the rules the engine actually trusts           │
//! │  ├── Required fields (item id, name, customer)                         │
//! │  └── Quantity ranges                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persisted files                                              │
//! │  └── Schema (column) checks on bulk replace                            │
//! │                                                                         │
//! │  The UI is an external collaborator: nothing it sends is trusted.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an operator-assigned item id.
///
/// ## Rules
/// - Must not be empty (after trimming)
///
/// Uniqueness is deliberately NOT checked here; see the
/// permissive-duplicates decision in DESIGN.md.
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    Ok(())
}

/// Validates an item name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    Ok(())
}

/// Validates the customer name on a sale.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }
    Ok(())
}

/// Validates a username for account creation.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    if username.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }
    Ok(())
}

/// Validates a raw password for account creation.
///
/// ## Rules
/// - Must not be empty or whitespace-only (interior whitespace is fine)
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a stock quantity (item create/update).
///
/// ## Rules
/// - Must be zero or greater (stock never goes negative)
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a requested sale quantity.
///
/// ## Rules
/// - Must be at least 1 (the upper bound — current stock — is an
///   aggregate check owned by the sale planner, not a field rule)
pub fn validate_sale_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("P-001").is_ok());
        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("   ").is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Rosa").is_ok());
        assert!(validate_item_name("").is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Ana").is_ok());
        assert!(validate_customer_name(" ").is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(25).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_sale_quantity() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
        assert!(validate_sale_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_username("ana").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_password("secreto").is_ok());
        assert!(validate_password("con espacio interior").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("   ").is_err());
    }
}
