//! # Validation Module
//!
//! Required-field and range checks for catalog input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (external consumer)                                     │
//! │  ├── THIS MODULE: required fields, length and range rules              │
//! │  └── Immediate user feedback before any store call                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Last line of defense against malformed rows                       │
//! │                                                                         │
//! │  The repository itself does NOT validate: it persists what it is      │
//! │  given. Validation is the form layer's job, provided here as pure      │
//! │  functions so every consumer applies the same rules.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use stockbook_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Ballpoint Pen").unwrap();
//! validate_quantity(10).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::Product;
use crate::{MAX_CATEGORY_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
///
/// ## Example
/// ```rust
/// use stockbook_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Ballpoint Pen").is_ok());
/// assert!(validate_product_name("").is_err());
/// assert!(validate_product_name(&"A".repeat(200)).is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a category label.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 50 characters
pub fn validate_category(category: &str) -> ValidationResult<()> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if category.len() > MAX_CATEGORY_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_CATEGORY_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use stockbook_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(150).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (out of stock, not yet restocked)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validator
// =============================================================================

/// Validates a whole product before it is handed to the repository.
///
/// Runs every field rule above; the first failure wins.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_category(&product.category)?;
    validate_price_cents(product.price_cents)?;
    validate_quantity(product.quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Ballpoint Pen").is_ok());
        assert!(validate_product_name("A").is_ok());
        assert!(validate_product_name(&"A".repeat(100)).is_ok());

        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Office").is_ok());
        assert!(validate_category(&"C".repeat(50)).is_ok());

        assert!(validate_category("").is_err());
        assert!(validate_category("   ").is_err());
        assert!(validate_category(&"C".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(150).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(10).is_ok());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_product() {
        let pen = Product::new("Pen", None, Money::from_cents(150), 10, "Office");
        assert!(validate_product(&pen).is_ok());

        let nameless = Product::new("", None, Money::from_cents(150), 10, "Office");
        assert!(matches!(
            validate_product(&nameless),
            Err(ValidationError::Required { .. })
        ));

        let negative_price = Product::new("Pen", None, Money::from_cents(-150), 10, "Office");
        assert!(matches!(
            validate_product(&negative_price),
            Err(ValidationError::OutOfRange { .. })
        ));

        let negative_stock = Product::new("Pen", None, Money::from_cents(150), -1, "Office");
        assert!(validate_product(&negative_stock).is_err());
    }
}
