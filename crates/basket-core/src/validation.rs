//! # Validation Module
//!
//! Input validation utilities for Basket.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: The type system                                               │
//! │  ├── Ids are integers, rates are basis points, money is cents           │
//! │  └── A whole class of "null amount" bugs cannot be expressed            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Empty/blank strings where a key is required                        │
//! │  └── Non-finite or out-of-range numeric input                           │
//! │                                                                         │
//! │  Anything that passes both layers is safe for the cart to persist.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::validation::{validate_tax_code, validate_discount_factor};
//!
//! assert!(validate_tax_code("PDV").is_ok());
//! assert!(validate_tax_code("  ").is_err());
//! assert!(validate_discount_factor(0.5).is_ok());
//! assert!(validate_discount_factor(f64::NAN).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Rate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn require_non_blank(value: &str, field: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a tax code key (e.g. "PDV", "VAT").
pub fn validate_tax_code(code: &str) -> ValidationResult<()> {
    require_non_blank(code, "tax code")
}

/// Validates a product description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    require_non_blank(description, "description")
}

/// Validates a cart/namespace id.
pub fn validate_cart_id(id: &str) -> ValidationResult<()> {
    require_non_blank(id, "cart id")
}

/// Validates a custom attribute key.
pub fn validate_attribute_key(key: &str) -> ValidationResult<()> {
    require_non_blank(key, "attribute key")
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a discount factor and converts it to a `Rate`.
///
/// ## Rules
/// - Must be a finite number (NaN and infinities rejected)
/// - Must lie in `[0.0, 1.0]`: 0.5 means "pay half", 1.0 means full price
pub fn validate_discount_factor(factor: f64) -> ValidationResult<Rate> {
    if !factor.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "discount factor".to_string(),
        });
    }

    if !(0.0..=1.0).contains(&factor) {
        return Err(ValidationError::OutOfRange {
            field: "discount factor".to_string(),
            min: 0.0,
            max: 1.0,
        });
    }

    Rate::from_fraction(factor)
}

/// Validates a product cost in cents (must not be negative).
pub fn validate_cost_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "cost".to_string(),
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
    fn test_blank_keys_rejected() {
        assert!(validate_tax_code("PDV").is_ok());
        assert!(validate_tax_code("").is_err());
        assert!(validate_tax_code("   ").is_err());

        assert!(validate_cart_id("session-1").is_ok());
        assert!(validate_cart_id("").is_err());

        assert!(validate_attribute_key("author").is_ok());
        assert!(validate_attribute_key(" ").is_err());
    }

    #[test]
    fn test_discount_factor_range() {
        assert_eq!(validate_discount_factor(0.5).unwrap().bps(), 5000);
        assert_eq!(validate_discount_factor(0.0).unwrap().bps(), 0);
        assert_eq!(validate_discount_factor(1.0).unwrap().bps(), 10_000);

        assert!(validate_discount_factor(1.5).is_err());
        assert!(validate_discount_factor(-0.1).is_err());
        assert!(validate_discount_factor(f64::NAN).is_err());
        assert!(validate_discount_factor(f64::INFINITY).is_err());
    }

    #[test]
    fn test_cost_cents() {
        assert!(validate_cost_cents(0).is_ok());
        assert!(validate_cost_cents(1499).is_ok());
        assert!(validate_cost_cents(-1).is_err());
    }
}
