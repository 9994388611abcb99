//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                         │
//! │  ├── ValidationError   - Malformed caller input (fail fast)             │
//! │  ├── PersistenceError  - Port contract failures (storage layer)         │
//! │  └── CartError         - What cart operations surface                   │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                               │
//! │                         ├──► CartError ──► caller                       │
//! │        PersistenceError ┘                                               │
//! │                                                                         │
//! │  NOT errors: removing a product id that is not in the cart is a         │
//! │  persisted no-op, by the idempotent-remove contract.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, namespace, reason)
//! 3. Errors are enum variants, never bare Strings
//! 4. Persistence failures are fatal to the triggering operation: the cart
//!    rolls back its in-memory change and propagates, never retries

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are the "invalid argument" class of failures: a null-equivalent,
/// empty, negative, or non-numeric value where the contract requires a real
/// one. Surfaced immediately to the caller, never silently defaulted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value must be a finite number (rejects NaN and infinities).
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is outside the allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

// =============================================================================
// Persistence Error
// =============================================================================

/// Failures of the persistence port contract.
///
/// Defined here rather than in the adapter crate because the port trait is
/// part of the core contract: any adapter (session map, file, external
/// cache) maps its internal failures into these variants.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Namespace id is empty or otherwise unusable as a storage key.
    #[error("persistence namespace cannot be empty")]
    InvalidNamespace,

    /// Stored bytes exist but do not decode into a cart snapshot.
    #[error("stored snapshot in namespace '{namespace}' is corrupt: {reason}")]
    Corrupt { namespace: String, reason: String },

    /// Snapshot could not be encoded for storage.
    #[error("failed to serialize cart snapshot: {0}")]
    Serialize(String),

    /// The underlying store rejected the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

// =============================================================================
// Cart Error
// =============================================================================

/// Errors surfaced by cart operations.
///
/// Every mutating operation is write-through: it either succeeds in memory
/// AND in storage, or fails as a whole with one of these.
#[derive(Debug, Error)]
pub enum CartError {
    /// Malformed caller input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The write-through save (or the install-time load) failed.
    #[error("persistence failure: {0}")]
    Persistence(#[from] PersistenceError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "tax code".to_string(),
        };
        assert_eq!(err.to_string(), "tax code is required");

        let err = ValidationError::NotFinite {
            field: "discount".to_string(),
        };
        assert_eq!(err.to_string(), "discount must be a finite number");
    }

    #[test]
    fn test_persistence_error_messages() {
        let err = PersistenceError::Corrupt {
            namespace: "cart.default".to_string(),
            reason: "expected object".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "stored snapshot in namespace 'cart.default' is corrupt: expected object"
        );
    }

    #[test]
    fn test_errors_convert_to_cart_error() {
        let validation: CartError = ValidationError::Required {
            field: "id".to_string(),
        }
        .into();
        assert!(matches!(validation, CartError::Validation(_)));

        let persistence: CartError = PersistenceError::InvalidNamespace.into();
        assert!(matches!(persistence, CartError::Persistence(_)));
    }
}
