//! # Product Module
//!
//! The `Product` trait and the concrete catalog entity.
//!
//! ## Code to the Interface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Capability Set                               │
//! │                                                                         │
//! │  The Cart only ever talks to `dyn Product`:                             │
//! │                                                                         │
//! │       Cart ──► dyn Product ◄── CatalogProduct (Book, Game, ...)        │
//! │                     ▲                                                   │
//! │                     └───────── DiscountDecorator (wraps a Product)      │
//! │                                                                         │
//! │  Anything implementing the trait can be carted, decorated, and          │
//! │  snapshotted - the cart never depends on a concrete type.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Custom Attributes
//! Arbitrary key/value metadata hung on a product is modelled as an explicit
//! `BTreeMap<String, Value>` with typed accessors. Fixed fields (id, kind,
//! cost, description) are real struct fields, not map entries.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation;

// =============================================================================
// Identity & Kind
// =============================================================================

/// Externally assigned product identifier.
///
/// Ids are assigned by the catalog owner before a product is offered to the
/// cart; products never mint their own.
pub type ProductId = u64;

/// Concrete product kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Book,
    Game,
    General,
}

impl Default for ProductKind {
    fn default() -> Self {
        ProductKind::General
    }
}

// =============================================================================
// Product Trait
// =============================================================================

/// The capability set every cartable product satisfies.
///
/// Both base products and decorators implement this trait, which is what
/// makes decorators transparently substitutable and stackable: a decorator
/// holds one owned inner `Product` and implements every method either by
/// override or by explicit delegation.
pub trait Product {
    /// Externally assigned id.
    fn id(&self) -> ProductId;

    /// Product kind (Book, Game, ...).
    fn kind(&self) -> ProductKind;

    /// Effective cost. Decorators may override this.
    fn cost(&self) -> Money;

    /// Sets the cost. Negative costs are rejected.
    fn set_cost(&mut self, cost: Money) -> Result<(), ValidationError>;

    /// Effective description. Decorators may override this.
    fn description(&self) -> String;

    /// Sets the description. Empty descriptions are rejected.
    fn set_description(&mut self, description: &str) -> Result<(), ValidationError>;

    /// Fetches a custom attribute.
    fn attribute(&self, key: &str) -> Option<&Value>;

    /// Sets a custom attribute. Empty keys and null values are rejected.
    fn set_attribute(&mut self, key: &str, value: Value) -> Result<(), ValidationError>;

    /// Checks whether a custom attribute is present.
    fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }

    /// All custom attributes, in stable key order.
    fn attributes(&self) -> &BTreeMap<String, Value>;
}

// =============================================================================
// Shared Product Handles
// =============================================================================

/// Shared handle to a product.
///
/// The cart stores these rather than owning products outright, so the
/// catalog owner can keep a handle and, for example, adjust a discount
/// decorator after the product is already in a cart. Totals are computed
/// from the live `cost()`, so the change is reflected immediately.
pub type SharedProduct = Arc<Mutex<dyn Product + Send>>;

/// Wraps a product in a [`SharedProduct`] handle.
pub fn shared<P: Product + Send + 'static>(product: P) -> SharedProduct {
    Arc::new(Mutex::new(product))
}

/// Locks a shared product handle.
pub(crate) fn lock(product: &SharedProduct) -> MutexGuard<'_, dyn Product + Send + 'static> {
    product.lock().expect("product mutex poisoned")
}

// =============================================================================
// Catalog Product
// =============================================================================

/// A concrete catalog entity: the one struct behind Book, Game and friends.
///
/// Fields are private so the `set_*` validation cannot be bypassed; the
/// catalog owner constructs these once and they live for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    id: ProductId,
    kind: ProductKind,
    description: String,
    cost: Money,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

impl CatalogProduct {
    /// Creates a product with an externally assigned id.
    pub fn new(
        id: ProductId,
        kind: ProductKind,
        description: &str,
        cost: Money,
    ) -> Result<Self, ValidationError> {
        validation::validate_description(description)?;
        validation::validate_cost_cents(cost.cents())?;

        Ok(CatalogProduct {
            id,
            kind,
            description: description.to_string(),
            cost,
            attributes: BTreeMap::new(),
        })
    }

    /// Convenience constructor for a book.
    pub fn book(id: ProductId, description: &str, cost: Money) -> Result<Self, ValidationError> {
        CatalogProduct::new(id, ProductKind::Book, description, cost)
    }

    /// Convenience constructor for a game.
    pub fn game(id: ProductId, description: &str, cost: Money) -> Result<Self, ValidationError> {
        CatalogProduct::new(id, ProductKind::Game, description, cost)
    }
}

impl Product for CatalogProduct {
    fn id(&self) -> ProductId {
        self.id
    }

    fn kind(&self) -> ProductKind {
        self.kind
    }

    fn cost(&self) -> Money {
        self.cost
    }

    fn set_cost(&mut self, cost: Money) -> Result<(), ValidationError> {
        validation::validate_cost_cents(cost.cents())?;
        self.cost = cost;
        Ok(())
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn set_description(&mut self, description: &str) -> Result<(), ValidationError> {
        validation::validate_description(description)?;
        self.description = description.to_string();
        Ok(())
    }

    fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn set_attribute(&mut self, key: &str, value: Value) -> Result<(), ValidationError> {
        validation::validate_attribute_key(key)?;
        if value.is_null() {
            return Err(ValidationError::Required {
                field: "attribute value".to_string(),
            });
        }

        self.attributes.insert(key.to_string(), value);
        Ok(())
    }

    fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_construction_validates() {
        assert!(CatalogProduct::book(1, "Code Complete", Money::from_cents(3000)).is_ok());
        assert!(CatalogProduct::book(1, "", Money::from_cents(3000)).is_err());
        assert!(CatalogProduct::book(1, "Code Complete", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_setters_validate_and_mutate() {
        let mut book =
            CatalogProduct::book(1, "The Hitchhiker's Guide", Money::from_cents(1499)).unwrap();

        book.set_cost(Money::from_cents(999)).unwrap();
        assert_eq!(book.cost().cents(), 999);

        assert!(book.set_cost(Money::from_cents(-5)).is_err());
        assert_eq!(book.cost().cents(), 999); // unchanged after failure

        book.set_description("Mostly Harmless").unwrap();
        assert_eq!(book.description(), "Mostly Harmless");
        assert!(book.set_description("  ").is_err());
    }

    #[test]
    fn test_custom_attributes() {
        let mut book = CatalogProduct::book(1, "GEB", Money::from_cents(2500)).unwrap();

        assert!(!book.has_attribute("author"));
        book.set_attribute("author", json!("Hofstadter")).unwrap();
        assert!(book.has_attribute("author"));
        assert_eq!(book.attribute("author"), Some(&json!("Hofstadter")));

        assert!(book.set_attribute("", json!("x")).is_err());
        assert!(book.set_attribute("isbn", Value::Null).is_err());
    }

    #[test]
    fn test_shared_handle_reflects_mutation() {
        let handle = shared(CatalogProduct::book(1, "GEB", Money::from_cents(2500)).unwrap());
        let alias = Arc::clone(&handle);

        alias
            .lock()
            .unwrap()
            .set_cost(Money::from_cents(2000))
            .unwrap();

        assert_eq!(handle.lock().unwrap().cost().cents(), 2000);
    }
}
