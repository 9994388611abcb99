//! # Persistence Port
//!
//! The abstract contract a cart uses to durably store and retrieve its
//! state, independent of storage technology.
//!
//! ## Port & Adapter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Persistence Port Pattern                               │
//! │                                                                         │
//! │        Cart ──► dyn PersistencePort ◄── SessionPersistence              │
//! │                   (this module)           (basket-store)                │
//! │                                                                         │
//! │  The cart is write-through: after every mutation it hands the port a    │
//! │  full CartSnapshot and calls save. Installing a port works the other    │
//! │  way: the cart's in-memory state is overwritten with whatever load      │
//! │  returns. The adapter is injected; the cart never constructs one.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Shape
//! The persisted shape is exactly `{tax, items}`. Products are flattened to
//! their effective id/kind/description/cost at save time: a decorated
//! product is stored at its discounted cost with its decorated description,
//! which makes load-after-save a fixed point.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PersistenceError;
use crate::money::Money;
use crate::product::{CatalogProduct, Product, ProductId, ProductKind};

// =============================================================================
// Snapshot Types
// =============================================================================

/// A product flattened for storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    #[serde(default)]
    pub kind: ProductKind,
    pub description: String,
    /// Effective cost in cents at save time (decorator overrides applied).
    pub cost_cents: i64,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl ProductSnapshot {
    /// Captures a product's effective state through the `Product` trait, so
    /// decorator overrides are baked into the stored cost and description.
    pub fn capture(product: &dyn Product) -> Self {
        ProductSnapshot {
            id: product.id(),
            kind: product.kind(),
            description: product.description(),
            cost_cents: product.cost().cents(),
            attributes: product.attributes().clone(),
        }
    }
}

/// Rehydrates a stored product as a plain catalog product.
impl From<ProductSnapshot> for CatalogProduct {
    fn from(snapshot: ProductSnapshot) -> Self {
        let mut product = CatalogProduct::new(
            snapshot.id,
            snapshot.kind,
            &snapshot.description,
            Money::from_cents(snapshot.cost_cents.max(0)),
        )
        .unwrap_or_else(|_| {
            // Stored description was blank; keep the id so the line item
            // still keys correctly.
            CatalogProduct::new(snapshot.id, snapshot.kind, "(unnamed)", Money::zero())
                .expect("placeholder product is valid")
        });

        for (key, value) in snapshot.attributes {
            // Null values cannot round-trip; skip rather than fail the load.
            let _ = product.set_attribute(&key, value);
        }

        product
    }
}

/// A stored line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemSnapshot {
    pub product: ProductSnapshot,
    pub quantity: i64,
    pub added_at: DateTime<Utc>,
}

/// A stored tax entry. Order in the vector is tax application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSnapshot {
    pub code: String,
    pub rate_bps: u32,
}

/// The exact shape handed to and retrieved from the persistence port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(default)]
    pub tax: Vec<TaxSnapshot>,
    #[serde(default)]
    pub items: Vec<LineItemSnapshot>,
}

impl CartSnapshot {
    /// True when the snapshot carries no state at all.
    pub fn is_empty(&self) -> bool {
        self.tax.is_empty() && self.items.is_empty()
    }
}

// =============================================================================
// Port Trait
// =============================================================================

/// The persistence capability set.
///
/// Adapters key storage by a namespace id (a default is used until one is
/// set) and cache the most recently loaded or assigned contents. First
/// access to a namespace yields an empty snapshot rather than an error.
pub trait PersistencePort {
    /// Fetches contents from the backing store into the cache and returns
    /// them. When `id` is given, the namespace is switched first.
    fn load(&mut self, id: Option<&str>) -> Result<&CartSnapshot, PersistenceError>;

    /// Writes the cached contents to the backing store. When `id` is given,
    /// the namespace is switched first.
    fn save(&mut self, id: Option<&str>) -> Result<(), PersistenceError>;

    /// Switches the storage namespace. Blank ids are rejected.
    fn set_id(&mut self, id: &str) -> Result<(), PersistenceError>;

    /// Current namespace id.
    fn id(&self) -> &str;

    /// Cached contents.
    fn contents(&self) -> &CartSnapshot;

    /// Replaces the cached contents. An empty snapshot clears them.
    fn set_contents(&mut self, contents: CartSnapshot);

    /// Clears the cached contents.
    fn clear_contents(&mut self) {
        self.set_contents(CartSnapshot::default());
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
