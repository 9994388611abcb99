//! # Cart
//!
//! The cart state machine: line items plus named tax rates, persisted
//! write-through after every mutation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Caller Action            Cart Method             State Change          │
//! │  ─────────────            ───────────             ────────────          │
//! │                                                                         │
//! │  Pick product ───────────► add(product) ────────► qty += 1 / insert    │
//! │                                                                         │
//! │  Put one back ───────────► remove(id) ──────────► qty -= 1 / delete    │
//! │                                                                         │
//! │  Empty the cart ─────────► remove_all() ────────► items.clear()        │
//! │                                                                         │
//! │  Configure tax ──────────► add_tax(code, rate) ─► upsert tax entry     │
//! │                                                                         │
//! │  Checkout view ──────────► items() / total() ───► (read only)          │
//! │                                                                         │
//! │  EVERY mutation above ends with a write-through save to the injected   │
//! │  persistence port. If the save fails, the in-memory change is rolled   │
//! │  back (snapshot-then-swap) and the error propagates: there is no       │
//! │  partial-failure state.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! A cart is constructed once per logical session with an injected port
//! (explicit dependency injection, no global instance) and immediately
//! replaces its in-memory state with whatever the port loads. Installing a
//! different port later has the same destructive-resynchronization effect.
//!
//! ## Tax Compounding
//! Taxes apply sequentially and compoundingly, each to the running total so
//! far, in tax insertion order. The order is load-bearing for
//! reproducibility, so taxes live in an insertion-ordered sequence, never an
//! unordered map.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::CartResult;
use crate::money::{Money, Rate};
use crate::port::{CartSnapshot, LineItemSnapshot, PersistencePort, ProductSnapshot, TaxSnapshot};
use crate::product::{self, CatalogProduct, ProductId, SharedProduct};
use crate::validation;

// =============================================================================
// Line Item
// =============================================================================

/// A product handle paired with a quantity.
///
/// The item keeps the live product handle, not a cost snapshot: totals call
/// `cost()` at computation time, so a discount decorator adjusted after the
/// product entered the cart is reflected in the next total.
#[derive(Clone)]
pub struct LineItem {
    product: SharedProduct,
    quantity: i64,
    added_at: DateTime<Utc>,
}

impl LineItem {
    fn new(product: SharedProduct) -> Self {
        LineItem {
            product,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// The shared product handle.
    pub fn product(&self) -> &SharedProduct {
        &self.product
    }

    /// Id of the referenced product.
    pub fn product_id(&self) -> ProductId {
        product::lock(&self.product).id()
    }

    /// Quantity in the cart (always ≥ 1).
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// When the item first entered the cart.
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Effective unit cost right now, through any decorator chain.
    pub fn unit_cost(&self) -> Money {
        product::lock(&self.product).cost()
    }

    /// Effective description right now.
    pub fn description(&self) -> String {
        product::lock(&self.product).description()
    }

    /// Line total (unit cost × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_cost().multiply_quantity(self.quantity)
    }
}

impl std::fmt::Debug for LineItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineItem")
            .field("product_id", &self.product_id())
            .field("quantity", &self.quantity)
            .field("added_at", &self.added_at)
            .finish()
    }
}

// =============================================================================
// Tax Entry
// =============================================================================

/// A named percentage rate applied compoundingly to the running total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxEntry {
    code: String,
    rate: Rate,
}

impl TaxEntry {
    /// Tax code (unique key, e.g. "PDV").
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The rate for this code.
    pub fn rate(&self) -> Rate {
        self.rate
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product id (adding the same product increments its
///   quantity) and ordered by insertion
/// - Quantities are ≥ 1 (decrementing from 1 deletes the line item)
/// - Tax codes are unique and ordered by insertion; re-adding a code
///   overwrites the rate in place
/// - In-memory state equals the last successfully persisted snapshot after
///   every mutating operation
pub struct Cart {
    id: Option<String>,
    items: Vec<LineItem>,
    taxes: Vec<TaxEntry>,
    store: Box<dyn PersistencePort>,
}

impl Cart {
    /// Creates a cart bound to a persistence port.
    ///
    /// The port's contents immediately replace the cart's (empty) state, so
    /// a cart constructed over a previously used namespace resumes where
    /// that session left off.
    pub fn new(store: Box<dyn PersistencePort>) -> CartResult<Self> {
        let mut cart = Cart {
            id: None,
            items: Vec::new(),
            taxes: Vec::new(),
            store,
        };
        cart.resync()?;
        Ok(cart)
    }

    // -------------------------------------------------------------------------
    // Mutations (all write-through)
    // -------------------------------------------------------------------------

    /// Adds or overwrites a named tax rate.
    ///
    /// Re-adding an existing code overwrites its rate but keeps its original
    /// position in the application order. Blank codes fail fast.
    pub fn add_tax(&mut self, code: &str, rate: Rate) -> CartResult<&mut Self> {
        validation::validate_tax_code(code)?;

        let previous = self.taxes.clone();
        match self.taxes.iter_mut().find(|t| t.code == code) {
            Some(entry) => entry.rate = rate,
            None => self.taxes.push(TaxEntry {
                code: code.to_string(),
                rate,
            }),
        }

        if let Err(err) = self.save_state() {
            self.taxes = previous;
            return Err(err);
        }
        Ok(self)
    }

    /// Adds a product to the cart.
    ///
    /// If a line item for the product's id already exists its quantity is
    /// incremented and the passed handle is dropped; otherwise a new line
    /// item with quantity 1 is inserted at the end.
    pub fn add(&mut self, product: SharedProduct) -> CartResult<&mut Self> {
        let id = product::lock(&product).id();

        let previous = self.items.clone();
        match self.items.iter_mut().find(|item| item.product_id() == id) {
            Some(item) => item.quantity += 1,
            None => self.items.push(LineItem::new(Arc::clone(&product))),
        }

        if let Err(err) = self.save_state() {
            self.items = previous;
            return Err(err);
        }
        Ok(self)
    }

    /// Removes one unit of a product.
    ///
    /// Quantity 1 deletes the line item, otherwise the quantity decrements.
    /// An absent id is a no-op that still persists (idempotent remove).
    pub fn remove(&mut self, product_id: ProductId) -> CartResult<&mut Self> {
        let previous = self.items.clone();
        if let Some(pos) = self
            .items
            .iter()
            .position(|item| item.product_id() == product_id)
        {
            if self.items[pos].quantity == 1 {
                self.items.remove(pos);
            } else {
                self.items[pos].quantity -= 1;
            }
        }

        if let Err(err) = self.save_state() {
            self.items = previous;
            return Err(err);
        }
        Ok(self)
    }

    /// Empties the cart. Tax entries are preserved.
    pub fn remove_all(&mut self) -> CartResult<&mut Self> {
        let previous = std::mem::take(&mut self.items);

        if let Err(err) = self.save_state() {
            self.items = previous;
            return Err(err);
        }
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current line items in insertion order. No side effect.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line item by product id.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.product_id() == product_id)
    }

    /// Configured taxes in application order.
    pub fn taxes(&self) -> &[TaxEntry] {
        &self.taxes
    }

    /// Number of distinct line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all line items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Checks if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals before tax, using each product's effective
    /// `cost()` at call time.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total())
    }

    /// Total including taxes.
    ///
    /// Each tax applies to the running total so far, in insertion order:
    /// `total = subtotal; for tax: total += total × rate`. With `A = 0.10`
    /// then `B = 0.20` on 100.00: 100 → 110.00 → 132.00.
    pub fn total(&self) -> Money {
        let mut total = self.subtotal();
        for tax in &self.taxes {
            total += total.scale(tax.rate);
        }
        total
    }

    // -------------------------------------------------------------------------
    // Persistence wiring
    // -------------------------------------------------------------------------

    /// Installs a persistence port and destructively resynchronizes.
    ///
    /// The cart's id (if set) is propagated to the port first, then the
    /// port's `load()` REPLACES the in-memory tax/items. This is not a
    /// merge: whatever was in memory before is gone.
    pub fn set_persistence(&mut self, store: Box<dyn PersistencePort>) -> CartResult<&mut Self> {
        self.store = store;
        self.resync()?;
        Ok(self)
    }

    /// Sets the cart id and propagates it to the active port.
    pub fn set_id(&mut self, id: &str) -> CartResult<&mut Self> {
        validation::validate_cart_id(id)?;
        self.store.set_id(id)?;
        self.id = Some(id.to_string());
        Ok(self)
    }

    /// The cart id, if one was assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Overwrites in-memory state from the port.
    fn resync(&mut self) -> CartResult<()> {
        if let Some(id) = self.id.clone() {
            self.store.set_id(&id)?;
        }

        let snapshot = self.store.load(None)?.clone();
        self.apply_snapshot(snapshot);
        Ok(())
    }

    fn apply_snapshot(&mut self, snapshot: CartSnapshot) {
        self.taxes = snapshot
            .tax
            .into_iter()
            .map(|tax| TaxEntry {
                code: tax.code,
                rate: Rate::from_bps(tax.rate_bps),
            })
            .collect();

        self.items = snapshot
            .items
            .into_iter()
            .filter(|item| item.quantity >= 1)
            .map(|item| LineItem {
                quantity: item.quantity,
                added_at: item.added_at,
                product: product::shared(CatalogProduct::from(item.product)),
            })
            .collect();
    }

    /// Serializes the full `{tax, items}` state and writes it through.
    fn save_state(&mut self) -> CartResult<()> {
        let snapshot = self.snapshot();
        self.store.set_contents(snapshot);
        self.store.save(None)?;
        Ok(())
    }

    /// The cart's current state in persisted-snapshot form.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            tax: self
                .taxes
                .iter()
                .map(|tax| TaxSnapshot {
                    code: tax.code.clone(),
                    rate_bps: tax.rate.bps(),
                })
                .collect(),
            items: self
                .items
                .iter()
                .map(|item| LineItemSnapshot {
                    product: ProductSnapshot::capture(&*product::lock(&item.product)),
                    quantity: item.quantity,
                    added_at: item.added_at,
                })
                .collect(),
        }
    }
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("taxes", &self.taxes)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
