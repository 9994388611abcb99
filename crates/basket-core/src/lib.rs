//! # basket-core: Pure Business Logic for Basket
//!
//! A minimal shopping-cart reference implementation demonstrating three
//! design patterns over an in-memory product catalog:
//!
//! - an explicitly injected, per-session **Cart** (dependency injection in
//!   place of a hidden global instance)
//! - a **Decorator** chain over the `Product` trait (discounts that override
//!   cost/description and delegate everything else)
//! - Strategy-style **persistence injection** behind the `PersistencePort`
//!   trait (the cart is write-through against whatever adapter is installed)
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Surrounding application (not here)                 │   │
//! │  │     catalog bootstrap ──► cart mutations ──► rendering          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │  product  │  │ decorator │  │   cart    │  │   │
//! │  │   │   Money   │  │  Product  │  │ Discount  │  │   Cart    │  │   │
//! │  │   │   Rate    │  │  Catalog  │  │ Decorator │  │ LineItem  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PersistencePort (trait, this crate)    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                basket-store (adapter crate)                     │   │
//! │  │        session key/value store, JSON snapshot encoding          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money and Rate types with integer arithmetic (no floats!)
//! - [`product`] - The `Product` trait and the concrete catalog entity
//! - [`decorator`] - The discount decorator
//! - [`cart`] - The cart state machine
//! - [`port`] - The persistence port contract and snapshot shape
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Write-through**: every cart mutation persists before returning, or
//!    fails as a whole with the in-memory change rolled back
//! 2. **No I/O**: storage lives behind the port trait in adapter crates
//! 3. **Integer money**: all amounts are cents (i64), all rates basis points
//! 4. **Explicit errors**: typed enums via thiserror, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Cart, CatalogProduct, DiscountDecorator, Money, Rate, shared};
//! # use basket_core::{CartSnapshot, PersistencePort, PersistenceError};
//! # struct NullPort(CartSnapshot);
//! # impl PersistencePort for NullPort {
//! #     fn load(&mut self, _id: Option<&str>) -> Result<&CartSnapshot, PersistenceError> { Ok(&self.0) }
//! #     fn save(&mut self, _id: Option<&str>) -> Result<(), PersistenceError> { Ok(()) }
//! #     fn set_id(&mut self, _id: &str) -> Result<(), PersistenceError> { Ok(()) }
//! #     fn id(&self) -> &str { "null" }
//! #     fn contents(&self) -> &CartSnapshot { &self.0 }
//! #     fn set_contents(&mut self, contents: CartSnapshot) { self.0 = contents; }
//! # }
//!
//! let book = CatalogProduct::book(0, "The Hitchhiker's Guide to the Galaxy",
//!     Money::from_cents(1499))?;
//!
//! let mut half_price = DiscountDecorator::new(
//!     CatalogProduct::book(1, "Code Complete", Money::from_cents(3000))?);
//! half_price.set_discount(0.5)?;
//!
//! let mut cart = Cart::new(Box::new(NullPort(CartSnapshot::default())))?;
//! cart.add_tax("PDV", Rate::from_fraction(0.22)?)?;
//! cart.add(shared(book))?;
//! cart.add(shared(half_price))?;
//!
//! // 14.99 + 15.00 = 29.99; ×1.22 = 36.59
//! assert_eq!(cart.total().to_string(), "36.59");
//! # Ok::<(), basket_core::CartError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod decorator;
pub mod error;
pub mod money;
pub mod port;
pub mod product;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use basket_core::Cart` instead of
// `use basket_core::cart::Cart`

pub use cart::{Cart, LineItem, TaxEntry};
pub use decorator::DiscountDecorator;
pub use error::{CartError, CartResult, PersistenceError, ValidationError};
pub use money::{Money, Rate};
pub use port::{CartSnapshot, LineItemSnapshot, PersistencePort, ProductSnapshot, TaxSnapshot};
pub use product::{shared, CatalogProduct, Product, ProductId, ProductKind, SharedProduct};
