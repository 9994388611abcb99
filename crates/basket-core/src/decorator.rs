//! # Product Decorator
//!
//! Decorator pattern over the [`Product`] trait: a decorator implements the
//! same trait as the object it wraps, selectively overriding behavior while
//! explicitly delegating the rest. Decorators stack:
//!
//! ```text
//!   DiscountDecorator ──► DiscountDecorator ──► CatalogProduct
//!        cost()×0.9           cost()×0.5           30.00
//! ```
//!
//! Decorating never mutates the wrapped product; the override lives entirely
//! in the wrapper.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ValidationError;
use crate::money::{Money, Rate};
use crate::product::{Product, ProductId, ProductKind};
use crate::validation;

// =============================================================================
// Discount Decorator
// =============================================================================

/// Prices the wrapped product at a fraction of its cost.
///
/// Until a discount factor is set, every read delegates unmodified. With a
/// factor of `0.5`, a 30.00 product costs 15.00 and its description gains a
/// `" (discount 50%)"` suffix.
pub struct DiscountDecorator {
    inner: Box<dyn Product + Send>,
    discount: Option<Rate>,
}

impl DiscountDecorator {
    /// Wraps a product. The decorator takes exclusive ownership of the
    /// wrapped instance for its lifetime.
    pub fn new<P: Product + Send + 'static>(inner: P) -> Self {
        DiscountDecorator {
            inner: Box::new(inner),
            discount: None,
        }
    }

    /// Sets the discount factor (`0.5` = half price).
    ///
    /// Non-finite or out-of-range factors fail without mutating state, so a
    /// bad call leaves any previously set discount intact.
    pub fn set_discount(&mut self, factor: f64) -> Result<&mut Self, ValidationError> {
        let rate = validation::validate_discount_factor(factor)?;
        self.discount = Some(rate);
        Ok(self)
    }

    /// The currently applied discount, if any.
    pub fn discount(&self) -> Option<Rate> {
        self.discount
    }
}

impl Product for DiscountDecorator {
    fn id(&self) -> ProductId {
        self.inner.id()
    }

    fn kind(&self) -> ProductKind {
        self.inner.kind()
    }

    /// Wrapped cost scaled by the discount factor, rounded to the cent.
    fn cost(&self) -> Money {
        match self.discount {
            Some(rate) => self.inner.cost().scale(rate),
            None => self.inner.cost(),
        }
    }

    fn set_cost(&mut self, cost: Money) -> Result<(), ValidationError> {
        self.inner.set_cost(cost)
    }

    fn description(&self) -> String {
        match self.discount {
            Some(rate) => format!(
                "{} (discount {}%)",
                self.inner.description(),
                rate.percent_label()
            ),
            None => self.inner.description(),
        }
    }

    fn set_description(&mut self, description: &str) -> Result<(), ValidationError> {
        self.inner.set_description(description)
    }

    fn attribute(&self, key: &str) -> Option<&Value> {
        self.inner.attribute(key)
    }

    fn set_attribute(&mut self, key: &str, value: Value) -> Result<(), ValidationError> {
        self.inner.set_attribute(key, value)
    }

    fn attributes(&self) -> &BTreeMap<String, Value> {
        self.inner.attributes()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
