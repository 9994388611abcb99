//! # Cart Demo
//!
//! Bootstraps a hardcoded catalog and walks one shopping session end to end.
//!
//! ## Usage
//! ```bash
//! cargo run -p basket-store --bin demo
//!
//! # With adapter logging
//! RUST_LOG=basket_store=debug cargo run -p basket-store --bin demo
//! ```
//!
//! ## What It Shows
//! - catalog products with externally assigned ids (they would normally come
//!   from a database or other data store)
//! - a half-price discount decorator on one of them
//! - tax configuration (`PDV = 0.22`) and compounding totals
//! - two "requests" sharing one session store: the second cart resumes the
//!   first cart's state through the persistence port

use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use basket_core::{Cart, CatalogProduct, DiscountDecorator, Money, Rate, SharedProduct, shared};
use basket_store::{SessionPersistence, SessionStore};

/// The hardcoded demo catalog: (kind, description, cents).
fn build_catalog() -> Result<Vec<SharedProduct>, Box<dyn Error>> {
    let mut products: Vec<SharedProduct> = Vec::new();

    products.push(shared(CatalogProduct::book(
        0,
        "The Hitchhiker's Guide to the Galaxy",
        Money::from_cents(1499),
    )?));

    // Half price on Code Complete, applied through a decorator.
    let mut discounted = DiscountDecorator::new(CatalogProduct::book(
        1,
        "Code Complete",
        Money::from_cents(3000),
    )?);
    discounted.set_discount(0.5)?;
    products.push(shared(discounted));

    products.push(shared(CatalogProduct::book(
        2,
        "Godel, Escher, Bach: An Eternal Golden Braid",
        Money::from_cents(2500),
    )?));

    products.push(shared(CatalogProduct::game(
        3,
        "Duke Nukem Forever",
        Money::from_cents(66_600),
    )?));

    products.push(shared(CatalogProduct::game(
        4,
        "Return to the return to the Castle Wolfenstein",
        Money::from_cents(26_050),
    )?));

    Ok(products)
}

fn print_receipt(cart: &Cart) {
    println!("  {:<55} {:>5}  {:>9}", "item", "qty", "line");
    for item in cart.items() {
        println!(
            "  {:<55} {:>5}  {:>9}",
            item.description(),
            item.quantity(),
            item.line_total().to_string()
        );
    }
    println!("  {:<62} {:>9}", "subtotal", cart.subtotal().to_string());
    for tax in cart.taxes() {
        println!("  tax {:<58} {:>9}", tax.code(), tax.rate().percent_label() + "%");
    }
    println!("  {:<62} {:>9}", "TOTAL", cart.total().to_string());
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = build_catalog()?;
    let session_id = Uuid::new_v4().to_string();

    // One SessionStore per logical session; clones share the same map, the
    // way consecutive requests share one server-side session.
    let store = SessionStore::new();

    // ---- Request 1: fill the cart ------------------------------------------
    let mut cart = Cart::new(Box::new(SessionPersistence::new(store.clone())))?;
    cart.set_id(&session_id)?;
    cart.add_tax("PDV", Rate::from_fraction(0.22)?)?;

    cart.add(Arc::clone(&catalog[0]))?; // Hitchhiker's Guide, 14.99
    cart.add(Arc::clone(&catalog[1]))?; // Code Complete at half price, 15.00
    cart.add(Arc::clone(&catalog[2]))?; // GEB, 25.00
    cart.add(Arc::clone(&catalog[2]))?; // and a second copy

    println!("request 1 (session {session_id}):");
    print_receipt(&cart);

    // ---- Request 2: a fresh cart resumes from the same session -------------
    let mut resumed = Cart::new(Box::new(SessionPersistence::with_namespace(
        store, &session_id,
    )?))?;
    resumed.remove(2)?; // put one GEB back

    println!("\nrequest 2 (same session, one GEB removed):");
    print_receipt(&resumed);

    Ok(())
}
