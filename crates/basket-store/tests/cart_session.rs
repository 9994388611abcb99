//! End-to-end tests: the cart state machine over the real session adapter.

use std::sync::Arc;

use basket_core::{Cart, CatalogProduct, DiscountDecorator, Money, Rate, shared};
use basket_store::{SessionPersistence, SessionStore};

fn session_cart(store: &SessionStore, namespace: &str) -> Cart {
    let port = SessionPersistence::with_namespace(store.clone(), namespace).unwrap();
    Cart::new(Box::new(port)).unwrap()
}

/// The catalog walkthrough: Book@14.99 and Book@30.00 at 50% discount, one
/// of each, PDV 0.22. Subtotal 14.99 + 15.00 = 29.99, total 29.99 × 1.22 =
/// 36.5878, rendered as "36.59".
#[test]
fn end_to_end_total_renders_with_two_decimals() {
    let store = SessionStore::new();
    let mut cart = session_cart(&store, "checkout");

    let guide = CatalogProduct::book(
        0,
        "The Hitchhiker's Guide to the Galaxy",
        Money::from_cents(1499),
    )
    .unwrap();

    let mut discounted = DiscountDecorator::new(
        CatalogProduct::book(1, "Code Complete", Money::from_cents(3000)).unwrap(),
    );
    discounted.set_discount(0.5).unwrap();

    cart.add(shared(guide)).unwrap();
    cart.add(shared(discounted)).unwrap();
    cart.add_tax("PDV", Rate::from_fraction(0.22).unwrap()).unwrap();

    assert_eq!(cart.subtotal().cents(), 2999);
    assert_eq!(cart.total().cents(), 3659);
    assert_eq!(cart.total().to_string(), "36.59");
}

/// A fresh cart over the same store and namespace reproduces the items and
/// tax state: load after save is a fixed point.
#[test]
fn cart_state_survives_across_requests() {
    let store = SessionStore::new();

    {
        let mut cart = session_cart(&store, "session-1");
        cart.add_tax("PDV", Rate::from_fraction(0.22).unwrap()).unwrap();

        let geb = shared(
            CatalogProduct::book(
                2,
                "Godel, Escher, Bach: An Eternal Golden Braid",
                Money::from_cents(2500),
            )
            .unwrap(),
        );
        cart.add(Arc::clone(&geb)).unwrap();
        cart.add(geb).unwrap();
    }

    let resumed = session_cart(&store, "session-1");
    assert_eq!(resumed.item_count(), 1);
    assert_eq!(resumed.get(2).unwrap().quantity(), 2);
    assert_eq!(resumed.get(2).unwrap().unit_cost().cents(), 2500);
    assert_eq!(resumed.taxes().len(), 1);
    assert_eq!(resumed.taxes()[0].code(), "PDV");

    // And the round-tripped state is itself stable.
    let again = session_cart(&store, "session-1");
    assert_eq!(again.snapshot(), resumed.snapshot());
}

/// A decorated product persists at its effective cost and description, so
/// the resumed cart totals exactly what the first cart totalled.
#[test]
fn decorated_cost_survives_round_trip() {
    let store = SessionStore::new();

    let first_total;
    {
        let mut cart = session_cart(&store, "session-2");
        let mut discounted = DiscountDecorator::new(
            CatalogProduct::book(1, "Code Complete", Money::from_cents(3000)).unwrap(),
        );
        discounted.set_discount(0.5).unwrap();
        cart.add(shared(discounted)).unwrap();
        first_total = cart.total();
    }

    let resumed = session_cart(&store, "session-2");
    let item = resumed.get(1).unwrap();
    assert_eq!(item.unit_cost().cents(), 1500);
    assert!(item.description().contains("50%"));
    assert_eq!(resumed.total(), first_total);
}

/// Different namespaces on one store are independent carts.
#[test]
fn sessions_do_not_bleed_into_each_other() {
    let store = SessionStore::new();

    let mut alice = session_cart(&store, "alice");
    alice
        .add(shared(
            CatalogProduct::game(3, "Duke Nukem Forever", Money::from_cents(66_600)).unwrap(),
        ))
        .unwrap();

    let bob = session_cart(&store, "bob");
    assert!(bob.is_empty());
}

/// Emptying the cart persists the empty item list but keeps taxes, and the
/// resumed cart agrees.
#[test]
fn remove_all_persists_and_preserves_taxes() {
    let store = SessionStore::new();

    {
        let mut cart = session_cart(&store, "session-3");
        cart.add_tax("PDV", Rate::from_fraction(0.22).unwrap()).unwrap();
        cart.add(shared(
            CatalogProduct::book(0, "Mostly Harmless", Money::from_cents(999)).unwrap(),
        ))
        .unwrap();
        cart.remove_all().unwrap();
    }

    let resumed = session_cart(&store, "session-3");
    assert!(resumed.is_empty());
    assert_eq!(resumed.taxes().len(), 1);
}
