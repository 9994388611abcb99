//! # basket-store: Session Persistence for Basket
//!
//! The concrete adapter behind basket-core's `PersistencePort` trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   basket-core                      basket-store (THIS CRATE)            │
//! │                                                                         │
//! │   Cart ──► dyn PersistencePort ◄── SessionPersistence                   │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                                    SessionStore                         │
//! │                              (shared key/value map)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`SessionStore`] is constructed once per logical session and cloned
//! into each [`SessionPersistence`] adapter; a cart's state survives across
//! requests within the same session because the clones share one map.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod session;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use session::{SessionPersistence, SessionStore, DEFAULT_NAMESPACE};
