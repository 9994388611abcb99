//! # Session Persistence
//!
//! The concrete persistence adapter: cart snapshots as JSON strings in a
//! shared, namespaced key/value map.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Storage Model                              │
//! │                                                                         │
//! │  SessionStore (cloneable handle, one logical session)                   │
//! │  └── Arc<Mutex<HashMap<namespace, json>>>                               │
//! │        ├── "cart.default"  → {"tax":[...],"items":[...]}                │
//! │        └── "session-42"    → {"tax":[...],"items":[...]}                │
//! │                                                                         │
//! │  Request 1: Cart ──► SessionPersistence ──► store.put(ns, json)        │
//! │  Request 2: Cart ──► SessionPersistence ──► store.get(ns) ──► resume   │
//! │                                                                         │
//! │  The store handle is an explicit, injected dependency - there is no     │
//! │  session global. The namespace key is an explicit parameter, not        │
//! │  ambient state.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! First access to a namespace yields an empty snapshot; a cart over a fresh
//! session simply starts empty instead of failing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use basket_core::{CartSnapshot, PersistenceError, PersistencePort};

/// Namespace used until the caller assigns one.
pub const DEFAULT_NAMESPACE: &str = "cart.default";

// =============================================================================
// Session Store
// =============================================================================

/// A shared, in-memory key/value store scoped to one logical session.
///
/// Clones share the same underlying map, which is what lets two carts in two
/// "requests" observe each other's writes the way a real session store
/// would. Values are serialized JSON snapshots.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        SessionStore::default()
    }

    fn get(&self, namespace: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session store mutex poisoned")
            .get(namespace)
            .cloned()
    }

    fn put(&self, namespace: &str, value: String) {
        self.entries
            .lock()
            .expect("session store mutex poisoned")
            .insert(namespace.to_string(), value);
    }
}

// =============================================================================
// Session Persistence Adapter
// =============================================================================

/// [`PersistencePort`] adapter over a [`SessionStore`].
///
/// Holds the store handle, the active namespace, and the cached contents.
/// The cart never sees any of this: it talks to the trait.
pub struct SessionPersistence {
    store: SessionStore,
    namespace: String,
    contents: CartSnapshot,
}

impl SessionPersistence {
    /// Creates an adapter over a store using the default namespace.
    pub fn new(store: SessionStore) -> Self {
        SessionPersistence::with_namespace(store, DEFAULT_NAMESPACE)
            .expect("default namespace is valid")
    }

    /// Creates an adapter over a store with an explicit namespace.
    pub fn with_namespace(store: SessionStore, namespace: &str) -> Result<Self, PersistenceError> {
        if namespace.trim().is_empty() {
            return Err(PersistenceError::InvalidNamespace);
        }

        Ok(SessionPersistence {
            store,
            namespace: namespace.to_string(),
            contents: CartSnapshot::default(),
        })
    }
}

impl PersistencePort for SessionPersistence {
    fn load(&mut self, id: Option<&str>) -> Result<&CartSnapshot, PersistenceError> {
        if let Some(id) = id {
            self.set_id(id)?;
        }

        self.contents = match self.store.get(&self.namespace) {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|err| PersistenceError::Corrupt {
                    namespace: self.namespace.clone(),
                    reason: err.to_string(),
                })?
            }
            // First access to a namespace: start with an empty snapshot.
            None => CartSnapshot::default(),
        };

        debug!(
            namespace = %self.namespace,
            items = self.contents.items.len(),
            taxes = self.contents.tax.len(),
            "loaded cart snapshot"
        );
        Ok(&self.contents)
    }

    fn save(&mut self, id: Option<&str>) -> Result<(), PersistenceError> {
        if let Some(id) = id {
            self.set_id(id)?;
        }

        let raw = serde_json::to_string(&self.contents)
            .map_err(|err| PersistenceError::Serialize(err.to_string()))?;
        self.store.put(&self.namespace, raw);

        debug!(
            namespace = %self.namespace,
            items = self.contents.items.len(),
            taxes = self.contents.tax.len(),
            "saved cart snapshot"
        );
        Ok(())
    }

    fn set_id(&mut self, id: &str) -> Result<(), PersistenceError> {
        if id.trim().is_empty() {
            return Err(PersistenceError::InvalidNamespace);
        }
        trace!(from = %self.namespace, to = %id, "switching persistence namespace");
        self.namespace = id.to_string();
        Ok(())
    }

    fn id(&self) -> &str {
        &self.namespace
    }

    fn contents(&self) -> &CartSnapshot {
        &self.contents
    }

    fn set_contents(&mut self, contents: CartSnapshot) {
        self.contents = contents;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
