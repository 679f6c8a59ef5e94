//! Cart store: owned cart state with write-through persistence

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, warn};

use crate::{
    implementation::persistence::{JsonStorage, KeyValueStore},
    types::{
        product_catalog::{Product, ProductId},
        DEFAULT_CART_KEY,
    },
};

use super::cart::CartState;
use super::item::CartPayload;
use super::rehydrate::{rehydrate, Rehydration};
use super::types::{CartCommand, CartTransition, ObserverId};

type Observer = Arc<dyn Fn(&CartTransition) + Send + Sync>;

struct StoreInner {
    state:     Arc<CartState>,
    observers: Vec<(ObserverId, Observer)>,
    next_id:   u64,
}

/// Owns the cart for a session.
///
/// Every operation applies one [`CartCommand`], writes the full item list to
/// storage when contents changed, then notifies observers. Operations are
/// serialized by an internal lock, and the storage write completes before
/// the next operation is accepted.
pub struct CartStore {
    inner:       Mutex<StoreInner>,
    storage:     Arc<dyn KeyValueStore>,
    key:         String,
    rehydration: Rehydration,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("state", &inner.state)
            .field("observers", &inner.observers.len())
            .field("storage", &self.storage)
            .finish()
    }
}

impl CartStore {
    /// Creates a store seeded from the record under `key`.
    #[must_use]
    pub fn rehydrate(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (state, rehydration) = rehydrate(storage.as_ref(), &key);

        Self {
            inner: Mutex::new(StoreInner {
                state:     Arc::new(state),
                observers: Vec::new(),
                next_id:   0,
            }),
            storage,
            key,
            rehydration,
        }
    }

    /// Creates a store seeded from the default cart key.
    #[must_use]
    pub fn with_default_key(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::rehydrate(storage, DEFAULT_CART_KEY)
    }

    /// What start-up rehydration found.
    #[must_use]
    pub fn rehydration(&self) -> Rehydration {
        self.rehydration
    }

    /// Storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<CartState> {
        Arc::clone(&self.lock().state)
    }

    /// Adds one unit of `product`. Does not open the cart.
    pub fn add(&self, product: impl Into<Arc<Product>>) -> Arc<CartState> {
        self.dispatch(CartCommand::Add(product.into()))
    }

    /// Removes the line item for `product_id`, if any.
    pub fn remove(&self, product_id: &ProductId) -> Arc<CartState> {
        self.dispatch(CartCommand::Remove(product_id.clone()))
    }

    /// Sets the quantity for `product_id`; zero or negative removes it.
    pub fn set_quantity(&self, product_id: &ProductId, quantity: i64) -> Arc<CartState> {
        self.dispatch(CartCommand::SetQuantity { product_id: product_id.clone(), quantity })
    }

    /// Empties the cart.
    pub fn clear(&self) -> Arc<CartState> {
        self.dispatch(CartCommand::Clear)
    }

    /// Shows the cart.
    pub fn open(&self) -> Arc<CartState> {
        self.dispatch(CartCommand::Open)
    }

    /// Hides the cart.
    pub fn close(&self) -> Arc<CartState> {
        self.dispatch(CartCommand::Close)
    }

    /// Flips cart visibility.
    pub fn toggle(&self) -> Arc<CartState> {
        self.dispatch(CartCommand::Toggle)
    }

    /// Applies `command` and returns the new snapshot.
    pub fn dispatch(&self, command: CartCommand) -> Arc<CartState> {
        let (transition, observers) = {
            let mut inner = self.lock();
            let previous = Arc::clone(&inner.state);
            let current = Arc::new(previous.apply(&command));
            inner.state = Arc::clone(&current);

            debug!(
                command = %command,
                item_count = current.item_count(),
                total = current.total(),
                is_open = current.is_open(),
                "cart transition"
            );

            if command.changes_contents() {
                self.persist(&current);
            }

            let observers: Vec<Observer> =
                inner.observers.iter().map(|(_, observer)| Arc::clone(observer)).collect();
            (CartTransition { command, previous, current }, observers)
        };

        for observer in &observers {
            observer(&transition);
        }
        transition.current
    }

    /// Registers a callback run after every transition.
    ///
    /// Callbacks run outside the store lock and may call back into the store.
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&CartTransition) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = ObserverId(inner.next_id);
        inner.next_id += 1;
        inner.observers.push((id, Arc::new(observer)));
        id
    }

    /// Removes a callback. Returns whether it was registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(observer_id, _)| *observer_id != id);
        inner.observers.len() != before
    }

    fn persist(&self, state: &CartState) {
        let payload = CartPayload { items: state.items() };
        if let Err(err) = JsonStorage::new(self.storage.as_ref()).set(&self.key, &payload) {
            warn!(key = %self.key, error = %err, "failed to save cart; keeping in-memory state");
        }
    }

    // Snapshots are swapped whole, so a poisoned lock still guards a valid state.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
