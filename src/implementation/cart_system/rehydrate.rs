//! Rebuilding the cart from its persisted payload

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    implementation::persistence::KeyValueStore,
    types::product_catalog::{Product, ProductId},
};

use super::cart::CartState;
use super::types::CartCommand;

/// What rehydration found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rehydration {
    /// No record was stored (or it could not be read).
    Empty,
    /// The record was replayed.
    Restored {
        /// Entries replayed into the cart.
        replayed: usize,
        /// Entries skipped for lacking a usable product or a non-negative price.
        skipped:  usize,
    },
    /// The record was corrupt and has been deleted.
    Discarded,
}

/// Reads the record under `key` and replays it through the cart reducer.
///
/// Each stored entry becomes an `Add` followed, when its quantity is above 1,
/// by a `SetQuantity`, so the result satisfies every invariant a live cart
/// does. A record that is not a JSON object with an `items` array is deleted
/// and the cart starts empty.
pub fn rehydrate(store: &dyn KeyValueStore, key: &str) -> (CartState, Rehydration) {
    let bytes = match store.read(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return (CartState::empty(), Rehydration::Empty),
        Err(err) => {
            warn!(key, error = %err, "failed to read saved cart; starting empty");
            return (CartState::empty(), Rehydration::Empty);
        },
    };

    let Some(entries) = parse_entries(&bytes) else {
        warn!(key, bytes = bytes.len(), "saved cart is corrupt; discarding it");
        if let Err(err) = store.remove(key) {
            warn!(key, error = %err, "failed to delete corrupt cart record");
        }
        return (CartState::empty(), Rehydration::Discarded);
    };

    let mut state = CartState::empty();
    let mut replayed = 0;
    let mut skipped = 0;

    for entry in &entries {
        match replay_commands(entry) {
            Some(commands) => {
                for command in &commands {
                    state = state.apply(command);
                }
                replayed += 1;
            },
            None => skipped += 1,
        }
    }

    info!(key, replayed, skipped, item_count = state.item_count(), "restored saved cart");
    (state, Rehydration::Restored { replayed, skipped })
}

fn parse_entries(bytes: &[u8]) -> Option<Vec<Value>> {
    let payload: Value = serde_json::from_slice(bytes).ok()?;
    match payload.get("items")? {
        Value::Array(items) => Some(items.clone()),
        _ => None,
    }
}

/// Commands reproducing one stored entry, `None` when it must be skipped.
fn replay_commands(entry: &Value) -> Option<Vec<CartCommand>> {
    let product_value = entry.get("product")?;
    let id = product_value.get("id")?.as_str()?;
    if id.is_empty() {
        return None;
    }

    let product: Product = match serde_json::from_value(product_value.clone()) {
        Ok(product) => product,
        Err(err) => {
            debug!(product_id = id, error = %err, "skipping malformed saved product");
            return None;
        },
    };
    if !product.price.is_finite() || product.price < 0.0 {
        debug!(product_id = id, price = product.price, "skipping saved product with invalid price");
        return None;
    }

    let mut commands = vec![CartCommand::Add(Arc::new(product))];
    let quantity = entry
        .get("quantity")
        .and_then(|q| q.as_i64().or_else(|| q.as_f64().map(|f| f as i64)))
        .unwrap_or(1);
    if quantity > 1 {
        commands.push(CartCommand::SetQuantity { product_id: ProductId::new(id), quantity });
    }
    Some(commands)
}
