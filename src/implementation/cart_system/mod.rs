//! # Cart System
//!
//! Shopping cart for the storefront: a pure reducer over line items
//! ([`CartState::apply`]) and an owned store ([`CartStore`]) that persists
//! contents on every change and rebuilds them at start-up by replaying the
//! saved record through the same reducer.

mod cart;
mod item;
mod rehydrate;
mod service;
mod types;

pub use cart::{CartState, CartTotals};
pub use item::CartLineItem;
pub use rehydrate::{rehydrate, Rehydration};
pub use service::CartStore;
pub use types::{CartCommand, CartTransition, ObserverId};

#[cfg(test)]
mod tests;
