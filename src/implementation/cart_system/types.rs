//! Core type definitions for the cart system

use std::{fmt, sync::Arc};

use crate::types::product_catalog::{Product, ProductId};

use super::cart::CartState;

/// A transition request for the cart reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add(Arc<Product>),
    /// Remove a product's line item.
    Remove(ProductId),
    /// Set a line item's quantity; `<= 0` removes it.
    SetQuantity {
        /// Product ID.
        product_id: ProductId,
        /// Requested quantity.
        quantity:   i64,
    },
    /// Empty the cart.
    Clear,
    /// Show the cart.
    Open,
    /// Hide the cart.
    Close,
    /// Flip visibility.
    Toggle,
}

impl CartCommand {
    /// Whether the command changes cart contents (and must be persisted).
    #[must_use]
    pub fn changes_contents(&self) -> bool {
        match self {
            Self::Add(_) | Self::Remove(_) | Self::SetQuantity { .. } | Self::Clear => true,
            Self::Open | Self::Close | Self::Toggle => false,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::SetQuantity { .. } => "set_quantity",
            Self::Clear => "clear",
            Self::Open => "open",
            Self::Close => "close",
            Self::Toggle => "toggle",
        }
    }
}

impl fmt::Display for CartCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(product) => write!(f, "add({})", product.id),
            Self::Remove(id) => write!(f, "remove({})", id),
            Self::SetQuantity { product_id, quantity } => {
                write!(f, "set_quantity({}, {})", product_id, quantity)
            },
            other => f.write_str(other.name()),
        }
    }
}

/// A completed transition, handed to cart observers.
#[derive(Debug, Clone)]
pub struct CartTransition {
    /// Command that was applied.
    pub command:  CartCommand,
    /// Snapshot before the command.
    pub previous: Arc<CartState>,
    /// Snapshot after the command.
    pub current:  Arc<CartState>,
}

impl CartTransition {
    /// Whether the line items differ between the two snapshots.
    #[must_use]
    pub fn items_changed(&self) -> bool {
        self.previous.items() != self.current.items()
    }
}

/// Handle returned by [`CartStore::subscribe`](super::CartStore::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);
