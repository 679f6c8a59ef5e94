//! Cart line item type definition

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::product_catalog::{Product, ProductId};

/// One product in the cart and how many of it.
///
/// The line item references the full product record; its unit price is read
/// from that record whenever totals are computed, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product record.
    pub product:  Arc<Product>,
    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// Creates a line item with quantity 1.
    #[must_use]
    pub fn new(product: Arc<Product>) -> Self {
        Self { product, quantity: 1 }
    }

    /// Product ID.
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }

    /// Savings from the sale price for this line.
    #[must_use]
    pub fn sale_savings(&self) -> f64 {
        self.product.savings() * f64::from(self.quantity)
    }
}

/// Persisted cart payload: `{"items": [{"product": ..., "quantity": n}]}`.
#[derive(Debug, Serialize)]
pub(crate) struct CartPayload<'a> {
    pub(crate) items: &'a [CartLineItem],
}
