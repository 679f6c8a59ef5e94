//! Cart state and the transition reducer

use std::sync::Arc;

use serde::Serialize;

use crate::types::product_catalog::{Product, ProductId};

use super::item::CartLineItem;
use super::types::CartCommand;

/// Cart price totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of `price * quantity` over all items.
    pub total:         f64,
    /// Sum of quantities.
    pub item_count:    u64,
    /// Savings from sale prices.
    pub total_savings: f64,
}

impl CartTotals {
    /// Calculates totals for a list of line items.
    ///
    /// Always computed from scratch so repeated transitions cannot drift.
    #[must_use]
    pub fn calculate(items: &[CartLineItem]) -> Self {
        let total = items.iter().fold(0.0, |acc, item| acc + item.line_total());
        let item_count = items.iter().map(|item| u64::from(item.quantity)).sum();
        let total_savings = items.iter().fold(0.0, |acc, item| acc + item.sale_savings());

        Self { total, item_count, total_savings }
    }
}

/// Shopping cart state.
///
/// Only reachable through [`CartState::empty`] and [`CartState::apply`], so
/// every value satisfies the cart invariants: one line item per product id,
/// quantities of at least 1, and aggregates equal to a fresh sum over items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items:      Vec<CartLineItem>,
    is_open:    bool,
    total:      f64,
    item_count: u64,
}

impl CartState {
    /// The empty, closed cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart sidebar is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Sum of `price * quantity`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Whether cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up the line item for a product.
    #[must_use]
    pub fn item(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// Quantity of a product, 0 when absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.item(product_id).map_or(0, |item| item.quantity)
    }

    /// Full totals breakdown, including sale savings.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::calculate(&self.items)
    }

    /// Applies a command and returns the resulting state.
    ///
    /// Never fails: unknown product ids are no-ops and non-positive
    /// quantities remove the line item.
    #[must_use]
    pub fn apply(&self, command: &CartCommand) -> Self {
        match command {
            CartCommand::Add(product) => self.with_items(add_item(&self.items, product)),
            CartCommand::Remove(product_id) => {
                self.with_items(remove_item(&self.items, product_id))
            },
            CartCommand::SetQuantity { product_id, quantity } => {
                self.with_items(set_quantity(&self.items, product_id, *quantity))
            },
            CartCommand::Clear => self.with_items(Vec::new()),
            CartCommand::Open => Self { is_open: true, ..self.clone() },
            CartCommand::Close => Self { is_open: false, ..self.clone() },
            CartCommand::Toggle => Self { is_open: !self.is_open, ..self.clone() },
        }
    }

    fn with_items(&self, items: Vec<CartLineItem>) -> Self {
        let totals = CartTotals::calculate(&items);
        Self { items, is_open: self.is_open, total: totals.total, item_count: totals.item_count }
    }
}

fn add_item(items: &[CartLineItem], product: &Arc<Product>) -> Vec<CartLineItem> {
    let mut next = items.to_vec();
    match next.iter_mut().find(|item| item.product_id() == &product.id) {
        Some(item) => item.quantity = item.quantity.saturating_add(1),
        None => next.push(CartLineItem::new(Arc::clone(product))),
    }
    next
}

fn remove_item(items: &[CartLineItem], product_id: &ProductId) -> Vec<CartLineItem> {
    items.iter().filter(|item| item.product_id() != product_id).cloned().collect()
}

fn set_quantity(items: &[CartLineItem], product_id: &ProductId, quantity: i64) -> Vec<CartLineItem> {
    let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
    if quantity == 0 {
        return remove_item(items, product_id);
    }

    items
        .iter()
        .map(|item| {
            if item.product_id() == product_id {
                CartLineItem { quantity, ..item.clone() }
            } else {
                item.clone()
            }
        })
        .collect()
}
