//! # Product Catalog Service
//!
//! Read-only catalog with listing filters, sorting and search.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{
    errors::StorefrontError,
    types::product_catalog::{Product, ProductFilter, ProductId, ProductSortOrder},
};

use super::data::facyas_products;
use super::search::{search_products, search_suggestions};

// ============================================================================
// PRODUCT CATALOG SERVICE
// ============================================================================

/// Static product catalog.
///
/// Products are shared as `Arc<Product>` so cart line items can hold the
/// same records the catalog lists.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    /// Products in listing order.
    products: Vec<Arc<Product>>,
    /// Position of each product by ID.
    by_id:    HashMap<ProductId, usize>,
}

impl ProductCatalog {
    /// Builds a catalog from products in listing order.
    ///
    /// # Errors
    /// Returns error if two products share an ID.
    pub fn from_products(products: Vec<Product>) -> Result<Self, StorefrontError> {
        let mut catalog = Self::default();
        for product in products {
            if catalog.by_id.contains_key(&product.id) {
                return Err(StorefrontError::ProductAlreadyExists(product.id.to_string()));
            }
            catalog.by_id.insert(product.id.clone(), catalog.products.len());
            catalog.products.push(Arc::new(product));
        }
        debug!(products = catalog.products.len(), "catalog loaded");
        Ok(catalog)
    }

    /// The Facyas product line.
    #[must_use]
    pub fn facyas() -> Self {
        let products = facyas_products();
        let by_id = products.iter().enumerate().map(|(i, p)| (p.id.clone(), i)).collect();
        Self { products: products.into_iter().map(Arc::new).collect(), by_id }
    }

    /// All products in listing order.
    #[must_use]
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Gets a product by ID.
    ///
    /// # Errors
    /// Returns error if product not found.
    pub fn get_product(&self, id: &ProductId) -> Result<Arc<Product>, StorefrontError> {
        self.by_id
            .get(id)
            .map(|&index| Arc::clone(&self.products[index]))
            .ok_or_else(|| StorefrontError::ProductNotFound(id.to_string()))
    }

    /// Filters then sorts the listing. Sorting is stable, so ties keep
    /// listing order.
    #[must_use]
    pub fn filter_products(
        &self, filter: &ProductFilter, sort: ProductSortOrder,
    ) -> Vec<Arc<Product>> {
        let mut filtered: Vec<Arc<Product>> =
            self.products.iter().filter(|p| filter.matches(p)).cloned().collect();
        sort_products(&mut filtered, sort);
        filtered
    }

    /// Gets products on sale.
    #[must_use]
    pub fn sale_products(&self) -> Vec<Arc<Product>> {
        self.products.iter().filter(|p| p.is_on_sale()).cloned().collect()
    }

    /// The first `limit` products in listing order, as shown on the home page.
    #[must_use]
    pub fn featured_products(&self, limit: usize) -> Vec<Arc<Product>> {
        self.products.iter().take(limit).cloned().collect()
    }

    /// Keyword search, see [`search_products`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Arc<Product>> {
        search_products(&self.products, query)
    }

    /// Search-box suggestions, see [`search_suggestions`].
    #[must_use]
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        search_suggestions(&self.products, query)
    }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

/// Sorts products by specified order.
fn sort_products(products: &mut [Arc<Product>], sort: ProductSortOrder) {
    let by_f64 = |a: f64, b: f64| a.partial_cmp(&b).unwrap_or(Ordering::Equal);

    match sort {
        ProductSortOrder::Featured => {},
        ProductSortOrder::PriceAsc => products.sort_by(|a, b| by_f64(a.price, b.price)),
        ProductSortOrder::PriceDesc => products.sort_by(|a, b| by_f64(b.price, a.price)),
        ProductSortOrder::TopRated => products.sort_by(|a, b| by_f64(b.rating, a.rating)),
        ProductSortOrder::Newest => {
            // Non-numeric ids sort after every numeric one.
            products.sort_by(|a, b| match (a.id.sequence(), b.id.sequence()) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        },
    }
}
