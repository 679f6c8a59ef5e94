//! # Product Catalog
//!
//! The storefront's static catalog, listing filters and keyword search.

pub use crate::types::product_catalog::*;

mod data;
pub mod search;
mod service;

pub use search::{category_label, search_products, search_suggestions, skin_type_label};
pub use service::ProductCatalog;
