//! # Facyas Storefront
//!
//! Storefront core for the Facyas skincare shop: the product catalog with
//! listing filters and keyword search, and a shopping cart that persists its
//! contents to a key-value store and restores them at start-up.

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

pub mod cli;
pub mod errors;
pub mod implementation;
pub mod logging;
pub mod types;
pub mod utils;

// Re-exports for public API
pub use errors::{PersistenceError, StorefrontError};
pub use implementation::cart_system::{CartCommand, CartState, CartStore, Rehydration};
pub use implementation::persistence::{FileStore, KeyValueStore, MemoryStore};
pub use implementation::product_catalog::{Product, ProductCatalog, ProductId};
pub use types::{StorefrontConfig, DEFAULT_CART_KEY};
