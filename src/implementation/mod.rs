//! Implementation details for the storefront

pub mod cart_system;
pub mod persistence;
pub mod product_catalog;
