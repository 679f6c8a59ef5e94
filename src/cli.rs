//! Command-line front end over the catalog and a file-backed cart.

use std::{io::Write, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::{
    implementation::{
        cart_system::{CartState, CartStore, Rehydration},
        persistence::FileStore,
        product_catalog::{
            resolve_category_alias, ProductCatalog, ProductFilter, ProductId, ProductSortOrder,
        },
    },
    types::{CurrencyConfig, StorefrontConfig},
    utils::{discount_percentage, format_discount, format_price},
};

#[derive(Debug, Parser)]
#[command(name = "facyas", version, about = "Facyas storefront: catalog, search and cart")]
pub struct CliArgs {
    #[arg(long, value_name = "FILE", help = "Path to a JSON configuration file", global = true)]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "FACYAS_STORAGE_DIR",
        value_name = "DIR",
        help = "Directory holding the saved cart",
        global = true
    )]
    pub storage_dir: Option<PathBuf>,

    #[arg(long, env = "FACYAS_CART_KEY", value_name = "KEY", help = "Storage key of the cart", global = true)]
    pub cart_key: Option<String>,

    #[arg(short, long, help = "Debug logging for the storefront", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products
    Catalog {
        /// Category slug or shop-link alias
        #[arg(long)]
        category:  Option<String>,
        /// Skin type
        #[arg(long)]
        skin_type: Option<String>,
        /// Name filter
        #[arg(long)]
        name:      Option<String>,
        /// featured, price-low, price-high, rating or newest
        #[arg(long, default_value = "featured")]
        sort:      String,
    },
    /// Keyword search
    Search {
        /// Search terms
        query: String,
    },
    /// Inspect or change the saved cart
    #[command(subcommand)]
    Cart(CartCommandArgs),
}

#[derive(Debug, Subcommand)]
pub enum CartCommandArgs {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add { product_id: String },
    /// Remove a product
    Remove { product_id: String },
    /// Set a product's quantity (0 or less removes it)
    Set {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity:   i64,
    },
    /// Empty the cart
    Clear,
}

impl CliArgs {
    /// Resolves the effective configuration: file, then command-line overrides.
    pub fn storefront_config(&self) -> Result<StorefrontConfig> {
        let mut config = StorefrontConfig::load_or_default(self.config.as_deref())
            .context("failed to load storefront config")?;
        if let Some(dir) = &self.storage_dir {
            config.storage_dir = dir.clone();
        }
        if let Some(key) = &self.cart_key {
            config.cart_key = key.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Runs one command, writing its report to `out`.
pub fn run(args: &CliArgs, out: &mut dyn Write) -> Result<()> {
    let config = args.storefront_config()?;
    let catalog = ProductCatalog::facyas();

    match &args.command {
        Command::Catalog { category, skin_type, name, sort } => {
            let sort: ProductSortOrder = sort.parse()?;
            let mut filter = ProductFilter::new();
            if let Some(category) = category {
                filter = filter.with_category(resolve_category_alias(category));
            }
            if let Some(skin_type) = skin_type {
                filter = filter.with_skin_type(skin_type.as_str());
            }
            if let Some(name) = name {
                filter = filter.with_name_query(name.as_str());
            }

            let products = catalog.filter_products(&filter, sort);
            writeln!(out, "{} product(s), sorted by {}", products.len(), sort.label())?;
            for product in &products {
                let mut line = format!(
                    "{:>3}  {:<30} {:>10}",
                    product.id,
                    product.name,
                    format_price(product.price, &config.currency)
                );
                if let Some(original) = product.original_price {
                    let off = discount_percentage(original, product.price);
                    line.push_str(&format!("  ({})", format_discount(off)));
                }
                writeln!(out, "{line}")?;
            }
        },
        Command::Search { query } => {
            let results = catalog.search(query);
            writeln!(out, "{} result(s) for {:?}", results.len(), query)?;
            for product in &results {
                writeln!(out, "{:>3}  {}", product.id, product.name)?;
            }
            let suggestions = catalog.suggestions(query);
            if !suggestions.is_empty() {
                writeln!(out, "suggestions: {}", suggestions.join(", "))?;
            }
        },
        Command::Cart(command) => {
            let storage = Arc::new(FileStore::new(&config.storage_dir));
            let store = CartStore::rehydrate(storage, config.cart_key.clone());
            if store.rehydration() == Rehydration::Discarded {
                writeln!(out, "saved cart was unreadable and has been reset")?;
            }

            let state = match command {
                CartCommandArgs::Show => store.state(),
                CartCommandArgs::Add { product_id } => {
                    let product = catalog.get_product(&ProductId::new(product_id.as_str()))?;
                    store.add(product)
                },
                CartCommandArgs::Remove { product_id } => {
                    store.remove(&ProductId::new(product_id.as_str()))
                },
                CartCommandArgs::Set { product_id, quantity } => {
                    store.set_quantity(&ProductId::new(product_id.as_str()), *quantity)
                },
                CartCommandArgs::Clear => store.clear(),
            };
            write_cart(out, &state, &config.currency)?;
        },
    }

    Ok(())
}

fn write_cart(out: &mut dyn Write, state: &CartState, currency: &CurrencyConfig) -> Result<()> {
    if state.is_empty() {
        writeln!(out, "cart is empty")?;
        return Ok(());
    }

    for item in state.items() {
        writeln!(
            out,
            "{:>3}  {:<30} x{:<4} {:>10}",
            item.product.id,
            item.product.name,
            item.quantity,
            format_price(item.line_total(), currency)
        )?;
    }
    writeln!(out, "{} item(s), total {}", state.item_count(), format_price(state.total(), currency))?;
    Ok(())
}
