//! # Product Catalog Types
//!
//! Product records and listing filters for the storefront catalog.

use std::{borrow::Cow, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::StorefrontError;

/// Catch-all value for category and skin-type filters.
pub const ALL: &str = "all";

// ============================================================================
// CORE TYPES
// ============================================================================

/// Unique product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub Cow<'static, str>);

impl ProductId {
    /// Creates a new product ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Creates a product ID from a static string slice (zero-copy).
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the ID, used for "newest first" ordering.
    ///
    /// Catalog ids are assigned in increasing order; non-numeric ids sort last.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A skincare product as listed in the catalog.
///
/// Field names serialize in camelCase; this is the record embedded in the
/// persisted cart payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id:             ProductId,
    /// Display name.
    pub name:           String,
    /// Current unit price (the sale price when on sale).
    pub price:          f64,
    /// Price before the sale, when on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Average customer rating out of 5.
    #[serde(default)]
    pub rating:         f64,
    /// Number of reviews.
    #[serde(default)]
    pub review_count:   u32,
    /// Image path.
    #[serde(default)]
    pub image:          String,
    /// Merchandising badge ("BEST SELLER", "PROMO", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge:          Option<String>,
    /// Category slug.
    #[serde(default)]
    pub category:       String,
    /// Skin types the product suits; `"all"` matches every type.
    #[serde(default)]
    pub skin_type:      Vec<String>,
    /// Whether the product is currently discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_on_sale:     Option<bool>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description:    Option<String>,
    /// External purchase link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_link:  Option<String>,
}

impl Product {
    /// Creates a product with the required fields; everything else is empty.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            original_price: None,
            rating: 0.0,
            review_count: 0,
            image: String::new(),
            badge: None,
            category: String::new(),
            skin_type: Vec::new(),
            is_on_sale: None,
            description: None,
            purchase_link: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the skin types.
    #[must_use]
    pub fn with_skin_types(mut self, skin_types: &[&str]) -> Self {
        self.skin_type = skin_types.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Sets rating and review count.
    #[must_use]
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    /// Marks the product as on sale from `original_price`.
    #[must_use]
    pub fn on_sale_from(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self.is_on_sale = Some(true);
        self
    }

    /// Sets the badge.
    #[must_use]
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    /// Sets the image path.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks if product is on sale.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.is_on_sale.unwrap_or(false)
            || self.original_price.is_some_and(|original| original > self.price)
    }

    /// Amount saved per unit when on sale.
    #[must_use]
    pub fn savings(&self) -> f64 {
        self.original_price.map_or(0.0, |original| (original - self.price).max(0.0))
    }

    /// Whether the product suits `skin_type`. Products tagged `"all"` suit every type.
    #[must_use]
    pub fn suits_skin_type(&self, skin_type: &str) -> bool {
        self.skin_type.iter().any(|t| t == skin_type || t == ALL)
    }
}

// ============================================================================
// SEARCH & FILTERING
// ============================================================================

/// Filters applied to the product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Category slug; `None` or `"all"` for any.
    pub category:    Option<String>,
    /// Skin type; `None` or `"all"` for any.
    pub skin_type:   Option<String>,
    /// Case-insensitive substring of the product name.
    pub name_query:  Option<String>,
}

impl ProductFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filters by skin type.
    #[must_use]
    pub fn with_skin_type(mut self, skin_type: impl Into<String>) -> Self {
        self.skin_type = Some(skin_type.into());
        self
    }

    /// Filters by name.
    #[must_use]
    pub fn with_name_query(mut self, query: impl Into<String>) -> Self {
        self.name_query = Some(query.into());
        self
    }

    /// Checks if product matches filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category.as_deref() {
            if category != ALL && product.category != category {
                return false;
            }
        }

        if let Some(skin_type) = self.skin_type.as_deref() {
            if skin_type != ALL && !product.suits_skin_type(skin_type) {
                return false;
            }
        }

        if let Some(query) = self.name_query.as_deref() {
            if !product.name.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSortOrder {
    /// Catalog order.
    #[default]
    Featured,
    /// Sort by price, lowest first.
    PriceAsc,
    /// Sort by price, highest first.
    PriceDesc,
    /// Sort by rating, best first.
    TopRated,
    /// Most recently added first.
    Newest,
}

impl ProductSortOrder {
    /// Listing option value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-low",
            Self::PriceDesc => "price-high",
            Self::TopRated => "rating",
            Self::Newest => "newest",
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Featured => "Produits vedettes",
            Self::PriceAsc => "Prix croissant",
            Self::PriceDesc => "Prix décroissant",
            Self::TopRated => "Mieux notés",
            Self::Newest => "Nouveautés",
        }
    }

    /// All sort options in display order.
    #[must_use]
    pub fn all() -> [Self; 5] {
        [Self::Featured, Self::PriceAsc, Self::PriceDesc, Self::TopRated, Self::Newest]
    }
}

impl FromStr for ProductSortOrder {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| StorefrontError::UnknownSortOrder(s.to_string()))
    }
}

/// A selectable listing option (value + display label).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOption {
    /// Filter value.
    pub value: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// Category filter options shown on the listing page.
///
/// Seeded categories without an entry (`tools`, `bundle`) are only reachable
/// through "all" or a direct category filter.
pub const CATEGORY_OPTIONS: &[ListingOption] = &[
    ListingOption { value: ALL, label: "Tous les produits" },
    ListingOption { value: "cleanser", label: "Nettoyants" },
    ListingOption { value: "serum", label: "Sérums" },
    ListingOption { value: "moisturizer", label: "Hydratants" },
    ListingOption { value: "oil", label: "Huiles" },
    ListingOption { value: "sunscreen", label: "Protection solaire" },
    ListingOption { value: "body", label: "Corps" },
    ListingOption { value: "supplement", label: "Compléments" },
];

/// Skin-type filter options.
pub const SKIN_TYPE_OPTIONS: &[ListingOption] = &[
    ListingOption { value: ALL, label: "Tous types de peau" },
    ListingOption { value: "dry", label: "Peau sèche" },
    ListingOption { value: "oily", label: "Peau grasse" },
    ListingOption { value: "combination", label: "Peau mixte" },
    ListingOption { value: "normal", label: "Peau normale" },
    ListingOption { value: "mature", label: "Peau mature" },
];

/// Maps a category value from a shop link to a catalog category.
///
/// Landing pages link by concern rather than by category.
#[must_use]
pub fn resolve_category_alias(value: &str) -> &str {
    match value {
        "anti-aging" => "moisturizer",
        "acne" => "cleanser",
        "brightening" => "serum",
        other => other,
    }
}
