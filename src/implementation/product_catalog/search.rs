//! # Keyword Search
//!
//! Free-text product search over names, French category and skin-type
//! labels, descriptions, and a table of ingredient and concern keywords.

use std::sync::Arc;

use crate::types::product_catalog::Product;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 5;

/// Search term → product name/category fragments it stands for.
///
/// Checked in order; the first term contained in the query decides.
const KEYWORDS: &[(&str, &[&str])] = &[
    // Ingredients
    ("glutathione", &["glutathione", "antioxydant", "éclat"]),
    ("retinol", &["retinol", "anti-âge", "rides"]),
    ("vitamine c", &["vitamin c", "vitamine c", "éclat", "antioxydant"]),
    ("collagène", &["collagen", "collagène", "fermeté", "anti-âge"]),
    ("rose", &["rose", "hydratant", "apaisant"]),
    // Concerns
    ("acné", &["soap", "cleanser", "nettoyant"]),
    ("anti-âge", &["retinol", "collagen", "cream", "serum"]),
    ("hydratation", &["cream", "lotion", "oil", "hydratant"]),
    ("protection", &["sunscreen", "protection"]),
    ("éclat", &["glutathione", "vitamin c", "serum"]),
    // Product types
    ("crème", &["cream", "moisturizer"]),
    ("sérum", &["serum"]),
    ("huile", &["oil"]),
    ("savon", &["soap", "cleanser"]),
    ("lotion", &["lotion"]),
    ("écran solaire", &["sunscreen"]),
];

/// Searchable label for a category slug.
#[must_use]
pub fn category_label(category: &str) -> &str {
    match category {
        "cleanser" => "Nettoyant",
        "serum" => "Sérum",
        "moisturizer" => "Hydratant Crème",
        "oil" => "Huile",
        "sunscreen" => "Protection solaire Écran solaire",
        "body" => "Corps Lotion",
        "supplement" => "Complément Collagène",
        other => other,
    }
}

/// Searchable label for a skin type.
#[must_use]
pub fn skin_type_label(skin_type: &str) -> &str {
    match skin_type {
        "dry" => "Peau sèche",
        "oily" => "Peau grasse",
        "normal" => "Peau normale",
        "combination" => "Peau mixte",
        "mature" => "Peau mature",
        "all" => "Tous types",
        other => other,
    }
}

fn normalize(query: &str) -> Option<String> {
    let term = query.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

fn matches_keywords(product: &Product, term: &str) -> bool {
    let Some((_, fragments)) = KEYWORDS.iter().find(|(keyword, _)| term.contains(keyword)) else {
        return false;
    };

    let name = product.name.to_lowercase();
    let category = product.category.to_lowercase();
    fragments.iter().any(|fragment| name.contains(fragment) || category.contains(fragment))
}

fn matches(product: &Product, term: &str) -> bool {
    product.name.to_lowercase().contains(term)
        || category_label(&product.category).to_lowercase().contains(term)
        || product.skin_type.iter().any(|t| skin_type_label(t).to_lowercase().contains(term))
        || product.description.as_deref().is_some_and(|d| d.to_lowercase().contains(term))
        || matches_keywords(product, term)
}

/// Products matching `query`, in catalog order. Blank queries match nothing.
#[must_use]
pub fn search_products(products: &[Arc<Product>], query: &str) -> Vec<Arc<Product>> {
    let Some(term) = normalize(query) else {
        return Vec::new();
    };

    products.iter().filter(|product| matches(product, &term)).cloned().collect()
}

/// Up to [`MAX_SUGGESTIONS`] distinct product names and category labels
/// containing `query`, in first-seen order.
#[must_use]
pub fn search_suggestions(products: &[Arc<Product>], query: &str) -> Vec<String> {
    let Some(term) = normalize(query) else {
        return Vec::new();
    };

    let mut suggestions: Vec<String> = Vec::new();
    let mut push = |candidate: &str| {
        if !suggestions.iter().any(|s| s == candidate) {
            suggestions.push(candidate.to_string());
        }
    };

    for product in products {
        if product.name.to_lowercase().contains(&term) {
            push(&product.name);
        }
        let label = category_label(&product.category);
        if label.to_lowercase().contains(&term) {
            push(label);
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
