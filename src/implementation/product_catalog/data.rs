//! Facyas product line

use crate::types::product_catalog::Product;

fn image(name: &str) -> String {
    format!("/{name}.png")
}

/// The Facyas catalog, in listing order.
pub(crate) fn facyas_products() -> Vec<Product> {
    vec![
        Product::new("13", "EXFOLIATING GLOVES", 19.99)
            .with_rating(4.4, 64)
            .with_image(image("exfoliating_gloves"))
            .with_category("tools")
            .with_skin_types(&["all"])
            .with_description("Gants exfoliants pour un gommage doux et efficace de la peau"),
        Product::new("1", "PERFECTLY FACE CREAM", 55.00)
            .with_rating(4.8, 243)
            .with_image(image("perfectly_face_cream"))
            .with_badge("BEST SELLER")
            .with_category("moisturizer")
            .with_skin_types(&["dry", "normal"])
            .with_description("Crème hydratante anti-âge pour le visage"),
        Product::new("2", "GLUTATHIONE FACE SERUM", 124.00)
            .with_rating(4.7, 158)
            .with_image(image("glutathione_face_serum"))
            .with_category("serum")
            .with_skin_types(&["all"])
            .with_description("Sérum éclat au glutathione pour tous types de peau"),
        Product::new("3", "SUPER SUNSCREEN", 45.00)
            .with_rating(4.9, 120)
            .with_image(image("super_sunscreen"))
            .with_badge("PROTECTION")
            .with_category("sunscreen")
            .with_skin_types(&["all"])
            .with_description("Protection solaire haute performance SPF 50+"),
        Product::new("4", "ROSE MULTI USE OIL", 40.00)
            .with_rating(4.6, 86)
            .with_image(image("rose_multi_use_oil"))
            .with_category("oil")
            .with_skin_types(&["dry", "mature"])
            .with_description("Huile multi-usage à la rose pour peau sèche et mature"),
        Product::new("5", "PERFECTLY SOAP", 55.00)
            .with_rating(4.5, 312)
            .with_image(image("perfectly_soap"))
            .with_category("cleanser")
            .with_skin_types(&["oily", "combination"])
            .with_description("Savon nettoyant pour peaux grasses et mixtes"),
        Product::new("6", "GLUTATHIONE SOAP", 50.00)
            .with_rating(4.4, 198)
            .with_image(image("glutathione_soap"))
            .with_category("cleanser")
            .with_skin_types(&["all"])
            .with_description("Savon au glutathione pour un teint éclatant"),
        Product::new("7", "PERFECTLY BODY LOTION", 50.00)
            .with_rating(4.7, 267)
            .with_image(image("perfectly_body_lotion"))
            .with_category("body")
            .with_skin_types(&["dry", "normal"])
            .with_description("Lotion corporelle hydratante pour peau douce"),
        Product::new("8", "GLUTATHIONE COLLAGEN", 289.00)
            .on_sale_from(320.00)
            .with_rating(4.8, 156)
            .with_image(image("glutathione_collagen"))
            .with_badge("PROMO")
            .with_category("supplement")
            .with_skin_types(&["mature"])
            .with_description("Complément anti-âge au glutathione et collagène"),
        Product::new("9", "RETINOL GLUTATHIONE CREAM", 234.00)
            .with_rating(4.6, 89)
            .with_image(image("retinol_glutathione_cream"))
            .with_category("moisturizer")
            .with_skin_types(&["mature", "combination"])
            .with_description("Crème anti-âge au rétinol et glutathione"),
        Product::new("10", "PERFECTLY OIL", 45.00)
            .with_rating(4.5, 134)
            .with_image(image("perfectly_oil"))
            .with_category("oil")
            .with_skin_types(&["dry", "normal"])
            .with_description("Huile nourrissante pour visage et corps"),
        Product::new("11", "PERFECTLY FACE SERUM", 45.00)
            .with_rating(4.7, 203)
            .with_image(image("perfectly_face_serum"))
            .with_category("serum")
            .with_skin_types(&["all"])
            .with_description("Sérum hydratant et réparateur pour le visage"),
        Product::new("12", "GLUTATHIONE VITAMIN C LOTION", 156.00)
            .with_rating(4.6, 178)
            .with_image(image("glutathione_vitamin_c_lotion"))
            .with_category("moisturizer")
            .with_skin_types(&["normal", "combination"])
            .with_description("Lotion éclat au glutathione et vitamine C"),
        Product::new("14", "GAMME COMPLETE PERFECTLY", 250.00)
            .on_sale_from(300.00)
            .with_rating(4.9, 89)
            .with_image(image("perfectly_face_cream"))
            .with_badge("BUNDLE")
            .with_category("bundle")
            .with_skin_types(&["all"])
            .with_description("Gamme complète de soins Perfectly - Économisez 50$ CAD"),
    ]
}
