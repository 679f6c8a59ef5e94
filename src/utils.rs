//! Display and validation helpers for storefront pages.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::CurrencyConfig;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]{10,}$").expect("valid phone regex"));
static SLUG_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid slug regex"));
static SLUG_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid slug regex"));
static SLUG_DASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid slug regex"));

/// Formats `amount` with the currency symbol, thousands separators and two
/// decimals, e.g. `$1,234.50`. Negative amounts get a leading minus.
#[must_use]
pub fn format_price(amount: f64, currency: &CurrencyConfig) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{}{grouped}.{:02}", currency.symbol, cents % 100)
}

/// Rounded discount percentage, 0 when there is no discount.
#[must_use]
pub fn discount_percentage(original_price: f64, sale_price: f64) -> u32 {
    if original_price <= 0.0 || sale_price >= original_price {
        return 0;
    }
    (((original_price - sale_price) / original_price) * 100.0).round() as u32
}

/// `"NN% OFF"`.
#[must_use]
pub fn format_discount(percentage: u32) -> String {
    format!("{percentage}% OFF")
}

/// Five star slots; a fractional rating fills the next star.
#[must_use]
pub fn star_rating(rating: f64) -> [bool; 5] {
    let full = rating.floor().max(0.0) as usize;
    let has_half = rating.fract() != 0.0;
    std::array::from_fn(|i| i < full || (i == full && has_half))
}

/// URL slug: lower-case, punctuation dropped, whitespace runs become `-`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = SLUG_STRIP_RE.replace_all(&lower, "");
    let dashed = SLUG_SPACE_RE.replace_all(&stripped, "-");
    SLUG_DASH_RE.replace_all(&dashed, "-").trim().to_string()
}

/// Upper-cases the first letter of each word.
#[must_use]
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

/// Cuts `text` to `max_chars` characters and appends `...` when it was longer.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// Loose email shape check.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least ten digits, spaces, dashes or parentheses, optional leading `+`.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}
