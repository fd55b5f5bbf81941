// src/steps/blocks.rs

//! Deterministic content blocks shared by the page steps.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::content::Product;

const DEFAULT_CURRENCY: &str = "₹";

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is a valid regex"));

/// `"<name> - <concentration> for <skin types> skin"`.
pub fn product_summary(product: &Product) -> String {
    format!(
        "{} - {} for {} skin",
        product.name,
        product.concentration,
        product.skin_type.join(", ")
    )
}

/// Price gap between two products, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceDifference {
    pub difference: String,
    pub percentage: String,
}

impl PriceDifference {
    fn unavailable() -> Self {
        Self {
            difference: "N/A".to_string(),
            percentage: "N/A".to_string(),
        }
    }
}

/// Absolute difference and percentage relative to `price_a`.
///
/// The currency prefix of `price_a` is reused, defaulting to `₹` for bare
/// numbers. If either price has no number in it, both fields are `N/A`.
pub fn price_difference(price_a: &str, price_b: &str) -> PriceDifference {
    let (Some(a), Some(b)) = (parse_amount(price_a), parse_amount(price_b)) else {
        return PriceDifference::unavailable();
    };

    let diff = (b - a).abs();
    let percentage = if a == 0.0 {
        "N/A".to_string()
    } else {
        format!("{:.1}%", diff / a * 100.0)
    };

    PriceDifference {
        difference: format!("{}{}", currency_prefix(price_a), format_amount(diff)),
        percentage,
    }
}

fn parse_amount(price: &str) -> Option<f64> {
    let digits = price.replace(',', "");
    NUMBER_RE
        .find(&digits)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn currency_prefix(price: &str) -> &str {
    let prefix = price
        .find(|c: char| c.is_ascii_digit())
        .map(|idx| price[..idx].trim())
        .unwrap_or_default();
    if prefix.is_empty() {
        DEFAULT_CURRENCY
    } else {
        prefix
    }
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

/// Items of `a` that also appear in `b`, compared case-insensitively, in
/// the order of `a`.
pub fn common_items(a: &[String], b: &[String]) -> Vec<String> {
    let other: HashSet<String> = b.iter().map(|s| s.to_lowercase()).collect();
    dedup_filter(a, |key| other.contains(key))
}

/// Items of `a` that do not appear in `b`, compared case-insensitively.
pub fn unique_items(a: &[String], b: &[String]) -> Vec<String> {
    let other: HashSet<String> = b.iter().map(|s| s.to_lowercase()).collect();
    dedup_filter(a, |key| !other.contains(key))
}

fn dedup_filter(items: &[String], keep: impl Fn(&str) -> bool) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| {
            let key = item.to_lowercase();
            keep(&key) && seen.insert(key)
        })
        .cloned()
        .collect()
}

pub fn common_ingredients(a: &Product, b: &Product) -> Vec<String> {
    common_items(&a.key_ingredients, &b.key_ingredients)
}

pub fn unique_ingredients(a: &Product, b: &Product) -> Vec<String> {
    unique_items(&a.key_ingredients, &b.key_ingredients)
}
