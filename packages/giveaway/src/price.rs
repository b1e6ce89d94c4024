//! Direct price extraction from raw text.
//!
//! A Euro amount stated in the image text makes the appraiser model call
//! unnecessary; the pipeline matches it here first.

use std::sync::LazyLock;

use regex::Regex;

// 1-5 digits, optional 2-decimal fraction (comma or period), then "€".
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,5}(?:[.,]\d{1,2})?)\s*€").expect("valid price regex")
});

/// Match a Euro-denominated amount in the text.
///
/// Returns the amount with the decimal comma normalized to a period and the
/// "€" suffix reattached, e.g. "45,50 €" becomes "45.50€".
pub fn extract_price(raw_text: &str) -> Option<String> {
    let caps = PRICE_RE.captures(raw_text)?;
    Some(format!("{}€", caps[1].replace(',', ".")))
}
