//! Product name extraction from URL paths.
//!
//! A product page URL (or an image `src`) usually carries a human-readable
//! name somewhere in its path. [`extract_product_name`] runs an ordered cascade
//! of rules over the path segments and cleans whatever the first matching rule
//! produced:
//!
//! 1. marketplace marker: `/<name>/dp/<id>` or `/<name>/p/<id>`
//! 2. slug: first segment with a hyphen and a digit, e.g. `red-shoes-42.html`
//! 3. fallback: longest hyphenated segment
//!
//! Extraction is pure and never fails; unusable input yields `""`.

mod path;
mod rules;

pub use path::path_segments;
pub use rules::{longest_hyphenated, marketplace_id, slug, NameRule, NAME_RULES};

/// Derives a cleaned product name from a URL or path fragment.
pub fn extract_product_name(url: &str) -> String {
    let segments = path_segments(url);
    let raw = NAME_RULES
        .iter()
        .find_map(|rule| {
            let name = (rule.apply)(&segments)?;
            tracing::trace!(rule = rule.name, raw = %name, "name rule matched");
            Some(name)
        })
        .unwrap_or_default();
    cleanup(&raw)
}

/// Keeps alphanumerics, hyphens and spaces, turns hyphens into spaces and
/// trims. Idempotent.
pub fn cleanup(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == ' ')
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();
    kept.trim().to_string()
}
