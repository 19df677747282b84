//! Extract image candidates from a fetched product page.

use scraper::{Html, Selector};
use url::Url;

use crate::select::ImageCandidate;

/// Every usable `<img>` in document order.
///
/// `src` is resolved against `page_url`. Images without a `src`, or whose
/// resolved URL is not http(s) (inline `data:` placeholders and the like),
/// are skipped since they cannot be downloaded.
pub fn image_candidates(html: &str, page_url: &Url) -> Vec<ImageCandidate> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("img") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|img| {
            let element = img.value();
            let src = element.attr("src").map(str::trim).filter(|s| !s.is_empty())?;
            let resolved = match page_url.join(src) {
                Ok(u) => u,
                Err(e) => {
                    tracing::debug!(src, error = %e, "skipping unresolvable img src");
                    return None;
                }
            };
            if !matches!(resolved.scheme(), "http" | "https") {
                tracing::trace!(scheme = resolved.scheme(), "skipping non-http img");
                return None;
            }
            Some(ImageCandidate::new(resolved.as_str(), element.attr("alt")))
        })
        .collect()
}
