//! Image selection: score scraped images against the product name.

use crate::name::extract_product_name;
use crate::similarity::similarity;

/// Minimum similarity for an image to count as a match.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.5;

/// One `<img>` found on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCandidate {
    /// Absolute image URL.
    pub url: String,
    /// Product name derived from the image URL path, lowercased.
    pub name: String,
    /// `alt` text, lowercased; empty when absent.
    pub alt: String,
}

impl ImageCandidate {
    pub fn new(url: impl Into<String>, alt: Option<&str>) -> Self {
        let url = url.into();
        Self {
            name: extract_product_name(&url).to_lowercase(),
            alt: alt.unwrap_or_default().to_lowercase(),
            url,
        }
    }
}

/// Which attribute produced an image's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    Alt,
    Src,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredImage {
    pub candidate: ImageCandidate,
    pub score: f64,
    pub source: ScoreSource,
}

/// Scores one candidate. Alt text wins whenever it clears the threshold; the
/// filename-derived name is only consulted otherwise. The two are never blended.
pub fn score_candidate(
    product_name: &str,
    candidate: &ImageCandidate,
    threshold: f64,
) -> Option<(f64, ScoreSource)> {
    let score_alt = similarity(product_name, &candidate.alt);
    if score_alt > threshold {
        return Some((score_alt, ScoreSource::Alt));
    }
    let score_src = similarity(product_name, &candidate.name);
    if score_src > threshold {
        return Some((score_src, ScoreSource::Src));
    }
    None
}

/// Picks the highest scoring candidate; the earliest one wins ties.
/// Returns `None` when nothing reaches `threshold`.
pub fn select_best<I>(product_name: &str, candidates: I, threshold: f64) -> Option<ScoredImage>
where
    I: IntoIterator<Item = ImageCandidate>,
{
    let mut best: Option<ScoredImage> = None;
    for candidate in candidates {
        let Some((score, source)) = score_candidate(product_name, &candidate, threshold) else {
            tracing::trace!(url = %candidate.url, "image disqualified");
            continue;
        };
        tracing::debug!(url = %candidate.url, score, ?source, "image scored");
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(ScoredImage {
                candidate,
                score,
                source,
            });
        }
    }
    best.filter(|b| b.score >= threshold)
}
