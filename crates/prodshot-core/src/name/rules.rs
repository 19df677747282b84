//! The individual rules of the product-name cascade.
//!
//! Each rule looks at the full list of path segments and either produces a raw
//! (uncleaned) name or declines. Rules do not know about each other; ordering
//! lives in [`NAME_RULES`].

/// A named rule of the cascade.
#[derive(Clone, Copy)]
pub struct NameRule {
    pub name: &'static str,
    pub apply: fn(&[String]) -> Option<String>,
}

/// Rules in priority order. The first one returning `Some` wins.
pub const NAME_RULES: &[NameRule] = &[
    NameRule {
        name: "marketplace-id",
        apply: marketplace_id,
    },
    NameRule {
        name: "slug",
        apply: slug,
    },
    NameRule {
        name: "longest-hyphenated",
        apply: longest_hyphenated,
    },
];

/// Segments that introduce a product identifier on catalog sites.
const MARKETPLACE_MARKERS: &[&str] = &["dp", "p"];

/// `/<name>/dp/<id>`: the segment right before the first marker that is not
/// at the start of the path.
pub fn marketplace_id(segments: &[String]) -> Option<String> {
    segments
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, s)| MARKETPLACE_MARKERS.contains(&s.as_str()))
        .map(|(i, _)| segments[i - 1].clone())
}

/// First segment containing both a hyphen and a digit, with its extension
/// and trailing numeric tokens (sizes, SKUs) removed.
pub fn slug(segments: &[String]) -> Option<String> {
    let segment = segments
        .iter()
        .find(|s| s.contains('-') && s.chars().any(|c| c.is_ascii_digit()))?;

    let stem = segment.rsplit_once('.').map_or(segment.as_str(), |(s, _)| s);
    let mut tokens: Vec<&str> = stem.split('-').collect();
    while tokens.last().is_some_and(|t| is_numeric_token(t)) {
        tokens.pop();
    }

    let joined = tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

/// Longest hyphenated segment that is not a bare uppercase/digit code.
/// Ties keep the earliest segment.
pub fn longest_hyphenated(segments: &[String]) -> Option<String> {
    let mut best: Option<&String> = None;
    for s in segments
        .iter()
        .filter(|s| s.contains('-') && !is_upper_alnum_code(s))
    {
        if best.map_or(true, |b| s.chars().count() > b.chars().count()) {
            best = Some(s);
        }
    }
    best.cloned()
}

fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn is_upper_alnum_code(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
