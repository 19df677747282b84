//! Path segment extraction from full URLs and bare `src` fragments.

/// Splits the path of `input` on `/`, drops empty segments and
/// percent-decodes each one.
///
/// Absolute URLs go through the `url` crate. Anything else (relative `src`
/// values, protocol-relative `//host/...`, junk) is split lexically after
/// dropping the fragment and query, so this never fails.
pub fn path_segments(input: &str) -> Vec<String> {
    let path = match url::Url::parse(input) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => lexical_path(input).to_string(),
    };
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .collect()
}

/// `Url::path` is always percent-encoded; `src` attributes may be too.
/// Invalid UTF-8 after decoding becomes U+FFFD.
fn decode_segment(segment: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(segment.as_bytes())).into_owned()
}

/// Path component of a string that is not an absolute URL.
fn lexical_path(input: &str) -> &str {
    let end = input.find(['?', '#']).unwrap_or(input.len());
    let rest = &input[..end];
    match rest.strip_prefix("//") {
        // Protocol-relative: skip the authority.
        Some(after) => after.find('/').map_or("", |i| &after[i..]),
        None => rest,
    }
}
