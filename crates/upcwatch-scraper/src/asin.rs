//! ASIN extraction from product URLs.

use std::sync::LazyLock;

use regex::Regex;

static ASIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/dp/([A-Z0-9]{10})").expect("valid regex"));

/// Extracts the 10-character product code following the `/dp/` path segment.
///
/// Returns `None` on URLs without one; record assembly maps that to the
/// `"N/A"` sentinel. Never panics, whatever the input looks like.
#[must_use]
pub fn extract_asin(url: &str) -> Option<&str> {
    ASIN_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
