//! Best Sellers Rank and first-category extraction.
//!
//! The site renders rank information in two structurally different layouts
//! depending on product category: a row of the item-details table, or a
//! free-text line in the detail-bullets block. The two locations are tried
//! in that fixed order; the first one whose anchor text is present wins,
//! and its text blob feeds both sub-parsers. Each sub-field independently
//! degrades to `None` when its own pattern misses.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::selectors::product as sel;

/// Anchor text present in both rank layouts.
const RANK_ANCHOR: &str = "Best Sellers Rank";

static BSR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([\d,]+)").expect("valid regex"));

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"in\s+([A-Za-z\s&]+)\s*(?:\(|$)").expect("valid regex"));

/// Extracts `(rank, category)` from a parsed product page, trying the
/// item-details table first and the detail-bullets block second.
/// `(None, None)` when neither anchor is found. Takes the parsed document
/// so the product-page parser avoids a second parse.
pub(crate) fn extract_from_document(doc: &Html) -> (Option<String>, Option<String>) {
    match details_table_blob(doc).or_else(|| detail_bullets_blob(doc)) {
        Some(blob) => (bsr_number(&blob), first_category(&blob)),
        None => (None, None),
    }
}

/// Attempt one: the `Best Sellers Rank` row of the item-details table.
/// The blob is the text of the `td` following the matching `th`.
fn details_table_blob(doc: &Html) -> Option<String> {
    let th = doc
        .select(&sel::DETAILS_TH)
        .find(|th| element_text(*th).contains(RANK_ANCHOR))?;
    let td = th.next_siblings().find_map(ElementRef::wrap)?;
    Some(element_text(td))
}

/// Attempt two: the span mentioning the anchor inside the detail-bullets
/// block; the blob is its parent's full text.
fn detail_bullets_blob(doc: &Html) -> Option<String> {
    let span = doc
        .select(&sel::DETAIL_BULLETS_SPAN)
        .find(|span| element_text(*span).contains(RANK_ANCHOR))?;
    let parent = span.parent().and_then(ElementRef::wrap)?;
    Some(element_text(parent))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

/// The first run of digits (with optional thousands separators) after a
/// `#` marker.
fn bsr_number(blob: &str) -> Option<String> {
    BSR_RE
        .captures(blob)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// The text following the word `in`, up to the next parenthesis or end of
/// string, trimmed.
fn first_category(blob: &str) -> Option<String> {
    CATEGORY_RE
        .captures(blob)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
}
