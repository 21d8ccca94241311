//! Search-results page parsing: the no-results marker and candidate
//! product-link enumeration.

use scraper::Html;

use crate::selectors::search as sel;

/// Exact text of the marker span shown when a search matches nothing.
const NO_RESULTS_MARKER: &str = "No results for";

/// What the first search-results page contains for a UPC.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The explicit no-results marker is present; the caller emits one
    /// synthetic all-sentinel record for the row.
    NoResults,
    /// Candidate product URLs in render order, bounded by whatever the
    /// first page shows (no pagination). May be empty when the page has
    /// neither marker nor result cards; such rows produce no record.
    Candidates(Vec<String>),
}

/// Parses a search-results page.
///
/// Relative card links are resolved against `base_url`.
#[must_use]
pub fn parse_search_page(html: &str, base_url: &str) -> SearchOutcome {
    let doc = Html::parse_document(html);

    if has_no_results_marker(&doc) {
        return SearchOutcome::NoResults;
    }

    let mut urls = Vec::new();
    for card in doc.select(&sel::RESULT_CARD) {
        let Some(href) = card
            .select(&sel::CARD_LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            tracing::debug!("result card without a product link — skipping");
            continue;
        };
        urls.push(absolutize(href, base_url));
    }
    SearchOutcome::Candidates(urls)
}

fn has_no_results_marker(doc: &Html) -> bool {
    doc.select(&sel::NO_RESULTS_SPAN)
        .any(|span| span.text().collect::<String>().trim() == NO_RESULTS_MARKER)
}

fn absolutize(href: &str, base_url: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_owned()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}
