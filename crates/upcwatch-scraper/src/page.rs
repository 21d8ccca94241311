//! Page-level checks shared by search and product pages.

use scraper::Html;

use crate::selectors;

/// Title prefix of the site's anti-automation interstitial.
const BLOCKED_TITLE_PREFIX: &str = "Sorry!";

/// Extracts the `<title>` text of a page, trimmed.
#[must_use]
pub fn page_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    doc.select(&selectors::PAGE_TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
}

/// Whether the page is the blocking interstitial rather than real content.
///
/// The site serves the interstitial with a 200 status, so status codes are
/// useless here; the title prefix is the signature.
#[must_use]
pub fn is_blocked(html: &str) -> bool {
    page_title(html).is_some_and(|t| t.starts_with(BLOCKED_TITLE_PREFIX))
}
