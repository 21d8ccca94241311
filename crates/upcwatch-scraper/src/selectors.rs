//! CSS selectors for the target site's search and product pages.
//!
//! All selectors used by the parsers live here so that a site markup change
//! is a one-file fix. Several anchors on the site are text-based (the
//! no-results marker, the Best Sellers Rank label, the `Buy` button); CSS
//! cannot match on text, so those selectors pick the structural candidates
//! and the parsers filter by text content.

use std::sync::LazyLock;

use scraper::Selector;

fn parse(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

pub(crate) static PAGE_TITLE: LazyLock<Selector> = LazyLock::new(|| parse("title"));

pub(crate) mod search {
    use super::{parse, LazyLock, Selector};

    /// Candidate spans for the "No results for" marker.
    pub(crate) static NO_RESULTS_SPAN: LazyLock<Selector> = LazyLock::new(|| parse("span"));

    /// Result-card container on the first search page.
    pub(crate) static RESULT_CARD: LazyLock<Selector> =
        LazyLock::new(|| parse("[class*='puis-card-border']"));

    /// Product link inside a result card.
    pub(crate) static CARD_LINK: LazyLock<Selector> = LazyLock::new(|| parse("h2 a"));
}

pub(crate) mod product {
    use super::{parse, LazyLock, Selector};

    /// Buy-box buying-options summary — the primary price location.
    pub(crate) static BUYBOX_SUMMARY: LazyLock<Selector> =
        LazyLock::new(|| parse("div.a-section.a-spacing-none.aok-align-center.aok-relative"));

    /// Ordered price fallback locations, tried only when the buy-box
    /// summary is absent. Order matters: first parseable value wins.
    pub(crate) static PRICE_SPACING_TOP_MINI: LazyLock<Selector> =
        LazyLock::new(|| parse("div.a-spacing-top-mini > span"));
    pub(crate) static PRICE_TO_PAY: LazyLock<Selector> = LazyLock::new(|| {
        parse("span.a-price.aok-align-center.reinventPricePriceToPayMargin.priceToPay")
    });
    pub(crate) static PRICE_SPACING_MICRO: LazyLock<Selector> =
        LazyLock::new(|| parse("div.a-section.a-spacing-micro > span"));
    pub(crate) static PRICE_ALIGN_CENTER: LazyLock<Selector> = LazyLock::new(|| {
        parse("div.a-section.a-spacing-none.aok-align-center.aok-relative > span")
    });
    pub(crate) static KINDLE_PRICE: LazyLock<Selector> = LazyLock::new(|| parse("#kindle-price"));
    pub(crate) static SLOT_PRICE: LazyLock<Selector> =
        LazyLock::new(|| parse("span.slot-price > span"));
    /// Candidate spans for the text-based `Buy` strategy (video purchases).
    pub(crate) static BUY_SPAN: LazyLock<Selector> = LazyLock::new(|| parse("span"));
    /// Prime Video purchase button price label.
    pub(crate) static TVOD_PURCHASE: LazyLock<Selector> =
        LazyLock::new(|| parse("#tvod-btn-ab-movie-hd-tvod_purchase [class*='_36qUej']"));

    /// Seller name in the offer display feature.
    pub(crate) static SELLER: LazyLock<Selector> = LazyLock::new(|| {
        parse("div.offer-display-feature-text span.offer-display-feature-text-message")
    });

    /// Header cells of the item-details table (rank attempt one); filtered
    /// by text for the Best Sellers Rank row.
    pub(crate) static DETAILS_TH: LazyLock<Selector> = LazyLock::new(|| parse("th"));

    /// Spans inside the detail-bullets block (rank attempt two).
    pub(crate) static DETAIL_BULLETS_SPAN: LazyLock<Selector> =
        LazyLock::new(|| parse("#detailBulletsWrapper_feature_div span"));
}
