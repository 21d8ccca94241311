//! Product-page extraction: price (ordered fallback strategies), seller,
//! and rank/category.
//!
//! Every field is independently best-effort. A missing field is `None` —
//! record assembly turns that into the `"N/A"` sentinel — and nothing here
//! can abort a candidate.

use scraper::{ElementRef, Html};

use crate::price::normalize_price;
use crate::rank;
use crate::selectors::product as sel;

/// Fields pulled from one candidate product page.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProductExtract {
    /// Normalized price string. Parseable when a fallback strategy found
    /// it; the primary buy-box text is kept even when it does not parse.
    pub price: Option<String>,
    pub seller: Option<String>,
    pub bsr: Option<String>,
    pub category: Option<String>,
}

/// A named price-location strategy: a pure function from page to raw text.
struct PriceStrategy {
    name: &'static str,
    locate: fn(&Html) -> Option<String>,
}

/// Fallback locations tried in order when the buy-box summary is absent,
/// stopping at the first value that parses as a number.
const FALLBACK_STRATEGIES: &[PriceStrategy] = &[
    PriceStrategy {
        name: "spacing-top-mini",
        locate: |doc| first_text(doc, &sel::PRICE_SPACING_TOP_MINI),
    },
    PriceStrategy {
        name: "price-to-pay",
        locate: |doc| first_text(doc, &sel::PRICE_TO_PAY),
    },
    PriceStrategy {
        name: "spacing-micro",
        locate: |doc| first_text(doc, &sel::PRICE_SPACING_MICRO),
    },
    PriceStrategy {
        name: "align-center-span",
        locate: |doc| first_text(doc, &sel::PRICE_ALIGN_CENTER),
    },
    PriceStrategy {
        name: "kindle-price",
        locate: |doc| first_text(doc, &sel::KINDLE_PRICE),
    },
    PriceStrategy {
        name: "slot-price",
        locate: |doc| first_text(doc, &sel::SLOT_PRICE),
    },
    PriceStrategy {
        name: "buy-span",
        locate: buy_span_text,
    },
    PriceStrategy {
        name: "tvod-purchase",
        locate: |doc| first_text(doc, &sel::TVOD_PURCHASE),
    },
];

/// Parses one product page into its extractable fields.
#[must_use]
pub fn parse_product_page(html: &str) -> ProductExtract {
    let doc = Html::parse_document(html);

    let price = extract_price(&doc);
    let seller = first_text(&doc, &sel::SELLER);
    let (bsr, category) = rank::extract_from_document(&doc);

    ProductExtract {
        price,
        seller,
        bsr,
        category,
    }
}

/// Price policy: the buy-box buying-options summary is authoritative when
/// present — its normalized text is taken as-is, parseable or not (an
/// unparseable price still lands in the record; only the difference
/// degrades). The fallback chain is stricter: first strategy whose value
/// parses as a number wins.
fn extract_price(doc: &Html) -> Option<String> {
    if let Some(raw) = first_text(doc, &sel::BUYBOX_SUMMARY) {
        let cleaned = normalize_price(&raw);
        if !cleaned.is_empty() {
            tracing::debug!(strategy = "buybox-summary", "price extracted");
            return Some(cleaned);
        }
    }

    for strategy in FALLBACK_STRATEGIES {
        if let Some(raw) = (strategy.locate)(doc) {
            let cleaned = normalize_price(&raw);
            if cleaned.parse::<f64>().is_ok() {
                tracing::debug!(strategy = strategy.name, "price extracted via fallback");
                return Some(cleaned);
            }
        }
    }
    None
}

/// Text of the first element matching `selector`, trimmed; `None` when no
/// element matches or its text is empty.
fn first_text(doc: &Html, selector: &scraper::Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

/// The text-anchored `Buy` strategy for video purchase buttons.
fn buy_span_text(doc: &Html) -> Option<String> {
    doc.select(&sel::BUY_SPAN)
        .map(element_text)
        .find(|t| t.contains("Buy"))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}
