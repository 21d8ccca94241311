//! Price normalization and the reference-price comparison rule.
//!
//! Both functions are pure and never error: a malformed price simply fails
//! to parse downstream and degrades to the sentinel at record assembly.

/// Fixed percentage markup applied to the reference price.
pub const MARKUP_FACTOR: f64 = 1.203;

/// Flat shipping/fee surcharge added to the reference price before the
/// markup, waived for cheaper items.
pub const SURCHARGE: f64 = 5.0;

/// Reference prices above this get the surcharge.
pub const SURCHARGE_THRESHOLD: f64 = 50.0;

/// Cleans a raw scraped price string into a best-effort decimal string.
///
/// Strips whitespace, the currency symbol, and the `UHD` quality marker.
/// A two-line dollars/cents rendering (`"45\n07"`) joins into `"45.07"`;
/// anything else passes through cleaned but otherwise unchanged, parseable
/// or not. Idempotent on already-clean decimal strings.
#[must_use]
pub fn normalize_price(raw: &str) -> String {
    let cleaned = raw.trim().replace('$', "").replace("UHD", "");
    let cleaned = cleaned.trim();

    let parts: Vec<&str> = cleaned.split('\n').collect();
    if let [dollars, cents] = parts.as_slice() {
        format!("{}.{}", dollars.trim(), cents.trim())
    } else {
        cleaned.to_owned()
    }
}

/// Signed difference between an observed price and the adjusted reference
/// price: `observed - reference * 1.203`, with a flat $5 added to the
/// reference before the markup when it exceeds $50.
///
/// Returns `None` when either input does not parse as a number — a valid
/// non-numeric outcome, not an error.
#[must_use]
pub fn price_difference(observed: &str, reference: &str) -> Option<f64> {
    let observed: f64 = observed.trim().parse().ok()?;
    let reference: f64 = reference.trim().parse().ok()?;

    let adjusted = if reference > SURCHARGE_THRESHOLD {
        (reference + SURCHARGE) * MARKUP_FACTOR
    } else {
        reference * MARKUP_FACTOR
    };
    Some(observed - adjusted)
}
