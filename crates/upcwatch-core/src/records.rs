//! Record types shared across the crawl pipeline.
//!
//! ## Field semantics
//!
//! Every extracted field on [`ResultRecord`] is a `String` holding either the
//! scraped value or the literal sentinel [`NOT_AVAILABLE`]. The sentinel is a
//! *valid* outcome ("not determinable"), not an error: extraction functions
//! return `Option<T>` and the sentinel materializes only when a record is
//! assembled.
//!
//! `Price difference` is the one mixed-type field: it persists as a JSON
//! number when both prices parsed, and as the string `"N/A"` otherwise, so
//! [`PriceDelta`] carries custom serde impls instead of a derive.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Sentinel for a field that could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

/// Canonical width of a searchable UPC: zero-padded to 12 digits.
pub const UPC_WIDTH: usize = 12;

/// One row of the input spreadsheet.
///
/// `upc_code` is string-typed to preserve leading zeros; the un-padded form
/// is what gets persisted, while searches use [`InputRow::padded_upc`].
/// `sales_price` stays a string because it is not guaranteed to parse — a
/// non-numeric reference price degrades the price difference to the
/// sentinel rather than failing the row.
#[derive(Debug, Clone, Deserialize)]
pub struct InputRow {
    pub upc_code: String,
    pub zoro_no: String,
    pub sales_price: String,
}

impl InputRow {
    /// The zero-padded 12-digit form of the UPC used for site searches.
    #[must_use]
    pub fn padded_upc(&self) -> String {
        let trimmed = self.upc_code.trim();
        format!("{trimmed:0>UPC_WIDTH$}")
    }
}

/// Signed observed-minus-adjusted-reference price difference, or the
/// sentinel when either side failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceDelta {
    Value(f64),
    NotAvailable,
}

impl From<Option<f64>> for PriceDelta {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::NotAvailable,
        }
    }
}

impl Serialize for PriceDelta {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for PriceDelta {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        // Any non-numeric text collapses to the sentinel; the store only
        // ever writes "N/A" here, but tolerate hand-edited files.
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Self::Value(v),
            Repr::Text(_) => Self::NotAvailable,
        })
    }
}

/// One persisted crawl result.
///
/// The serde renames pin the exact JSON keys of the result store; the CSV
/// exporter writes the same columns (with `URL` upper-cased).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "UPC")]
    pub upc: String,
    #[serde(rename = "Zoro_No")]
    pub zoro_no: String,
    pub url: String,
    #[serde(rename = "ASIN")]
    pub asin: String,
    #[serde(rename = "BSR")]
    pub bsr: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Price difference")]
    pub price_difference: PriceDelta,
    #[serde(rename = "First Category")]
    pub first_category: String,
    #[serde(rename = "Seller")]
    pub seller: String,
}

impl ResultRecord {
    /// The synthetic record emitted when a search yields no results:
    /// identifiers and the searched URL are real, everything else is the
    /// sentinel.
    #[must_use]
    pub fn no_results(upc: &str, zoro_no: &str, url: &str) -> Self {
        Self {
            upc: upc.to_owned(),
            zoro_no: zoro_no.to_owned(),
            url: url.to_owned(),
            asin: NOT_AVAILABLE.to_owned(),
            bsr: NOT_AVAILABLE.to_owned(),
            price: NOT_AVAILABLE.to_owned(),
            price_difference: PriceDelta::NotAvailable,
            first_category: NOT_AVAILABLE.to_owned(),
            seller: NOT_AVAILABLE.to_owned(),
        }
    }
}
