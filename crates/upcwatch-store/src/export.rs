//! Flat CSV export of the result store.
//!
//! The column set mirrors the JSON keys, with one deliberate difference:
//! the URL column header is upper-cased (`URL` vs the JSON's `url`).

use std::path::Path;

use upcwatch_core::{PriceDelta, ResultRecord, NOT_AVAILABLE};

use crate::error::StoreError;
use crate::results::ResultStore;

pub const CSV_HEADERS: [&str; 9] = [
    "UPC",
    "Zoro_No",
    "URL",
    "ASIN",
    "BSR",
    "Price",
    "Price difference",
    "First Category",
    "Seller",
];

/// Writes every stored record to `out_path` as CSV, creating parent
/// directories as needed. Returns the number of data rows written.
///
/// # Errors
///
/// [`StoreError::Io`] / [`StoreError::Csv`] when the destination cannot be
/// created or written.
pub fn export_csv(store: &ResultStore, out_path: &Path) -> Result<usize, StoreError> {
    let records = store.load();

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: out_path.to_owned(),
                source,
            })?;
        }
    }

    let mut writer = csv::Writer::from_path(out_path).map_err(|source| StoreError::Csv {
        path: out_path.to_owned(),
        source,
    })?;

    writer
        .write_record(CSV_HEADERS)
        .map_err(|source| StoreError::Csv {
            path: out_path.to_owned(),
            source,
        })?;

    for record in &records {
        writer
            .write_record(csv_row(record))
            .map_err(|source| StoreError::Csv {
                path: out_path.to_owned(),
                source,
            })?;
    }

    writer.flush().map_err(|source| StoreError::Io {
        path: out_path.to_owned(),
        source,
    })?;

    tracing::info!(path = %out_path.display(), rows = records.len(), "CSV export written");
    Ok(records.len())
}

fn csv_row(record: &ResultRecord) -> [String; 9] {
    let difference = match &record.price_difference {
        PriceDelta::Value(v) => v.to_string(),
        PriceDelta::NotAvailable => NOT_AVAILABLE.to_owned(),
    };
    [
        record.upc.clone(),
        record.zoro_no.clone(),
        record.url.clone(),
        record.asin.clone(),
        record.bsr.clone(),
        record.price.clone(),
        difference,
        record.first_category.clone(),
        record.seller.clone(),
    ]
}
