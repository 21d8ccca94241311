//! Resume cursor: where to pick up in the input sequence after a restart.

use upcwatch_core::InputRow;

/// Zero-padded width shared with [`InputRow::padded_upc`].
const UPC_WIDTH: usize = upcwatch_core::records::UPC_WIDTH;

/// Index of the first unprocessed input row.
///
/// With no persisted last UPC, processing starts at row 0. Otherwise the
/// row whose zero-padded UPC matches the (also zero-padded) last persisted
/// UPC marks the resume point, and the next row is returned. A last UPC
/// that matches no row falls back to 0 — a full replay, absorbed by the
/// result store's dedup rather than treated as an error.
#[must_use]
pub fn resume_index(rows: &[InputRow], last_upc: Option<&str>) -> usize {
    let Some(last) = last_upc else {
        return 0;
    };
    let needle = format!("{:0>UPC_WIDTH$}", last.trim());

    match rows.iter().position(|row| row.padded_upc() == needle) {
        Some(idx) => idx + 1,
        None => {
            tracing::warn!(
                last_upc = %last,
                "last persisted UPC not found in input — replaying from the start"
            );
            0
        }
    }
}
