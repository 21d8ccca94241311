//! Input spreadsheet reading.
//!
//! The input is a CSV with the named columns `upc_code`, `zoro_no`, and
//! `sales_price`; extra columns are ignored. A missing file is the one
//! fatal input condition — there is nothing to crawl.

use std::path::Path;

use upcwatch_core::InputRow;

use crate::error::StoreError;

/// Reads all input rows, in file order.
///
/// # Errors
///
/// - [`StoreError::InputMissing`] when the file does not exist.
/// - [`StoreError::Csv`] when the file cannot be read or a row fails to
///   deserialize (missing named columns).
pub fn read_input_rows(path: &Path) -> Result<Vec<InputRow>, StoreError> {
    if !path.exists() {
        return Err(StoreError::InputMissing {
            path: path.to_owned(),
        });
    }

    let mut reader = csv::Reader::from_path(path).map_err(|source| StoreError::Csv {
        path: path.to_owned(),
        source,
    })?;

    let mut rows = Vec::new();
    for result in reader.deserialize::<InputRow>() {
        let row = result.map_err(|source| StoreError::Csv {
            path: path.to_owned(),
            source,
        })?;
        rows.push(row);
    }

    tracing::info!(path = %path.display(), rows = rows.len(), "input rows loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("upcwatch-input-{tag}-{}-{nanos}.csv", std::process::id()))
    }

    fn write_file(path: &Path, contents: &str) {
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn reads_named_columns_preserving_leading_zeros() {
        let path = temp_path("basic");
        write_file(
            &path,
            "upc_code,zoro_no,sales_price\n087302660521,G123,28.52\n12345,G456,60\n",
        );
        let rows = read_input_rows(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].upc_code, "087302660521");
        assert_eq!(rows[0].zoro_no, "G123");
        assert_eq!(rows[0].sales_price, "28.52");
        assert_eq!(rows[1].padded_upc(), "000000012345");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let path = temp_path("extra");
        write_file(
            &path,
            "upc_code,zoro_no,sales_price,notes\n12345,G1,9.99,ignore me\n",
        );
        let rows = read_input_rows(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let path = temp_path("missing");
        let result = read_input_rows(&path);
        assert!(matches!(result, Err(StoreError::InputMissing { .. })));
    }

    #[test]
    fn missing_named_column_is_an_error() {
        let path = temp_path("badheader");
        write_file(&path, "upc,ref,price\n1,2,3\n");
        let result = read_input_rows(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(StoreError::Csv { .. })));
    }
}
