//! The JSON result store: append-only in spirit, deduplicating on UPC,
//! and doubling as the resume cursor between runs.
//!
//! Each flush is a full read-modify-write cycle: load the existing array,
//! keep only new records whose UPC is not already present, extend, rewrite
//! the whole file. A malformed or missing file is a recoverable condition
//! (the store reads as empty), so a crashed run never wedges the next one.
//! There is no concurrent-writer protection; the crawl is single-process
//! and strictly sequential.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use upcwatch_core::ResultRecord;

use crate::error::StoreError;

pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted collection. Missing file → empty. Present but
    /// unreadable or not valid JSON → logged and treated as empty.
    #[must_use]
    pub fn load(&self) -> Vec<ResultRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "result store unreadable — treating as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "result store is not valid JSON — treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Merges `new_records` into the store, dropping any whose UPC is
    /// already present (first write wins, including within the batch),
    /// and rewrites the file. Returns how many records were actually added.
    ///
    /// Idempotent with respect to UPC: replaying the same batch after a
    /// successful call changes nothing.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] / [`StoreError::Json`] when the rewrite fails.
    pub fn append(&self, new_records: &[ResultRecord]) -> Result<usize, StoreError> {
        let mut records = self.load();
        let mut seen: HashSet<String> = records.iter().map(|r| r.upc.clone()).collect();

        let mut added = 0usize;
        for record in new_records {
            if seen.insert(record.upc.clone()) {
                records.push(record.clone());
                added += 1;
            } else {
                tracing::debug!(upc = %record.upc, "duplicate UPC dropped on append");
            }
        }

        if added > 0 {
            self.write_all(&records)?;
        }
        tracing::info!(
            path = %self.path.display(),
            added,
            total = records.len(),
            "result store flushed"
        );
        Ok(added)
    }

    /// The UPC of the last persisted record, or `None` when the store is
    /// empty or unreadable.
    #[must_use]
    pub fn last_upc(&self) -> Option<String> {
        self.load().last().map(|r| r.upc.clone())
    }

    fn write_all(&self, records: &[ResultRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let json =
            serde_json::to_string_pretty(records).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
