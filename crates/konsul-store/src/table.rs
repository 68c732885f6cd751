//! In-memory regulation table loaded from the extractor's CSV output.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use konsul_core::{RegulationRecord, SearchQuery};
use serde::Deserialize;
use tracing::info;

use crate::StoreError;

/// Raw CSV row as written by the extractor.
///
/// Headers are the extractor's: `Nomor`, `Tentang`, `Jenis`, `Status_Text`,
/// `Link`. The last two are frequently blank and may be missing entirely in
/// older exports.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Nomor")]
    nomor: String,
    #[serde(rename = "Tentang")]
    tentang: String,
    #[serde(rename = "Jenis")]
    jenis: String,
    #[serde(rename = "Status_Text", default)]
    status: Option<String>,
    #[serde(rename = "Link", default)]
    link: Option<String>,
}

impl RawRow {
    fn into_record(self) -> RegulationRecord {
        let status = self.status.filter(|s| !s.trim().is_empty());
        RegulationRecord::new(
            self.nomor,
            self.tentang,
            self.jenis,
            status,
            self.link.unwrap_or_default(),
        )
    }
}

/// The regulation table: loaded once per process, read-only for the session.
///
/// Rows keep the file order of the CSV; search results preserve it. Reloading
/// after the extractor rewrites the file requires a process restart.
pub struct RegulationStore {
    records: Vec<RegulationRecord>,
}

impl RegulationStore {
    /// Load the table from the extractor's CSV file.
    ///
    /// A missing file is a distinct error so the front-end can tell the user
    /// to run the extractor first instead of showing a parse failure.
    pub fn from_csv_path(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::SourceMissing(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let store = Self::from_reader(file)?;
        info!(count = store.len(), path = %path.display(), "loaded regulation table");
        Ok(store)
    }

    /// Load the table from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for row in csv_reader.deserialize() {
            let raw: RawRow = row?;
            records.push(raw.into_record());
        }
        Ok(Self { records })
    }

    /// Build a store from already-constructed records.
    pub fn from_records(records: Vec<RegulationRecord>) -> Self {
        Self { records }
    }

    /// Keyword search; see [`crate::search`] for the two-pass semantics.
    pub fn search(&self, query: &SearchQuery, top_k: usize) -> Vec<RegulationRecord> {
        crate::search::search(&self.records, query, top_k)
    }

    pub fn records(&self) -> &[RegulationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
