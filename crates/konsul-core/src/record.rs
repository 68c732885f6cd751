//! Regulation records and the derived text they are matched on.

use serde::Serialize;

/// Placeholder stored in `link` when a record has no published download URL.
pub const NO_LINK: &str = "#";

/// One regulation from the cleaned extraction output.
///
/// `search_text` is derived once at construction and never mutated afterwards;
/// the search pass lower-cases it at match time, so the stored form keeps the
/// original casing for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegulationRecord {
    /// Regulation number, e.g. "PMK-190/PMK.05/2012".
    pub nomor: String,
    /// Subject line (the "tentang ..." clause of the title).
    pub tentang: String,
    /// Regulation kind, e.g. "PMK", "PP", "UU".
    pub jenis: String,
    /// Consolidated status text, when the extractor produced one.
    pub status: Option<String>,
    /// Download URL, or [`NO_LINK`] when none was published.
    pub link: String,
    /// "{tentang} {nomor} {jenis}", the only text keyword search looks at.
    pub search_text: String,
}

impl RegulationRecord {
    /// Build a record, deriving `search_text` from the three keyword fields.
    ///
    /// An empty or whitespace-only link is stored as the [`NO_LINK`] sentinel
    /// so downstream rendering never has to special-case a blank URL.
    pub fn new(
        nomor: String,
        tentang: String,
        jenis: String,
        status: Option<String>,
        link: String,
    ) -> Self {
        let link = if link.trim().is_empty() {
            NO_LINK.to_string()
        } else {
            link
        };
        let search_text = format!("{tentang} {nomor} {jenis}");
        Self {
            nomor,
            tentang,
            jenis,
            status,
            link,
            search_text,
        }
    }

    /// Whether the record carries a real download link.
    pub fn has_link(&self) -> bool {
        self.link != NO_LINK
    }
}
