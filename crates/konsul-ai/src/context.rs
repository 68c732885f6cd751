//! Context blocks and the system prompt sent with every completion.

use konsul_core::RegulationRecord;

/// Marker used as the whole database block when search found nothing.
pub const NOT_FOUND_MARKER: &str = "TIDAK DITEMUKAN DI DATABASE PERATURAN.";

/// Marker shown in place of a download link for records without one.
pub const NO_LINK_MARKER: &str = "(tautan tidak tersedia)";

/// Longest uploaded-text prefix forwarded to the model, in characters.
pub const DEFAULT_UPLOAD_CAP: usize = 15_000;

const UPLOAD_FENCE: &str = "---------------------------------------------------";

/// Render matched records as the database reference block.
///
/// One line per record in result order. Records without a link get an
/// explicit marker rather than an empty fragment, so the model never cites
/// a dangling URL.
pub fn compose_regulation_context(records: &[RegulationRecord]) -> String {
    if records.is_empty() {
        return NOT_FOUND_MARKER.to_string();
    }
    let mut block = String::from("REFERENSI DARI DATABASE PERATURAN:\n");
    for rec in records {
        let status = rec.status.as_deref().unwrap_or("-");
        let link = if rec.has_link() {
            format!("[Download]({})", rec.link)
        } else {
            NO_LINK_MARKER.to_string()
        };
        block.push_str(&format!(
            "- {} tentang {} | Status: {} {}\n",
            rec.nomor, rec.tentang, status, link
        ));
    }
    block
}

/// Wrap uploaded text in a fenced block, cut to at most `cap` characters.
///
/// The cut counts characters, not bytes, so multi-byte text cannot be split
/// mid-character.
pub fn compose_upload_context(text: &str, cap: usize) -> String {
    let prefix: String = text.chars().take(cap).collect();
    format!("USER MENGUPLOAD DOKUMEN BERIKUT:\n{UPLOAD_FENCE}\n{prefix}\n{UPLOAD_FENCE}\n")
}

/// The full system prompt: consultant role, data sources, instructions.
///
/// `upload_context` is empty when no document was uploaded; the section
/// header still appears so the prompt shape stays stable across turns.
pub fn build_system_prompt(db_context: &str, upload_context: &str) -> String {
    format!(
        "Kamu adalah Konsultan Hukum Kementerian Keuangan.\n\
         \n\
         SUMBER DATA:\n\
         1. Database Peraturan: {db_context}\n\
         2. Dokumen Upload User: {upload_context}\n\
         \n\
         INSTRUKSI:\n\
         - Jawab pertanyaan user dengan mengaitkan Database dan Dokumen (jika ada).\n\
         - Jika user minta ringkasan file, ringkaslah.\n\
         - Tetap sopan dan profesional.\n"
    )
}
