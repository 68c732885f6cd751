//! Keyword search over the regulation table.
//!
//! Two passes share one matcher. The conjunctive pass requires every query
//! token to appear in a record's search text; when it finds nothing and the
//! query has more than one token, a disjunctive fallback runs so partial
//! matches still surface. Tokens are literal case-insensitive substrings —
//! no pattern syntax, no scoring. Results keep table order and are cut to
//! `top_k`.

use konsul_core::{RegulationRecord, SearchQuery};
use tracing::debug;

/// How query tokens combine within one matching pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every token must appear in the record's search text.
    All,
    /// At least one token must appear.
    Any,
}

fn record_matches(record: &RegulationRecord, tokens: &[String], mode: MatchMode) -> bool {
    let haystack = record.search_text.to_lowercase();
    match mode {
        MatchMode::All => tokens.iter().all(|t| haystack.contains(t.as_str())),
        MatchMode::Any => tokens.iter().any(|t| haystack.contains(t.as_str())),
    }
}

fn collect(
    records: &[RegulationRecord],
    tokens: &[String],
    mode: MatchMode,
    top_k: usize,
) -> Vec<RegulationRecord> {
    records
        .iter()
        .filter(|r| record_matches(r, tokens, mode))
        .take(top_k)
        .cloned()
        .collect()
}

/// Run the two-pass keyword search.
///
/// An empty query returns no records: the all-tokens pass would otherwise
/// vacuously match the whole table head, which no caller wants. The fallback
/// never runs for single-token queries — one token that matched nothing
/// conjunctively cannot match anything disjunctively either, and widening a
/// one-word query would only repeat the same empty scan.
pub fn search(
    records: &[RegulationRecord],
    query: &SearchQuery,
    top_k: usize,
) -> Vec<RegulationRecord> {
    if query.is_empty() {
        return Vec::new();
    }
    let tokens = query.tokens();
    let hits = collect(records, tokens, MatchMode::All, top_k);
    if !hits.is_empty() || query.len() <= 1 {
        return hits;
    }
    debug!(
        tokens = tokens.len(),
        "conjunctive pass empty, widening to any-token match"
    );
    collect(records, tokens, MatchMode::Any, top_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(nomor: &str, tentang: &str, jenis: &str) -> RegulationRecord {
        RegulationRecord::new(nomor.into(), tentang.into(), jenis.into(), None, "".into())
    }

    fn table() -> Vec<RegulationRecord> {
        vec![
            rec("PMK-190/PMK.05/2012", "Tata Cara Pembayaran APBN", "PMK"),
            rec("PMK-01/PMK.05/2024", "Uang Makan Bagi Pegawai Negeri Sipil", "PMK"),
            rec("UU-17/2003", "Keuangan Negara", "UU"),
            rec("PP-45/2013", "Tata Cara Pelaksanaan APBN", "PP"),
            rec("PMK-113/PMK.05/2012", "Perjalanan Dinas Dalam Negeri", "PMK"),
        ]
    }

    fn search_all(raw: &str) -> Vec<RegulationRecord> {
        search(&table(), &SearchQuery::parse(raw), 15)
    }

    #[test]
    fn all_tokens_present_matches() {
        let hits = search_all("uang makan");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nomor, "PMK-01/PMK.05/2024");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let hits = search_all("UANG Makan");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn tokens_match_across_fields() {
        // "pmk" comes from jenis, "perjalanan" from tentang.
        let hits = search_all("pmk perjalanan");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nomor, "PMK-113/PMK.05/2012");
    }

    #[test]
    fn single_token_miss_stays_empty() {
        // One token, no hit: the fallback must not run.
        assert!(search_all("cukai").is_empty());
    }

    #[test]
    fn multi_token_miss_widens_to_union() {
        // No record contains both words; two records contain "keuangan",
        // none contains "cukai".
        let hits = search_all("keuangan cukai");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nomor, "UU-17/2003");
    }

    #[test]
    fn fallback_preserves_table_order() {
        // "pembayaran" hits row 0, "dinas" hits row 4; no row has both.
        let hits = search_all("pembayaran dinas");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].nomor, "PMK-190/PMK.05/2012");
        assert_eq!(hits[1].nomor, "PMK-113/PMK.05/2012");
    }

    #[test]
    fn conjunctive_result_suppresses_fallback() {
        // "tata cara" matches rows 0 and 3 conjunctively; the disjunctive
        // union would be larger. Only the conjunctive set may come back.
        let hits = search_all("tata cara");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].nomor, "PMK-190/PMK.05/2012");
        assert_eq!(hits[1].nomor, "PP-45/2013");
    }

    #[test]
    fn truncates_to_top_k_in_table_order() {
        let hits = search(&table(), &SearchQuery::parse("pmk"), 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].nomor, "PMK-190/PMK.05/2012");
        assert_eq!(hits[1].nomor, "PMK-01/PMK.05/2024");
    }

    #[test]
    fn empty_query_returns_nothing() {
        assert!(search_all("").is_empty());
        assert!(search_all("   ").is_empty());
        assert!(search_all("()[]").is_empty());
    }

    #[test]
    fn token_substring_of_nomor_matches() {
        let hits = search_all("190/pmk.05");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].nomor, "PMK-190/PMK.05/2012");
    }

    #[test]
    fn empty_table_always_empty() {
        assert!(search(&[], &SearchQuery::parse("uang makan"), 15).is_empty());
    }

    #[test]
    fn mode_matcher_exact_semantics() {
        let r = rec("PMK-01", "Uang Makan", "PMK");
        let both = vec!["uang".to_string(), "makan".to_string()];
        let one = vec!["uang".to_string(), "cukai".to_string()];
        assert!(record_matches(&r, &both, MatchMode::All));
        assert!(!record_matches(&r, &one, MatchMode::All));
        assert!(record_matches(&r, &one, MatchMode::Any));
    }
}
