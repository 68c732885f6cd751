//! Plain-text rendering for the post-answer reference table.

use konsul_core::RegulationRecord;

/// Render matched records as an aligned table restricted to the three
/// columns users act on: Nomor, Tentang, Link. Records without a link show
/// `-` in the link column.
pub fn reference_table(records: &[RegulationRecord]) -> String {
    let mut nomor_w = "Nomor".len();
    let mut tentang_w = "Tentang".len();
    for rec in records {
        nomor_w = nomor_w.max(rec.nomor.chars().count());
        tentang_w = tentang_w.max(rec.tentang.chars().count());
    }

    let mut out = String::from("Referensi Aturan Terkait\n");
    out.push_str(&format!(
        "  {:<nomor_w$}  {:<tentang_w$}  {}\n",
        "Nomor", "Tentang", "Link"
    ));
    for rec in records {
        let link = if rec.has_link() {
            rec.link.as_str()
        } else {
            "-"
        };
        out.push_str(&format!(
            "  {:<nomor_w$}  {:<tentang_w$}  {}\n",
            rec.nomor, rec.tentang, link
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(nomor: &str, tentang: &str, link: &str) -> RegulationRecord {
        RegulationRecord::new(nomor.into(), tentang.into(), "PMK".into(), None, link.into())
    }

    #[test]
    fn renders_header_and_rows_in_order() {
        let records = vec![
            rec("PMK-190/PMK.05/2012", "Tata Cara Pembayaran APBN", "https://jdih.kemenkeu.go.id/pmk-190"),
            rec("PMK-01", "Uang Makan", ""),
        ];
        let table = reference_table(&records);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Referensi Aturan Terkait");
        assert!(lines[1].contains("Nomor") && lines[1].contains("Tentang") && lines[1].contains("Link"));
        assert!(lines[2].contains("PMK-190/PMK.05/2012"));
        assert!(lines[3].contains("PMK-01"));
    }

    #[test]
    fn missing_link_shows_dash() {
        let table = reference_table(&[rec("PMK-01", "Uang Makan", "")]);
        assert!(table.lines().nth(2).unwrap().trim_end().ends_with('-'));
        assert!(!table.contains('#'));
    }

    #[test]
    fn columns_align_across_rows() {
        let records = vec![
            rec("PMK-1", "Pendek", "https://a"),
            rec("PMK-190/PMK.05/2012", "Jauh Lebih Panjang Dari Itu", "https://b"),
        ];
        let table = reference_table(&records);
        let lines: Vec<&str> = table.lines().collect();
        let link_col = lines[2].find("https://a").unwrap();
        assert_eq!(lines[3].find("https://b").unwrap(), link_col);
    }
}
