//! CSV table export

use super::error::{ExportError, ExportResult};
use crate::inscription::Inscription;

/// File name offered for the CSV download
pub const CSV_FILENAME: &str = "inscriptions.csv";

/// Column order of the CSV export
pub const CSV_COLUMNS: [&str; 5] = ["title", "views", "created_at", "image_url", "category"];

/// Serialize inscriptions as CSV, header row first
///
/// A missing category is written as an empty field.
pub fn encode_csv(records: &[Inscription]) -> ExportResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

/// Parse a CSV produced by [`encode_csv`]
pub fn decode_csv(data: &str) -> ExportResult<Vec<Inscription>> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());

    let mut records = Vec::new();
    for result in reader.deserialize::<Inscription>() {
        records.push(result?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{filter_and_sort, RecentWindow};
    use chrono::{Duration, TimeZone, Utc};

    fn sample() -> Vec<Inscription> {
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
        let source = vec![
            Inscription::new("Plain", 10, now - Duration::hours(2), "https://img/1"),
            Inscription::new("Comma, \"quoted\"", 99, now - Duration::minutes(5), "https://img/2")
                .category("art"),
            Inscription::new("Line\nbreak", 10, now - Duration::hours(3), "https://img/3")
                .category("text"),
            Inscription::new(
                "Sub-second",
                4,
                now - Duration::milliseconds(1500),
                "https://img/4",
            ),
            Inscription::new("Old", 1000, now - Duration::days(3), "https://img/5"),
        ];
        filter_and_sort(&source, RecentWindow::default(), now)
    }

    #[test]
    fn test_header_and_column_order() {
        let csv = encode_csv(&sample()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("title,views,created_at,image_url,category"));
        assert_eq!(
            lines.next(),
            Some("\"Comma, \"\"quoted\"\"\",99,2024-05-02T11:55:00Z,https://img/2,art")
        );
    }

    #[test]
    fn test_round_trip_reproduces_records() {
        let records = sample();
        assert_eq!(records.len(), 4);

        let csv = encode_csv(&records).unwrap();
        let decoded = decode_csv(&csv).unwrap();

        assert_eq!(decoded, records);
    }

    #[test]
    fn test_empty_set_has_header_only() {
        let csv = encode_csv(&[]).unwrap();
        assert_eq!(csv, "title,views,created_at,image_url,category\n");
        assert!(decode_csv(&csv).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_views() {
        let csv = "title,views,created_at,image_url,category\nx,many,2024-05-01T00:00:00Z,u,\n";
        assert!(decode_csv(csv).is_err());
    }

    mod properties {
        use super::*;
        use crate::inscription::testing::inscriptions;
        use proptest::prelude::*;

        fn now() -> chrono::DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
        }

        proptest! {
            #[test]
            fn test_round_trip_is_exact(source in inscriptions(now(), 32)) {
                let records = filter_and_sort(&source, RecentWindow::default(), now());

                let csv = encode_csv(&records).unwrap();
                let decoded = decode_csv(&csv).unwrap();

                prop_assert_eq!(decoded, records);
            }

            #[test]
            fn test_row_count_matches(source in inscriptions(now(), 32)) {
                let csv = encode_csv(&source).unwrap();
                let mut reader = csv::Reader::from_reader(csv.as_bytes());

                let headers: Vec<String> =
                    reader.headers().unwrap().iter().map(String::from).collect();
                prop_assert_eq!(headers, CSV_COLUMNS.to_vec());
                prop_assert_eq!(reader.records().count(), source.len());
            }
        }
    }
}
