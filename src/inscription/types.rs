//! Core inscription types
//!
//! - `Inscription`: a single record from the feed
//! - `DecodedBatch`: the result of decoding one feed payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::RecordResult;

/// A single inscription as served by the feed
///
/// Field order here is the CSV column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inscription {
    /// Display title
    pub title: String,
    /// Number of views
    pub views: u64,
    /// When the inscription was created
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    /// Location of the inscription image
    pub image_url: String,
    /// Optional free-form category
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
}

impl Inscription {
    /// Create an uncategorised inscription
    pub fn new(
        title: impl Into<String>,
        views: u64,
        created_at: DateTime<Utc>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            views,
            created_at,
            image_url: image_url.into(),
            category: None,
        }
    }

    /// Set the category (builder pattern)
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// ISO-8601 timestamp codec
///
/// Accepts RFC 3339 with an offset as well as offset-less date-times and
/// bare dates. Offset-less values are taken to be UTC. Always writes
/// RFC 3339 with a `Z` suffix so that values survive a CSV round trip.
pub mod iso8601 {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::inscription::error::{RecordError, RecordResult};

    const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    /// Parse an ISO-8601 timestamp into UTC
    pub fn parse(raw: &str) -> RecordResult<DateTime<Utc>> {
        let s = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }

        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Ok(dt.with_timezone(&Utc));
            }
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(dt.and_utc());
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc());
            }
        }

        Err(RecordError::Timestamp(raw.to_string()))
    }

    /// Format a timestamp as RFC 3339 (UTC, `Z` suffix)
    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================
// Payload decoding
// ============================================

/// A feed element that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in the payload array
    pub index: usize,
    /// Why it was rejected
    pub reason: String,
}

/// Records decoded from one feed payload, in payload order
#[derive(Debug, Clone, Default)]
pub struct DecodedBatch {
    pub records: Vec<Inscription>,
    pub rejected: Vec<RejectedRecord>,
}

/// Decode a feed payload
///
/// The payload must be a JSON array. Elements that do not describe a valid
/// inscription are skipped and reported in [`DecodedBatch::rejected`].
pub fn decode_records(payload: &[u8]) -> RecordResult<DecodedBatch> {
    let elements: Vec<serde_json::Value> = serde_json::from_slice(payload)?;

    let mut batch = DecodedBatch {
        records: Vec::with_capacity(elements.len()),
        rejected: Vec::new(),
    };

    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<Inscription>(element) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed inscription");
                batch.rejected.push(RejectedRecord {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = iso8601::parse("2024-05-01T14:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_is_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(iso8601::parse("2024-05-01T12:30:00").unwrap(), expected);
        assert_eq!(iso8601::parse("2024-05-01 12:30:00").unwrap(), expected);
        assert_eq!(iso8601::parse("2024-05-01T12:30").unwrap(), expected);
    }

    #[test]
    fn test_parse_fractional_and_date_only() {
        let dt = iso8601::parse("2024-05-01T12:30:00.250").unwrap();
        assert_eq!(dt.timestamp_subsec_millis(), 250);

        let date = iso8601::parse("2024-05-01").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(iso8601::parse("last tuesday").is_err());
        assert!(iso8601::parse("").is_err());
    }

    #[test]
    fn test_format_uses_z_suffix() {
        let dt = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(iso8601::format(&dt), "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_decode_full_record() {
        let payload = br#"[{
            "title": "Rare Sat",
            "views": 42,
            "created_at": "2024-05-01T12:00:00Z",
            "image_url": "https://ordinals.com/content/abc",
            "category": "art",
            "inscription_id": "ignored"
        }]"#;

        let batch = decode_records(payload).unwrap();
        assert!(batch.rejected.is_empty());
        assert_eq!(batch.records.len(), 1);

        let record = &batch.records[0];
        assert_eq!(record.title, "Rare Sat");
        assert_eq!(record.views, 42);
        assert_eq!(record.category.as_deref(), Some("art"));
    }

    #[test]
    fn test_decode_missing_null_and_blank_category() {
        let payload = br#"[
            {"title": "a", "views": 1, "created_at": "2024-05-01T00:00:00Z", "image_url": "u"},
            {"title": "b", "views": 2, "created_at": "2024-05-01T00:00:00Z", "image_url": "u", "category": null},
            {"title": "c", "views": 3, "created_at": "2024-05-01T00:00:00Z", "image_url": "u", "category": "  "}
        ]"#;

        let batch = decode_records(payload).unwrap();
        assert_eq!(batch.records.len(), 3);
        assert!(batch.records.iter().all(|r| r.category.is_none()));
    }

    #[test]
    fn test_decode_skips_invalid_elements() {
        let payload = br#"[
            {"title": "ok", "views": 5, "created_at": "2024-05-01T00:00:00Z", "image_url": "u"},
            {"title": "negative", "views": -1, "created_at": "2024-05-01T00:00:00Z", "image_url": "u"},
            {"title": "bad time", "views": 1, "created_at": "soon", "image_url": "u"},
            "not an object"
        ]"#;

        let batch = decode_records(payload).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].title, "ok");
        let indices: Vec<usize> = batch.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(decode_records(br#"{"title": "x"}"#).is_err());
        assert!(decode_records(b"<html>").is_err());
    }

    #[test]
    fn test_category_builder_ignores_blank() {
        let now = Utc::now();
        assert_eq!(Inscription::new("t", 1, now, "u").category("").category, None);
        assert_eq!(
            Inscription::new("t", 1, now, "u").category("pfp").category.as_deref(),
            Some("pfp")
        );
    }
}
