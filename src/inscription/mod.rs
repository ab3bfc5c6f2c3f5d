//! Inscription records
//!
//! The data model for the inscription feed:
//!
//! - [`Inscription`]: one record (title, views, creation time, image, category)
//! - [`iso8601`]: timestamp codec shared by the JSON and CSV formats
//! - [`decode_records`]: lenient decoding of a feed payload
//!
//! Records are immutable snapshots. Everything downstream (filtering,
//! charts, exports) works on derived copies.

mod error;
mod types;

pub use error::{RecordError, RecordResult};
pub use types::{decode_records, iso8601, DecodedBatch, Inscription, RejectedRecord};

/// Generators for property tests
#[cfg(test)]
pub(crate) mod testing {
    use chrono::{DateTime, Duration, Utc};
    use proptest::prelude::*;

    use super::Inscription;

    /// Free text with commas, quotes and line breaks mixed into Unicode
    pub fn text() -> impl Strategy<Value = String> {
        "[\\PC,\"\\n\\r]{0,24}"
    }

    /// View counts over the full range, with frequent small values so
    /// that ties show up
    pub fn views() -> impl Strategy<Value = u64> {
        prop_oneof![any::<u64>(), 0u64..4]
    }

    /// Up to `max_len` inscriptions created between three days before
    /// and one hour after `now`
    ///
    /// Each record's `image_url` carries its position in the vector.
    pub fn inscriptions(
        now: DateTime<Utc>,
        max_len: usize,
    ) -> impl Strategy<Value = Vec<Inscription>> {
        let row = (
            text(),
            views(),
            -3_600i64..72 * 3_600,
            0i64..1_000_000_000,
            proptest::option::of(text()),
        );

        prop::collection::vec(row, 0..max_len).prop_map(move |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (title, views, age_secs, nanos, category))| {
                    let created_at =
                        now - Duration::seconds(age_secs) + Duration::nanoseconds(nanos);
                    let ins = Inscription::new(
                        title,
                        views,
                        created_at,
                        format!("https://ordinals.test/content/{}", i),
                    );
                    match category {
                        Some(c) => ins.category(c),
                        None => ins,
                    }
                })
                .collect()
        })
    }
}
