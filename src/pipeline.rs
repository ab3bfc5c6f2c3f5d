//! Filter and sort
//!
//! Selects the inscriptions created inside a trailing time window and orders
//! them by view count.

use chrono::{DateTime, Duration, Utc};

use crate::inscription::Inscription;

/// A trailing window of hours ending at the evaluation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentWindow {
    hours: i64,
}

impl RecentWindow {
    /// Window covering the last `hours` hours
    pub fn hours(hours: u32) -> Self {
        Self {
            hours: i64::from(hours),
        }
    }

    /// Window length in hours
    pub fn len_hours(&self) -> i64 {
        self.hours
    }

    /// Oldest instant that is no longer recent at `now`
    ///
    /// Saturates at the earliest representable time for very long windows.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(Duration::hours(self.hours))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether a creation time falls strictly after the cutoff
    pub fn contains(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        created_at > self.cutoff(now)
    }
}

impl Default for RecentWindow {
    fn default() -> Self {
        Self::hours(24)
    }
}

/// Keep the recent inscriptions, most viewed first
///
/// Records with equal view counts keep their relative source order. The
/// source slice is left untouched.
pub fn filter_and_sort(
    inscriptions: &[Inscription],
    window: RecentWindow,
    now: DateTime<Utc>,
) -> Vec<Inscription> {
    let mut recent: Vec<Inscription> = inscriptions
        .iter()
        .filter(|ins| window.contains(ins.created_at, now))
        .cloned()
        .collect();

    // sort_by is stable
    recent.sort_by(|a, b| b.views.cmp(&a.views));

    tracing::debug!(
        total = inscriptions.len(),
        recent = recent.len(),
        window_hours = window.len_hours(),
        "Filtered inscriptions"
    );

    recent
}
