//! Chart aggregates
//!
//! Derives the three dashboard views from the filtered, sorted inscriptions:
//!
//! - [`views_histogram`]: equal-width bins over the view counts
//! - [`top_viewed`]: the head of the sorted set as `(title, views)` bars
//! - [`category_distribution`]: category frequencies with percentages

use serde::Serialize;

use crate::inscription::Inscription;

/// Default number of histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Default number of bars in the top chart
pub const DEFAULT_TOP_N: usize = 10;

/// One histogram bin
///
/// Bins are half-open `[lower, upper)` except the last, which also
/// includes `upper`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// One bar of the top-N chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewBar {
    pub title: String,
    pub views: u64,
}

/// One slice of the category pie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    /// Share of categorised inscriptions, 0-100
    pub percent: f64,
}

/// All chart data for one dashboard render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub histogram: Vec<HistogramBin>,
    pub top: Vec<ViewBar>,
    /// `None` when no inscription carries a category
    pub categories: Option<Vec<CategoryShare>>,
}

impl ChartSet {
    /// Build every chart from a sorted record set
    pub fn build(sorted: &[Inscription], bins: usize, top_n: usize) -> Self {
        Self {
            histogram: views_histogram(sorted, bins),
            top: top_viewed(sorted, top_n),
            categories: category_distribution(sorted),
        }
    }
}

/// Bin the view counts into `bins` equal-width buckets
///
/// The range spans the smallest to the largest count. A single distinct
/// value is widened by half a unit on each side.
pub fn views_histogram(records: &[Inscription], bins: usize) -> Vec<HistogramBin> {
    if records.is_empty() || bins == 0 {
        return Vec::new();
    }

    let views = records.iter().map(|r| r.views as f64);
    let min = views.clone().fold(f64::INFINITY, f64::min);
    let max = views.fold(f64::NEG_INFINITY, f64::max);

    let (lower, upper) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (upper - lower) / bins as f64;

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lower + width * i as f64,
            upper: if i + 1 == bins {
                upper
            } else {
                lower + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for record in records {
        let offset = (record.views as f64 - lower) / width;
        let idx = (offset.floor() as usize).min(bins - 1);
        histogram[idx].count += 1;
    }

    histogram
}

/// The first `n` records of an already sorted set
pub fn top_viewed(sorted: &[Inscription], n: usize) -> Vec<ViewBar> {
    sorted
        .iter()
        .take(n)
        .map(|r| ViewBar {
            title: r.title.clone(),
            views: r.views,
        })
        .collect()
}

/// Category frequencies, most common first
///
/// Equal counts keep the order in which categories first appear.
pub fn category_distribution(records: &[Inscription]) -> Option<Vec<CategoryShare>> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for category in records.iter().filter_map(|r| r.category.as_deref()) {
        match counts.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category.to_string(), 1)),
        }
    }

    if counts.is_empty() {
        return None;
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let total: usize = counts.iter().map(|(_, c)| c).sum();

    Some(
        counts
            .into_iter()
            .map(|(category, count)| CategoryShare {
                category,
                count,
                percent: count as f64 * 100.0 / total as f64,
            })
            .collect(),
    )
}
