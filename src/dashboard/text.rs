//! Terminal rendering
//!
//! Plain-text versions of the dashboard table and charts for the CLI.

use std::fmt::Write as _;

use super::{Dashboard, DashboardStatus};
use crate::inscription::iso8601;

const BAR_WIDTH: usize = 40;

/// Status line, notices and the inscription table
///
/// `limit` caps the number of table rows.
pub fn render_text(dashboard: &Dashboard, limit: Option<usize>) -> String {
    let mut out = String::new();

    if let Some(notice) = &dashboard.notice {
        let _ = writeln!(out, "Error: {}", notice);
    }
    let _ = writeln!(out, "{}", dashboard.status_message());

    if dashboard.rejected > 0 {
        let _ = writeln!(out, "({} malformed feed entries skipped)", dashboard.rejected);
    }

    if dashboard.status() != DashboardStatus::Ready {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<32} {:>10}  {:<24} {:<12}",
        "Title", "Views", "Created At", "Category"
    );
    let _ = writeln!(out, "{}", "-".repeat(81));

    let shown = limit.unwrap_or(usize::MAX);
    for ins in dashboard.recent.iter().take(shown) {
        let _ = writeln!(
            out,
            "{:<32} {:>10}  {:<24} {:<12}",
            clip(&ins.title, 32),
            ins.views,
            iso8601::format(&ins.created_at),
            ins.category.as_deref().unwrap_or("-"),
        );
    }

    if dashboard.recent.len() > shown {
        let _ = writeln!(out, "... {} more", dashboard.recent.len() - shown);
    }

    out
}

/// The three charts as horizontal text bars
pub fn render_charts_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    if dashboard.status() != DashboardStatus::Ready {
        let _ = writeln!(out, "{}", dashboard.status_message());
        return out;
    }

    let charts = &dashboard.charts;

    let _ = writeln!(out, "Views Distribution");
    let max = charts.histogram.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in &charts.histogram {
        let _ = writeln!(
            out,
            "  {:>10.0} - {:<10.0} {:>5} {}",
            bin.lower,
            bin.upper,
            bin.count,
            bar(bin.count as u64, max as u64)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top {} Most Viewed Inscriptions", charts.top.len());
    let max = charts.top.iter().map(|b| b.views).max().unwrap_or(0);
    for entry in &charts.top {
        let _ = writeln!(
            out,
            "  {:<24} {:>10} {}",
            clip(&entry.title, 24),
            entry.views,
            bar(entry.views, max)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Category Distribution");
    match &charts.categories {
        Some(shares) => {
            for share in shares {
                let _ = writeln!(
                    out,
                    "  {:<24} {:>5} {:>6.1}%",
                    clip(&share.category, 24),
                    share.count,
                    share.percent
                );
            }
        }
        None => {
            let _ = writeln!(out, "  No category data available.");
        }
    }

    out
}

fn bar(value: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let len = ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len)
}

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::inscription::Inscription;
    use crate::source::FetchOutcome;
    use chrono::{Duration, Utc};

    fn dashboard(records: Vec<Inscription>) -> Dashboard {
        let outcome = FetchOutcome {
            records,
            rejected: 0,
            notice: None,
        };
        Dashboard::build("u", &outcome, &DashboardConfig::default(), Utc::now())
    }

    fn recent(title: &str, views: u64) -> Inscription {
        Inscription::new(title, views, Utc::now() - Duration::hours(1), "u")
    }

    #[test]
    fn test_table_rows_and_limit() {
        let d = dashboard(vec![recent("a", 1), recent("b", 2), recent("c", 3)]);

        let text = render_text(&d, Some(2));

        assert!(text.starts_with("Found 3 inscriptions in the last 24 hours."));
        assert!(text.contains("Title"));
        assert!(text.contains("... 1 more"));
        let c = text.find("\nc ").unwrap();
        let b = text.find("\nb ").unwrap();
        assert!(c < b);
    }

    #[test]
    fn test_failed_fetch_text() {
        let d = Dashboard::build(
            "u",
            &FetchOutcome::failed("Failed to retrieve data. Status code: 500"),
            &DashboardConfig::default(),
            Utc::now(),
        );

        let text = render_text(&d, None);

        assert_eq!(
            text,
            "Error: Failed to retrieve data. Status code: 500\nNo data available.\n"
        );
    }

    #[test]
    fn test_all_rejected_text() {
        let outcome = FetchOutcome {
            records: Vec::new(),
            rejected: 2,
            notice: None,
        };
        let d = Dashboard::build("u", &outcome, &DashboardConfig::default(), Utc::now());

        let text = render_text(&d, None);

        assert_eq!(text, "No data available.\n(2 malformed feed entries skipped)\n");
    }

    #[test]
    fn test_charts_text() {
        let d = dashboard(vec![recent("big", 100), recent("small", 50)]);

        let text = render_charts_text(&d);

        assert!(text.contains("Views Distribution"));
        assert!(text.contains("Top 2 Most Viewed Inscriptions"));
        assert!(text.contains(&"#".repeat(40)));
        assert!(text.contains("No category data available."));
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("abcdef", 10), "abcdef");
        assert_eq!(clip("abcdefghijkl", 8), "abcde...");
    }
}
