//! HTML rendering
//!
//! Renders a [`Page`] as one self-contained HTML document: inline CSS,
//! inline SVG charts and base64 download links. No scripts, no external
//! assets other than the inscription images themselves.

use std::f64::consts::PI;
use std::fmt::Write as _;

use super::{dashboard_title, Dashboard, DashboardStatus, Page};
use crate::charts::{CategoryShare, HistogramBin, ViewBar};
use crate::inscription::iso8601;

/// Chart colors, cycled for pie slices
const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange (primary)
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 320.0;
const CHART_PADDING: f64 = 48.0;

/// Render the full dashboard page
pub fn render_html(page: &Page) -> String {
    let title = dashboard_title(page.window_hours);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        {form}
        {body}
    </div>
</body>
</html>"#,
        title = html_escape(&title),
        css = inline_css(),
        form = render_form(&page.form_url),
        body = page
            .dashboard
            .as_ref()
            .map(|d| render_body(page, d))
            .unwrap_or_default(),
    )
}

fn render_form(url: &str) -> String {
    format!(
        r#"<form method="get" action="/">
            <label for="url">Enter URL for inscriptions data</label>
            <input type="text" id="url" name="url" value="{}" autocomplete="url">
            <button type="submit">Load</button>
        </form>"#,
        html_escape(url)
    )
}

fn render_body(page: &Page, dashboard: &Dashboard) -> String {
    let mut out = String::new();

    if let Some(notice) = &dashboard.notice {
        let _ = write!(out, r#"<div class="error">{}</div>"#, html_escape(notice));
    }

    let _ = write!(
        out,
        r#"<p class="status">{}</p>"#,
        html_escape(&dashboard.status_message())
    );

    if dashboard.rejected > 0 {
        let _ = write!(
            out,
            r#"<p class="muted">{} feed entries could not be read and were skipped.</p>"#,
            dashboard.rejected
        );
    }

    if dashboard.status() != DashboardStatus::Ready {
        return out;
    }

    out.push_str(&render_table(dashboard));

    if let Some(link) = &page.csv_link {
        out.push_str(&link.to_html("Download CSV File"));
    }

    let charts = &dashboard.charts;

    out.push_str("<h2>Views Distribution</h2>");
    out.push_str(&histogram_svg(&charts.histogram));

    let _ = write!(out, "<h2>Top {} Most Viewed Inscriptions</h2>", charts.top.len());
    out.push_str(&bar_svg(&charts.top));

    out.push_str("<h2>Category Distribution</h2>");
    match &charts.categories {
        Some(shares) => out.push_str(&pie_svg(shares)),
        None => out.push_str(r#"<p class="muted">No category data available.</p>"#),
    }

    if let (Some(link), Some(archive)) = (page.archive_link(), &page.archive) {
        out.push_str(&link.to_html("Download Images Zip"));
        if !archive.skipped.is_empty() {
            let _ = write!(
                out,
                r#"<p class="muted">{} images could not be fetched and are missing from the archive.</p>"#,
                archive.skipped.len()
            );
        }
    }

    out.push_str(&render_cards(dashboard));
    out
}

fn render_table(dashboard: &Dashboard) -> String {
    let mut rows = String::new();

    for ins in &dashboard.recent {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td class=\"num\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            html_escape(&ins.title),
            ins.views,
            iso8601::format(&ins.created_at),
            image_link(&ins.image_url),
            html_escape(ins.category.as_deref().unwrap_or("")),
        );
    }

    format!(
        r#"<table>
            <thead><tr><th>title</th><th>views</th><th>created_at</th><th>image_url</th><th>category</th></tr></thead>
            <tbody>{}</tbody>
        </table>"#,
        rows
    )
}

/// Feed URLs only become links when they are plain http(s)
fn is_web_url(url: &str) -> bool {
    reqwest::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn image_link(url: &str) -> String {
    let text = html_escape(url);
    if is_web_url(url) {
        format!(r#"<a href="{}">{}</a>"#, text, text)
    } else {
        text
    }
}

fn render_cards(dashboard: &Dashboard) -> String {
    let mut out = String::from(r#"<div class="cards">"#);

    for ins in &dashboard.recent {
        let title = html_escape(&ins.title);
        let _ = write!(
            out,
            r#"<div class="card">
                <p><strong>Title:</strong> {title}</p>
                <p><strong>Views:</strong> {views}</p>
                <p><strong>Created At:</strong> {created}</p>
                <figure>{img}<figcaption>{title}</figcaption></figure>
            </div>"#,
            title = title,
            views = ins.views,
            created = iso8601::format(&ins.created_at),
            img = if is_web_url(&ins.image_url) {
                format!(r#"<img src="{}" alt="{}">"#, html_escape(&ins.image_url), title)
            } else {
                String::new()
            },
        );
    }

    out.push_str("</div>");
    out
}

// ============================================
// SVG charts
// ============================================

fn svg_open(title: &str) -> String {
    format!(
        r#"<svg class="chart" width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" role="img"><title>{t}</title>"#,
        w = CHART_WIDTH,
        h = CHART_HEIGHT,
        t = html_escape(title),
    )
}

fn svg_axes(out: &mut String) {
    let bottom = CHART_HEIGHT - CHART_PADDING;
    let _ = write!(
        out,
        r##"<line x1="{p}" y1="{p}" x2="{p}" y2="{b}" stroke="#888"/><line x1="{p}" y1="{b}" x2="{r}" y2="{b}" stroke="#888"/>"##,
        p = CHART_PADDING,
        b = bottom,
        r = CHART_WIDTH - CHART_PADDING,
    );
}

/// Adjacent bars, one per bin, labelled with the range ends
pub(crate) fn histogram_svg(bins: &[HistogramBin]) -> String {
    let mut out = svg_open("Views Distribution");
    svg_axes(&mut out);

    let plot_w = CHART_WIDTH - 2.0 * CHART_PADDING;
    let plot_h = CHART_HEIGHT - 2.0 * CHART_PADDING;
    let bottom = CHART_HEIGHT - CHART_PADDING;
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
    let bar_w = plot_w / bins.len().max(1) as f64;

    for (i, bin) in bins.iter().enumerate() {
        let h = bin.count as f64 / max * plot_h;
        let _ = write!(
            out,
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{:.0}-{:.0}: {}</title></rect>"##,
            CHART_PADDING + i as f64 * bar_w,
            bottom - h,
            bar_w,
            h,
            SERIES_COLORS[2],
            bin.lower,
            bin.upper,
            bin.count,
        );
    }

    if let (Some(first), Some(last)) = (bins.first(), bins.last()) {
        let _ = write!(
            out,
            r#"<text x="{p}" y="{y}" font-size="12">{lo:.0}</text><text x="{r}" y="{y}" font-size="12" text-anchor="end">{hi:.0}</text>"#,
            p = CHART_PADDING,
            r = CHART_WIDTH - CHART_PADDING,
            y = bottom + 16.0,
            lo = first.lower,
            hi = last.upper,
        );
    }

    let _ = write!(
        out,
        r#"<text x="12" y="{}" font-size="12">{}</text>"#,
        CHART_PADDING - 8.0,
        max as usize
    );

    out.push_str("</svg>");
    out
}

/// One vertical bar per inscription, titles along the x axis
pub(crate) fn bar_svg(bars: &[ViewBar]) -> String {
    let mut out = svg_open("Top Most Viewed Inscriptions");
    svg_axes(&mut out);

    let plot_w = CHART_WIDTH - 2.0 * CHART_PADDING;
    let plot_h = CHART_HEIGHT - 2.0 * CHART_PADDING;
    let bottom = CHART_HEIGHT - CHART_PADDING;
    let max = bars.iter().map(|b| b.views).max().unwrap_or(0).max(1) as f64;
    let slot = plot_w / bars.len().max(1) as f64;

    for (i, bar) in bars.iter().enumerate() {
        let h = bar.views as f64 / max * plot_h;
        let x = CHART_PADDING + i as f64 * slot + slot * 0.15;
        let label_x = x + slot * 0.35;
        let _ = write!(
            out,
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"##,
            x,
            bottom - h,
            slot * 0.7,
            h,
            SERIES_COLORS[0],
            html_escape(&bar.title),
            bar.views,
        );
        let _ = write!(
            out,
            r#"<text x="{lx:.1}" y="{ly:.1}" font-size="10" text-anchor="end" transform="rotate(-35 {lx:.1} {ly:.1})">{}</text>"#,
            html_escape(&truncate(&bar.title, 14)),
            lx = label_x,
            ly = bottom + 12.0,
        );
    }

    let _ = write!(
        out,
        r#"<text x="12" y="{}" font-size="12">Views</text><text x="{}" y="{}" font-size="12" text-anchor="end">Title</text>"#,
        CHART_PADDING - 8.0,
        CHART_WIDTH - 8.0,
        CHART_HEIGHT - 8.0,
    );

    out.push_str("</svg>");
    out
}

/// Pie starting at twelve o'clock, with a percentage legend
pub(crate) fn pie_svg(shares: &[CategoryShare]) -> String {
    let mut out = svg_open("Category Distribution");

    let cx = CHART_HEIGHT / 2.0;
    let cy = CHART_HEIGHT / 2.0;
    let r = CHART_HEIGHT / 2.0 - 24.0;

    if shares.len() == 1 {
        let _ = write!(
            out,
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#,
            SERIES_COLORS[0],
        );
    } else {
        let mut angle = -PI / 2.0;
        for (i, share) in shares.iter().enumerate() {
            let sweep = share.percent / 100.0 * 2.0 * PI;
            let end = angle + sweep;
            let large = if sweep > PI { 1 } else { 0 };
            let _ = write!(
                out,
                r#"<path d="M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large} 1 {x2:.2} {y2:.2} Z" fill="{color}"/>"#,
                x1 = cx + r * angle.cos(),
                y1 = cy + r * angle.sin(),
                x2 = cx + r * end.cos(),
                y2 = cy + r * end.sin(),
                color = SERIES_COLORS[i % SERIES_COLORS.len()],
            );
            angle = end;
        }
    }

    let legend_x = CHART_HEIGHT + 16.0;
    for (i, share) in shares.iter().enumerate() {
        let y = 32.0 + i as f64 * 22.0;
        let _ = write!(
            out,
            r#"<rect x="{legend_x}" y="{:.1}" width="12" height="12" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="13">{} ({:.1}%)</text>"#,
            y - 10.0,
            SERIES_COLORS[i % SERIES_COLORS.len()],
            legend_x + 18.0,
            y,
            html_escape(&share.category),
            share.percent,
        );
    }

    out.push_str("</svg>");
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Escape text for use in HTML content and attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; background: #fafafa; color: #222; }
.container { max-width: 1100px; margin: 0 auto; padding: 24px; }
h1 { font-size: 1.8rem; }
h2 { font-size: 1.2rem; margin-top: 32px; }
form { display: flex; gap: 8px; align-items: center; margin-bottom: 16px; }
form input { flex: 1; padding: 6px 8px; }
.error { background: #fdecea; color: #b71c1c; padding: 8px 12px; border-radius: 4px; }
.status { font-weight: 600; }
.muted { color: #666; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border-bottom: 1px solid #ddd; padding: 4px 8px; text-align: left; }
td.num { text-align: right; }
a.download { display: inline-block; margin: 12px 0; }
.chart { background: #fff; border: 1px solid #eee; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 16px; margin-top: 24px; }
.card { background: #fff; border: 1px solid #eee; padding: 12px; }
.card img { max-width: 100%; }
"#
}
