//! Standalone HTML rendering of the dashboard.
//!
//! One page, two columns (LSTM left, GRU right). Each column holds the SVG
//! chart, a scrollable table of the filtered rows and the styled metrics
//! table.

use crate::app::view::{MetricsTable, ModelPanel, ViewModel};
use crate::error::AppError;
use crate::plot::render_svg_chart;
use crate::report::format_price;

const CHART_WIDTH: u32 = 720;
const CHART_HEIGHT: u32 = 380;

const STYLE: &str = r#"
    body { font-family: sans-serif; margin: 24px; background: #0e1117; color: #fafafa; }
    .meta { color: #a3a8b8; margin-bottom: 16px; }
    .columns { display: flex; gap: 24px; }
    .column { flex: 1; min-width: 0; }
    .chart svg { width: 100%; height: auto; background: #ffffff; }
    .rows { max-height: 320px; overflow-y: auto; margin: 10px 0; }
    .rows table { border-collapse: collapse; width: 100%; font-size: 14px; }
    .rows th, .rows td { border-bottom: 1px solid #333; padding: 4px 8px; text-align: right; }
    .rows th:first-child, .rows td:first-child { text-align: left; }
    .styled-table {
        border-collapse: collapse;
        margin: 10px 0;
        font-size: 16px;
        width: 100%;
        text-align: center;
    }
    .styled-table thead tr {
        background-color: #2c2f33;
        color: #ffffff;
    }
    .styled-table td, .styled-table th {
        border: 1px solid #dddddd;
        padding: 8px;
    }
    .styled-table tbody td:nth-child(2) {
        color: #00ff88;
        font-weight: bold;
    }
"#;

/// Render the full page, SVG charts included.
pub fn render_html_page(view: &ViewModel) -> Result<String, AppError> {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&view.title)));
    out.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&view.title)));
    out.push_str(&format!(
        "<p class=\"meta\">Period: {} | Range: {}</p>\n",
        escape_html(view.period.display_name()),
        escape_html(&view.range_label())
    ));

    out.push_str("<div class=\"columns\">\n");
    for panel in &view.panels {
        out.push_str(&render_panel(panel)?);
    }
    out.push_str("</div>\n</body>\n</html>\n");
    Ok(out)
}

fn render_panel(panel: &ModelPanel) -> Result<String, AppError> {
    let svg = render_svg_chart(&panel.chart, CHART_WIDTH, CHART_HEIGHT)?;

    let mut out = String::new();
    out.push_str("<section class=\"column\">\n");
    out.push_str(&format!("<h3>{}</h3>\n", escape_html(&panel.heading)));
    out.push_str(&format!("<div class=\"chart\">{svg}</div>\n"));

    out.push_str("<div class=\"rows\"><table>\n");
    out.push_str("<thead><tr><th>Tanggal</th><th>Actual</th><th>Predicted</th></tr></thead>\n<tbody>\n");
    for r in &panel.rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            r.date,
            format_price(r.actual),
            format_price(r.predicted)
        ));
    }
    out.push_str("</tbody></table></div>\n");

    out.push_str(&render_metrics_table(&panel.metrics));
    out.push_str("</section>\n");
    Ok(out)
}

/// The styled two-column metrics table.
pub fn render_metrics_table(table: &MetricsTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("<p><strong>{}</strong></p>\n", escape_html(&table.title)));
    out.push_str("<table class=\"styled-table\">\n");
    out.push_str("<thead><tr><th>Metric</th><th>Value</th></tr></thead>\n<tbody>\n");
    for row in &table.rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.label),
            escape_html(&row.value)
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
