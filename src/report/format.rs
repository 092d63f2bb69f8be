//! Plain-text and markdown renderings of the dashboard.

use crate::app::view::{MetricsTable, ModelPanel, ViewModel};
use crate::domain::{MetricsStyle, PredictionRow};
use crate::plot::render_ascii_chart;

/// Options for the `report` front-end.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub metrics_style: MetricsStyle,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Cap on printed rows per model; `None` prints everything.
    pub max_rows: Option<usize>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            metrics_style: MetricsStyle::Table,
            plot: true,
            plot_width: 100,
            plot_height: 20,
            max_rows: None,
        }
    }
}

/// Format `v` with `decimals` fraction digits and `,` thousands separators.
///
/// `1234.5` with two decimals gives `1,234.50`.
pub fn format_thousands(v: f64, decimals: usize) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if !v.is_finite() {
        return v.to_string();
    }

    let fixed = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Prices, RMSE and MAE: two decimals with thousands separators.
pub fn format_price(v: f64) -> String {
    format_thousands(v, 2)
}

/// R²: four decimals, no grouping.
pub fn format_r2(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    format!("{v:.4}")
}

/// Format the whole dashboard for a terminal.
pub fn format_report(view: &ViewModel, opts: &ReportOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", view.title));
    out.push_str(&format!("Period: {}\n", view.period.display_name()));
    out.push_str(&format!("Range: {}", view.range_label()));
    if let Some(bounds) = view.bounds {
        out.push_str(&format!(" (available {bounds})"));
    }
    out.push('\n');

    for panel in &view.panels {
        out.push('\n');
        out.push_str(&format_panel(panel, opts));
    }

    out
}

fn format_panel(panel: &ModelPanel, opts: &ReportOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("--- {} ---\n", panel.heading));

    if opts.plot {
        out.push_str(&render_ascii_chart(&panel.chart, opts.plot_width, opts.plot_height));
        out.push('\n');
    }

    out.push_str(&format!("Rows: {}\n", panel.rows.len()));
    out.push_str(&format_rows_table(&panel.rows, opts.max_rows));
    out.push('\n');

    match opts.metrics_style {
        MetricsStyle::Table => out.push_str(&format_metrics_table(&panel.metrics)),
        MetricsStyle::Bullets => out.push_str(&format_metrics_bullets(&panel.metrics)),
    }

    out
}

/// Two-column metric table.
pub fn format_metrics_table(table: &MetricsTable) -> String {
    let value_width = table
        .rows
        .iter()
        .map(|r| r.value.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut out = String::new();
    out.push_str(&table.title);
    out.push('\n');
    push_line(&mut out, format!("{:<6}  {}", "Metric", "Value"));
    push_line(&mut out, format!("{:-<6}  {:-<value_width$}", "", ""));
    for row in &table.rows {
        push_line(&mut out, format!("{:<6}  {}", row.label, row.value));
    }
    out
}

/// Markdown bullet list of the metrics.
pub fn format_metrics_bullets(table: &MetricsTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("**{}**\n", table.title));
    for row in &table.rows {
        out.push_str(&format!("- {}: {}\n", row.label, row.value));
    }
    out
}

/// Fixed-width table of prediction rows.
pub fn format_rows_table(rows: &[PredictionRow], limit: Option<usize>) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("{:<10}  {:>14}  {:>14}", "Tanggal", "Actual", "Predicted"));
    push_line(&mut out, format!("{:-<10}  {:-<14}  {:-<14}", "", "", ""));

    let shown = limit.unwrap_or(rows.len()).min(rows.len());
    for r in &rows[..shown] {
        push_line(
            &mut out,
            format!(
                "{:<10}  {:>14}  {:>14}",
                r.date.to_string(),
                format_price(r.actual),
                format_price(r.predicted)
            ),
        );
    }
    if shown < rows.len() {
        out.push_str(&format!("... ({} more rows)\n", rows.len() - shown));
    }
    out
}

/// Markdown document of the view (used by debug snapshots).
pub fn format_view_markdown(view: &ViewModel) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", view.title));
    out.push_str(&format!("- Period: {}\n", view.period.display_name()));
    out.push_str(&format!("- Range: {}\n", view.range_label()));

    for panel in &view.panels {
        out.push_str(&format!("\n## {}\n\n", panel.heading));
        out.push_str(&format_metrics_bullets(&panel.metrics));
        out.push('\n');

        out.push_str("| Tanggal | Actual | Predicted |\n");
        out.push_str("| --- | ---: | ---: |\n");
        for r in &panel.rows {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                r.date,
                format_price(r.actual),
                format_price(r.predicted)
            ));
        }
    }

    out
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_view;
    use crate::app::view::tests::sample_data;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(1234.5, 2), "1,234.50");
        assert_eq!(format_thousands(0.0, 2), "0.00");
        assert_eq!(format_thousands(999.999, 2), "1,000.00");
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(-98765.4, 1), "-98,765.4");
        assert_eq!(format_thousands(100.0, 0), "100");
        assert_eq!(format_thousands(f64::NAN, 2), "nan");
        assert_eq!(format_price(f64::NAN), "nan");
    }

    #[test]
    fn r2_uses_four_decimals() {
        assert_eq!(format_r2(0.9876), "0.9876");
        assert_eq!(format_r2(0.95), "0.9500");
        assert_eq!(format_r2(f64::NAN), "nan");
        assert_eq!(format_r2(-1.23456), "-1.2346");
    }

    #[test]
    fn metrics_table_golden() {
        let view = build_view(&sample_data(), None, None);
        let txt = format_metrics_table(&view.panels[0].metrics);
        let expected = concat!(
            "LSTM Evaluation\n",
            "Metric  Value\n",
            "------  --------\n",
            "RMSE    1,234.50\n",
            "MAE     987.65\n",
            "R²      0.9876\n",
            "MAPE    2.31%\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn metrics_bullets_golden() {
        let view = build_view(&sample_data(), None, None);
        let txt = format_metrics_bullets(&view.panels[1].metrics);
        let expected = concat!(
            "**GRU Evaluation**\n",
            "- RMSE: 1,500.00\n",
            "- MAE: 1,000.00\n",
            "- R²: 0.9512\n",
            "- MAPE: 0.0312\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn rows_table_respects_limit() {
        let view = build_view(&sample_data(), None, None);
        let txt = format_rows_table(&view.panels[0].rows, Some(2));
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "Tanggal             Actual       Predicted");
        assert_eq!(lines[2], "2024-01-01       40,000.00       40,100.00");
        assert_eq!(lines[4], "... (8 more rows)");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn report_without_plot_lists_both_panels() {
        let view = build_view(&sample_data(), None, None);
        let opts = ReportOptions {
            plot: false,
            max_rows: Some(0),
            ..ReportOptions::default()
        };
        let txt = format_report(&view, &opts);
        assert!(txt.starts_with("=== LSTM vs GRU"), "{txt}");
        assert!(txt.contains("Range: 2024-01-01 → 2024-01-10"), "{txt}");
        let lstm = txt.find("--- LSTM - 5 Tahun ---").unwrap();
        let gru = txt.find("--- GRU - 5 Tahun ---").unwrap();
        assert!(lstm < gru);
        assert_eq!(txt.matches("Rows: 10").count(), 2);
    }

    #[test]
    fn markdown_has_one_row_per_filtered_day() {
        let view = build_view(&sample_data(), None, None);
        let md = format_view_markdown(&view);
        assert!(md.contains("## GRU - 5 Tahun"));
        assert_eq!(md.matches("| 2024-01-05 |").count(), 2);
    }
}
