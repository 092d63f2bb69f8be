//! Render-ready view model.
//!
//! A `ViewModel` is everything a front-end needs to draw the dashboard for
//! one `(period, start, end)` selection. It carries formatted metric strings
//! and precomputed chart series so the TUI, text and HTML front-ends render
//! identical numbers.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{DateRange, EvaluationMetrics, ModelKind, Period, PredictionRow};
use crate::report::{format_price, format_r2};

pub const PAGE_TITLE: &str = "LSTM vs GRU: Predicting Bitcoin Daily Closing Prices";
pub const X_LABEL: &str = "Date";
pub const Y_LABEL: &str = "Price (USD)";

/// The whole dashboard for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub title: String,
    pub period: Period,
    /// Bounds offered by the date inputs (taken from the LSTM series).
    pub bounds: Option<DateRange>,
    /// Effective selection after clamping.
    pub range: Option<DateRange>,
    /// LSTM first, GRU second.
    pub panels: Vec<ModelPanel>,
}

impl ViewModel {
    pub fn range_label(&self) -> String {
        self.range
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// One model column: chart, filtered rows, metric table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelPanel {
    pub model: ModelKind,
    pub heading: String,
    pub chart: ChartData,
    pub rows: Vec<PredictionRow>,
    pub metrics: MetricsTable,
}

/// Actual-vs-predicted line chart, x in days since the common era.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub actual: Vec<(f64, f64)>,
    pub predicted: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartData {
    /// Build the chart for `rows`; `range` fixes the x axis when there are
    /// too few rows to span one. Missing (`NaN`) prices are left out of the
    /// point series.
    pub fn from_rows(title: String, rows: &[PredictionRow], range: Option<DateRange>) -> Self {
        let points = |price: fn(&PredictionRow) -> f64| -> Vec<(f64, f64)> {
            rows.iter()
                .map(|r| (date_to_x(r.date), price(r)))
                .filter(|&(_, y)| y.is_finite())
                .collect()
        };
        let actual = points(|r| r.actual);
        let predicted = points(|r| r.predicted);

        let x_bounds = x_bounds(rows, range);
        let y_bounds = y_bounds(&actual, &predicted);

        Self {
            title,
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            actual,
            predicted,
            x_bounds,
            y_bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actual.is_empty() && self.predicted.is_empty()
    }
}

/// A fixed four-row metric table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsTable {
    pub title: String,
    pub rows: Vec<MetricRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub label: String,
    pub value: String,
}

impl MetricsTable {
    pub fn from_metrics(model: ModelKind, metrics: &EvaluationMetrics) -> Self {
        let row = |label: &str, value: String| MetricRow {
            label: label.to_string(),
            value,
        };
        Self {
            title: format!("{} Evaluation", model.display_name()),
            rows: vec![
                row("RMSE", format_price(metrics.rmse)),
                row("MAE", format_price(metrics.mae)),
                row("R²", format_r2(metrics.r2)),
                row("MAPE", metrics.mape.as_str().to_string()),
            ],
        }
    }
}

pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of [`date_to_x`], rounding to the nearest day.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    let days = x.round();
    if days < i32::MIN as f64 || days > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(days as i32)
}

fn x_bounds(rows: &[PredictionRow], range: Option<DateRange>) -> [f64; 2] {
    let (x0, x1) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => (date_to_x(first.date), date_to_x(last.date)),
        _ => match range {
            Some(r) => (date_to_x(r.start), date_to_x(r.end)),
            None => (0.0, 1.0),
        },
    };
    if x1 > x0 {
        [x0, x1]
    } else {
        // Single day: widen by a day on each side so the axis has a span.
        [x0 - 1.0, x0 + 1.0]
    }
}

fn y_bounds(actual: &[(f64, f64)], predicted: &[(f64, f64)]) -> [f64; 2] {
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in actual.iter().chain(predicted.iter()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !y_min.is_finite() || !y_max.is_finite() {
        return [0.0, 1.0];
    }
    if y_max <= y_min {
        let pad = (y_min.abs() * 0.05).max(1.0);
        return [y_min - pad, y_max + pad];
    }

    let pad = (y_max - y_min) * 0.05;
    [y_min - pad, y_max + pad]
}
