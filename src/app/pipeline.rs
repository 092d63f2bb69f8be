//! Shared render pipeline used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve files -> load CSVs -> clamp range -> filter both series -> view model
//!
//! The TUI, the text report and the HTML page then only differ in how they
//! draw a [`ViewModel`].

use std::path::Path;

use chrono::NaiveDate;

use crate::app::view::{ChartData, MetricsTable, ModelPanel, PAGE_TITLE, ViewModel};
use crate::domain::{ModelKind, Period};
use crate::error::AppError;
use crate::filter::{control_range, filter_series};
use crate::io::ingest::{PeriodData, load_period};
use crate::logging::{self, debug};

/// Load the period's artifacts and build the view for `[start, end]`.
///
/// `None` bounds default to the first/last available date, like the date
/// inputs do. Nothing is cached: every call reads the files again.
pub fn render(
    data_dir: &Path,
    period: Period,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<ViewModel, AppError> {
    let data = load_period(data_dir, period)?;
    Ok(build_view(&data, start, end))
}

/// Pure part of [`render`]: identical inputs give identical view models.
pub fn build_view(data: &PeriodData, start: Option<NaiveDate>, end: Option<NaiveDate>) -> ViewModel {
    let period = data.period;

    // The date inputs take their bounds from the LSTM series; fall back to
    // GRU so an empty LSTM file still leaves a usable selector.
    let bounds = data.lstm.bounds().or_else(|| data.gru.bounds());
    let range = bounds.map(|b| control_range(b, start.unwrap_or(b.start), end.unwrap_or(b.end)));

    let panels = ModelKind::ALL
        .iter()
        .map(|&model| {
            let rows = match range {
                Some(r) => filter_series(data.series(model), r.start, r.end).rows().to_vec(),
                None => Vec::new(),
            };
            let label = format!("{} - {}", model.display_name(), period.display_name());
            ModelPanel {
                model,
                chart: ChartData::from_rows(format!("Bitcoin Price Prediction - {label}"), &rows, range),
                heading: label,
                rows,
                metrics: MetricsTable::from_metrics(model, data.eval(model)),
            }
        })
        .collect::<Vec<_>>();

    debug!(logging::DEFAULT, "view built";
        "period" => period.display_name(),
        "range" => range.map(|r| r.to_string()).unwrap_or_default(),
        "lstm_rows" => panels[0].rows.len(),
        "gru_rows" => panels[1].rows.len(),
    );

    ViewModel {
        title: PAGE_TITLE.to_string(),
        period,
        bounds,
        range,
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view::tests::sample_data;
    use crate::domain::{DateRange, eval_file_name, series_file_name};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn full_range_shows_full_series_in_both_panels() {
        let data = sample_data();
        let view = build_view(&data, Some(d(2024, 1, 1)), Some(d(2024, 1, 10)));

        assert_eq!(view.panels.len(), 2);
        assert_eq!(view.panels[0].model, ModelKind::Lstm);
        assert_eq!(view.panels[1].model, ModelKind::Gru);
        assert_eq!(view.panels[0].rows, data.lstm.rows());
        assert_eq!(view.panels[1].rows, data.gru.rows());
        for panel in &view.panels {
            assert!(!panel.chart.is_empty());
            assert_eq!(panel.metrics.rows.len(), 4);
        }
        assert_eq!(view.range, view.bounds);
        assert_eq!(view.panels[0].heading, "LSTM - 5 Tahun");
        assert_eq!(
            view.panels[1].chart.title,
            "Bitcoin Price Prediction - GRU - 5 Tahun"
        );
    }

    #[test]
    fn defaults_select_everything() {
        let data = sample_data();
        assert_eq!(
            build_view(&data, None, None),
            build_view(&data, Some(d(2024, 1, 1)), Some(d(2024, 1, 10)))
        );
    }

    #[test]
    fn start_equals_end_at_min_date_gives_one_row() {
        let data = sample_data();
        let view = build_view(&data, Some(d(2024, 1, 1)), Some(d(2024, 1, 1)));
        assert_eq!(view.panels[0].rows.len(), 1);
        assert_eq!(view.panels[1].rows.len(), 1);
        assert_eq!(view.range, DateRange::new(d(2024, 1, 1), d(2024, 1, 1)));
    }

    #[test]
    fn out_of_bounds_selection_is_clamped() {
        let data = sample_data();
        let view = build_view(&data, Some(d(2023, 6, 1)), Some(d(2025, 1, 1)));
        assert_eq!(view.range, data.lstm.bounds());
        assert_eq!(view.panels[0].rows.len(), 10);

        let view = build_view(&data, Some(d(2024, 1, 8)), Some(d(2024, 1, 3)));
        assert_eq!(view.range, DateRange::new(d(2024, 1, 8), d(2024, 1, 8)));
        assert_eq!(view.panels[1].rows.len(), 1);
    }

    #[test]
    fn build_view_is_idempotent() {
        let data = sample_data();
        let a = build_view(&data, Some(d(2024, 1, 3)), Some(d(2024, 1, 7)));
        let b = build_view(&data, Some(d(2024, 1, 3)), Some(d(2024, 1, 7)));
        assert_eq!(a, b);
        assert_eq!(a.panels[0].rows.len(), 5);
    }

    #[test]
    fn empty_series_render_empty_panels() {
        let mut data = sample_data();
        data.lstm = Default::default();
        data.gru = Default::default();
        let view = build_view(&data, None, None);
        assert!(view.bounds.is_none());
        assert_eq!(view.range_label(), "-");
        for panel in &view.panels {
            assert!(panel.rows.is_empty());
            assert!(panel.chart.is_empty());
            assert_eq!(panel.metrics.rows.len(), 4);
        }
    }

    #[test]
    fn render_reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let series = "Tanggal,Actual,Predicted\n2024-01-02,2,2.5\n2024-01-01,1,1.5\n2024-01-03,3,3.5\n";
        for model in ModelKind::ALL {
            std::fs::write(dir.path().join(series_file_name(model, Period::Ten)), series).unwrap();
            std::fs::write(
                dir.path().join(eval_file_name(model, Period::Ten)),
                "RMSE,MAE,R2,MAPE\n1234.5,10,0.9876,1.5\n",
            )
            .unwrap();
        }

        let view = render(dir.path(), Period::Ten, Some(d(2024, 1, 2)), None).unwrap();
        assert_eq!(view.period, Period::Ten);
        assert_eq!(view.panels[0].rows.len(), 2);
        assert_eq!(view.panels[0].rows[0].date, d(2024, 1, 2));
        assert_eq!(view.panels[1].metrics.rows[0].value, "1,234.50");
        assert_eq!(view.panels[1].heading, "GRU - 10 Tahun");

        let again = render(dir.path(), Period::Ten, Some(d(2024, 1, 2)), None).unwrap();
        assert_eq!(view, again);

        assert!(render(dir.path(), Period::Five, None, None).is_err());
    }
}
