//! Export filtered prediction rows to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app::view::{ModelPanel, ViewModel};
use crate::domain::{ModelKind, Period};
use crate::error::AppError;
use crate::logging::{self, info};

/// `filtered_{model}_{N}tahun_bitcoin.csv`
pub fn export_file_name(model: ModelKind, period: Period) -> String {
    format!("filtered_{}_{}_bitcoin.csv", model.file_stem(), period.file_tag())
}

/// Write the filtered rows of every panel into `dir`, one file per model.
pub fn write_filtered_csvs(dir: &Path, view: &ViewModel) -> Result<Vec<PathBuf>, AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::output(format!("Failed to create export dir '{}': {e}", dir.display())))?;

    let mut written = Vec::with_capacity(view.panels.len());
    for panel in &view.panels {
        let path = dir.join(export_file_name(panel.model, view.period));
        write_panel_csv(&path, panel)?;
        written.push(path);
    }

    info!(logging::DEFAULT, "filtered rows exported";
        "dir" => %dir.display(),
        "files" => written.len(),
        "range" => %view.range_label(),
    );
    Ok(written)
}

/// Write one panel's rows as `Tanggal,Actual,Predicted,Error`.
pub fn write_panel_csv(path: &Path, panel: &ModelPanel) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "Tanggal,Actual,Predicted,Error")
        .map_err(|e| AppError::output(format!("Failed to write export CSV header: {e}")))?;

    for r in &panel.rows {
        writeln!(
            file,
            "{},{},{},{}",
            r.date,
            fmt_cell(r.actual),
            fmt_cell(r.predicted),
            fmt_cell(r.error()),
        )
        .map_err(|e| AppError::output(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Missing values stay blank so the file loads back the same way.
fn fmt_cell(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format!("{v:.4}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_view;
    use crate::app::view::tests::sample_data;

    #[test]
    fn export_writes_one_file_per_model() {
        let data = sample_data();
        let view = build_view(&data, None, None);
        let dir = tempfile::tempdir().unwrap();

        let written = write_filtered_csvs(dir.path(), &view).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("filtered_lstm_5tahun_bitcoin.csv"));
        assert!(written[1].ends_with("filtered_gru_5tahun_bitcoin.csv"));

        let body = std::fs::read_to_string(&written[0]).unwrap();
        let mut lines = body.lines();
        assert_eq!(lines.next(), Some("Tanggal,Actual,Predicted,Error"));
        assert_eq!(lines.next(), Some("2024-01-01,40000.0000,40100.0000,100.0000"));
        assert_eq!(body.lines().count(), 1 + view.panels[0].rows.len());
    }

    #[test]
    fn missing_values_export_as_blank_cells() {
        let mut data = sample_data();
        let mut rows = data.lstm.rows().to_vec();
        rows[0].actual = f64::NAN;
        data.lstm = crate::domain::PredictionSeries::from_rows(rows);
        let view = build_view(&data, None, None);
        let dir = tempfile::tempdir().unwrap();

        let written = write_filtered_csvs(dir.path(), &view).unwrap();
        let body = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(body.lines().nth(1), Some("2024-01-01,,40100.0000,"));
    }
}
