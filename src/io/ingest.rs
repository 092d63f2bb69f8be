//! CSV ingest for the precomputed forecast artifacts.
//!
//! Two file shapes are read:
//!
//! - prediction series: `Tanggal, Actual, Predicted` (extra columns ignored)
//! - evaluation scores: `RMSE, MAE, R2, MAPE` (only the first data row counts)
//!
//! A missing file, a missing column, a bad date or a non-numeric cell aborts
//! the load with exit code 2 and a message naming file and line. Blank or
//! `NaN` numeric cells load as `f64::NAN` and the row is kept.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{EvaluationMetrics, MapeValue, ModelKind, Period, PredictionRow, PredictionSeries};
use crate::error::AppError;
use crate::logging::{self, debug, info};

const COL_DATE: &str = "tanggal";
const COL_ACTUAL: &str = "actual";
const COL_PREDICTED: &str = "predicted";

const COL_RMSE: &str = "rmse";
const COL_MAE: &str = "mae";
const COL_R2: &str = "r2";
const COL_MAPE: &str = "mape";

/// Everything loaded for one period: both series and both score rows.
#[derive(Debug, Clone)]
pub struct PeriodData {
    pub period: Period,
    pub lstm: PredictionSeries,
    pub gru: PredictionSeries,
    pub lstm_eval: EvaluationMetrics,
    pub gru_eval: EvaluationMetrics,
}

impl PeriodData {
    pub fn series(&self, model: ModelKind) -> &PredictionSeries {
        match model {
            ModelKind::Lstm => &self.lstm,
            ModelKind::Gru => &self.gru,
        }
    }

    pub fn eval(&self, model: ModelKind) -> &EvaluationMetrics {
        match model {
            ModelKind::Lstm => &self.lstm_eval,
            ModelKind::Gru => &self.gru_eval,
        }
    }
}

/// Load the four artifacts of `period` from `data_dir`.
pub fn load_period(data_dir: &Path, period: Period) -> Result<PeriodData, AppError> {
    let files = period.files(data_dir);

    let lstm = load_prediction_series(files.series(ModelKind::Lstm))?;
    let gru = load_prediction_series(files.series(ModelKind::Gru))?;
    let lstm_eval = load_evaluation_metrics(files.eval(ModelKind::Lstm))?;
    let gru_eval = load_evaluation_metrics(files.eval(ModelKind::Gru))?;

    info!(logging::DEFAULT, "period loaded";
        "period" => period.display_name(),
        "lstm_rows" => lstm.len(),
        "gru_rows" => gru.len(),
    );

    Ok(PeriodData {
        period,
        lstm,
        gru,
        lstm_eval,
        gru_eval,
    })
}

/// Read a prediction CSV into a date-sorted series.
pub fn load_prediction_series(path: &Path) -> Result<PredictionSeries, AppError> {
    let (headers, mut reader) = open_csv(path)?;
    let header_map = build_header_map(&headers);
    ensure_columns_exist(path, &header_map, &[COL_DATE, COL_ACTUAL, COL_PREDICTED])?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header line, lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| row_error(path, line, format!("CSV parse error: {e}")))?;
        if is_blank(&record) {
            continue;
        }
        let row = parse_prediction_row(&record, &header_map).map_err(|msg| row_error(path, line, msg))?;
        rows.push(row);
    }

    debug!(logging::DEFAULT, "prediction series read";
        "path" => %path.display(),
        "rows" => rows.len(),
    );

    Ok(PredictionSeries::from_rows(rows))
}

/// Read an evaluation CSV and keep its first data row.
pub fn load_evaluation_metrics(path: &Path) -> Result<EvaluationMetrics, AppError> {
    let (headers, mut reader) = open_csv(path)?;
    let header_map = build_header_map(&headers);
    ensure_columns_exist(path, &header_map, &[COL_RMSE, COL_MAE, COL_R2, COL_MAPE])?;

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result.map_err(|e| row_error(path, line, format!("CSV parse error: {e}")))?;
        if is_blank(&record) {
            continue;
        }
        let metrics = parse_metrics_row(&record, &header_map).map_err(|msg| row_error(path, line, msg))?;
        debug!(logging::DEFAULT, "evaluation scores read";
            "path" => %path.display(),
            "rmse" => metrics.rmse,
            "r2" => metrics.r2,
        );
        return Ok(metrics);
    }

    Err(AppError::empty(format!(
        "Evaluation file '{}' has no data rows.",
        path.display()
    )))
}

fn open_csv(path: &Path) -> Result<(StringRecord, csv::Reader<File>), AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers of '{}': {e}", path.display())))?
        .clone();

    Ok((headers, reader))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins on duplicated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_lowercase()
}

fn ensure_columns_exist(path: &Path, header_map: &HashMap<String, usize>, required: &[&str]) -> Result<(), AppError> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !header_map.contains_key(*name))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(AppError::input(format!(
        "Missing required column(s) in '{}': {}",
        path.display(),
        missing
            .iter()
            .map(|m| display_column(m))
            .collect::<Vec<_>>()
            .join(", ")
    )))
}

/// Canonical spelling of a required column for error messages.
fn display_column(name: &str) -> &str {
    match name {
        COL_DATE => "`Tanggal`",
        COL_ACTUAL => "`Actual`",
        COL_PREDICTED => "`Predicted`",
        COL_RMSE => "`RMSE`",
        COL_MAE => "`MAE`",
        COL_R2 => "`R2`",
        COL_MAPE => "`MAPE`",
        other => other,
    }
}

fn parse_prediction_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<PredictionRow, String> {
    let date = parse_date(get_required(record, header_map, COL_DATE)?)?;
    let actual = parse_number(get_cell(record, header_map, COL_ACTUAL)?, "Actual")?;
    let predicted = parse_number(get_cell(record, header_map, COL_PREDICTED)?, "Predicted")?;
    Ok(PredictionRow {
        date,
        actual,
        predicted,
    })
}

fn parse_metrics_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<EvaluationMetrics, String> {
    Ok(EvaluationMetrics {
        rmse: parse_number(get_cell(record, header_map, COL_RMSE)?, "RMSE")?,
        mae: parse_number(get_cell(record, header_map, COL_MAE)?, "MAE")?,
        r2: parse_number(get_cell(record, header_map, COL_R2)?, "R2")?,
        mape: MapeValue::parse(get_cell(record, header_map, COL_MAPE)?),
    })
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn row_error(path: &Path, line: usize, message: impl Into<String>) -> AppError {
    AppError::input(format!("{}:{line}: {}", path.display(), message.into()))
}

/// Trimmed cell of column `name`; a short row reads as an empty cell.
fn get_cell<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: {}", display_column(name)))?;
    Ok(record.get(*idx).map(str::trim).unwrap_or(""))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let value = get_cell(record, header_map, name)?;
    if value.is_empty() {
        return Err(format!("Missing required value: {}", display_column(name)));
    }
    Ok(value)
}

/// Parse a calendar date as written by common export tools.
///
/// Timestamps are accepted and truncated to their date, which matches how
/// daily closing prices are keyed. Ambiguous `NN/NN/YYYY` dates read
/// month-first; day-first is only tried when the first field exceeds 12.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const DATE_FMTS: [&str; 6] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y"];
    const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

    let s = s.trim();
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY-MM-DD HH:MM:SS, YYYY/MM/DD, MM/DD/YYYY, DD/MM/YYYY."
    ))
}

/// Parse a numeric cell. Blank cells and `NaN` spellings are missing values.
fn parse_number(s: &str, column: &str) -> Result<f64, String> {
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("na") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .map_err(|_| format!("Invalid number '{s}' in `{column}`."))
}
