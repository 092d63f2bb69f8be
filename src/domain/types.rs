//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built once per render from the CSV artifacts
//! - handed to any front-end (TUI, text report, HTML page)
//! - dumped as JSON for inspection

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Analysis window that decides which precomputed dataset is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Period {
    #[value(name = "5", alias = "5y")]
    #[serde(rename = "5")]
    Five,
    #[value(name = "10", alias = "10y")]
    #[serde(rename = "10")]
    Ten,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Five, Period::Ten];

    pub fn years(self) -> u32 {
        match self {
            Period::Five => 5,
            Period::Ten => 10,
        }
    }

    /// Label shown in the selector and in panel headings.
    pub fn display_name(self) -> &'static str {
        match self {
            Period::Five => "5 Tahun",
            Period::Ten => "10 Tahun",
        }
    }

    /// Fragment used in the artifact file names (`5tahun`, `10tahun`).
    pub fn file_tag(self) -> String {
        format!("{}tahun", self.years())
    }

    /// Cycle to the other period. With two options, next and prev coincide.
    pub fn next(self) -> Self {
        match self {
            Period::Five => Period::Ten,
            Period::Ten => Period::Five,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }

    /// Resolve the four artifact paths for this period under `data_dir`.
    pub fn files(self, data_dir: &Path) -> PeriodFiles {
        PeriodFiles {
            lstm_series: data_dir.join(series_file_name(ModelKind::Lstm, self)),
            gru_series: data_dir.join(series_file_name(ModelKind::Gru, self)),
            lstm_eval: data_dir.join(eval_file_name(ModelKind::Lstm, self)),
            gru_eval: data_dir.join(eval_file_name(ModelKind::Gru, self)),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The two forecasting models being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Lstm,
    Gru,
}

impl ModelKind {
    /// Panel order: LSTM on the left, GRU on the right.
    pub const ALL: [ModelKind; 2] = [ModelKind::Lstm, ModelKind::Gru];

    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Lstm => "LSTM",
            ModelKind::Gru => "GRU",
        }
    }

    pub fn file_stem(self) -> &'static str {
        match self {
            ModelKind::Lstm => "lstm",
            ModelKind::Gru => "gru",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// `csv_model_{model}_{N}tahun_bitcoin.csv`
pub fn series_file_name(model: ModelKind, period: Period) -> String {
    format!("csv_model_{}_{}_bitcoin.csv", model.file_stem(), period.file_tag())
}

/// `csv_evalscore_model_{model}_{N}tahun_bitcoin.csv`
pub fn eval_file_name(model: ModelKind, period: Period) -> String {
    format!(
        "csv_evalscore_model_{}_{}_bitcoin.csv",
        model.file_stem(),
        period.file_tag()
    )
}

/// Resolved artifact paths for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodFiles {
    pub lstm_series: PathBuf,
    pub gru_series: PathBuf,
    pub lstm_eval: PathBuf,
    pub gru_eval: PathBuf,
}

impl PeriodFiles {
    pub fn series(&self, model: ModelKind) -> &Path {
        match model {
            ModelKind::Lstm => &self.lstm_series,
            ModelKind::Gru => &self.gru_series,
        }
    }

    pub fn eval(&self, model: ModelKind) -> &Path {
        match model {
            ModelKind::Lstm => &self.lstm_eval,
            ModelKind::Gru => &self.gru_eval,
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [
            &self.lstm_series,
            &self.gru_series,
            &self.lstm_eval,
            &self.gru_eval,
        ]
    }
}

/// One day of a prediction series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub date: NaiveDate,
    pub actual: f64,
    pub predicted: f64,
}

impl PredictionRow {
    /// Signed prediction error (`predicted - actual`).
    pub fn error(&self) -> f64 {
        self.predicted - self.actual
    }
}

/// Date-ordered prediction rows for one model and period.
///
/// Rows are kept sorted ascending by date; the sort is stable so duplicate
/// dates keep their file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionSeries {
    rows: Vec<PredictionRow>,
}

impl PredictionSeries {
    pub fn from_rows(mut rows: Vec<PredictionRow>) -> Self {
        rows.sort_by_key(|r| r.date);
        Self { rows }
    }

    pub fn rows(&self) -> &[PredictionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// Inclusive `[first, last]` bounds, `None` when empty.
    pub fn bounds(&self) -> Option<DateRange> {
        Some(DateRange {
            start: self.first_date()?,
            end: self.last_date()?,
        })
    }
}

/// MAPE exactly as the evaluation file spells it.
///
/// The artifacts disagree on the unit (fraction vs percent, with or without
/// a `%` sign), so the raw text is what gets displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapeValue {
    pub raw: String,
    pub value: Option<f64>,
}

impl MapeValue {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let value = raw
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite());
        Self { raw, value }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for MapeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Precomputed accuracy scores for one model and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
    pub mape: MapeValue,
}

/// Inclusive calendar range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

/// How the text front-ends lay out the four evaluation scores.
///
/// `Table` mirrors the styled two-column table, `Bullets` the plain markdown
/// list used by the lighter dashboard variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MetricsStyle {
    #[default]
    Table,
    Bullets,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn period_files_are_distinct_and_deterministic() {
        let dir = Path::new("assets");
        for period in Period::ALL {
            let files = period.files(dir);
            let all = files.all();
            for i in 0..all.len() {
                for j in (i + 1)..all.len() {
                    assert_ne!(all[i], all[j]);
                }
            }
            assert_eq!(files, period.files(dir));
        }
        assert_ne!(Period::Five.files(dir), Period::Ten.files(dir));
    }

    #[test]
    fn period_file_names_follow_artifact_convention() {
        let files = Period::Ten.files(Path::new("assets"));
        assert_eq!(
            files.lstm_series,
            Path::new("assets/csv_model_lstm_10tahun_bitcoin.csv")
        );
        assert_eq!(
            files.gru_eval,
            Path::new("assets/csv_evalscore_model_gru_10tahun_bitcoin.csv")
        );
        assert_eq!(files.series(ModelKind::Gru), files.gru_series.as_path());
        assert_eq!(files.eval(ModelKind::Lstm), files.lstm_eval.as_path());
    }

    #[test]
    fn series_sorts_rows_by_date() {
        let series = PredictionSeries::from_rows(vec![
            PredictionRow { date: d(2024, 1, 3), actual: 3.0, predicted: 3.0 },
            PredictionRow { date: d(2024, 1, 1), actual: 1.0, predicted: 1.0 },
            PredictionRow { date: d(2024, 1, 2), actual: 2.0, predicted: 2.0 },
        ]);
        let dates: Vec<_> = series.rows().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
        assert_eq!(series.bounds(), DateRange::new(d(2024, 1, 1), d(2024, 1, 3)));
    }

    #[test]
    fn mape_keeps_raw_text() {
        let pct = MapeValue::parse(" 2.35% ");
        assert_eq!(pct.as_str(), "2.35%");
        assert_eq!(pct.value, Some(2.35));

        let text = MapeValue::parse("n/a");
        assert_eq!(text.to_string(), "n/a");
        assert_eq!(text.value, None);
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        assert!(DateRange::new(d(2024, 2, 1), d(2024, 1, 1)).is_none());
        let r = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert_eq!(r.to_string(), "2024-01-01 → 2024-01-31");
        assert!(DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).is_some());
    }
}
