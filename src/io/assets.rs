//! Data directory inspection.
//!
//! The dashboard expects a flat directory holding the eight forecast
//! artifacts (four per period). This module answers "which periods can be
//! shown?" before any CSV is parsed, so the TUI can start on a period that
//! exists and `dash check` can list what is missing.

use std::path::{Path, PathBuf};

use crate::domain::Period;
use crate::error::AppError;

/// Availability of one period's artifacts.
#[derive(Debug, Clone)]
pub struct PeriodStatus {
    pub period: Period,
    pub missing: Vec<PathBuf>,
}

impl PeriodStatus {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check every period's files under `data_dir`.
pub fn scan_data_dir(data_dir: &Path) -> Vec<PeriodStatus> {
    Period::ALL
        .iter()
        .map(|&period| PeriodStatus {
            period,
            missing: period
                .files(data_dir)
                .all()
                .iter()
                .filter(|p| !p.is_file())
                .map(|p| p.to_path_buf())
                .collect(),
        })
        .collect()
}

/// Ensure `data_dir` exists and is a directory.
pub fn validate_data_dir(data_dir: &Path) -> Result<(), AppError> {
    if !data_dir.exists() {
        return Err(AppError::input(format!(
            "Data directory not found: {}. Pass --data-dir or set DASH_DATA_DIR.",
            data_dir.display()
        )));
    }
    if !data_dir.is_dir() {
        return Err(AppError::input(format!(
            "Expected a directory, got a file: {}",
            data_dir.display()
        )));
    }
    Ok(())
}

/// Pick the period to open with: the requested one if complete, otherwise
/// the first complete one, otherwise the requested one (the load then fails
/// with a precise message).
pub fn resolve_start_period(data_dir: &Path, requested: Period) -> Period {
    let statuses = scan_data_dir(data_dir);
    let complete = |p: Period| statuses.iter().any(|s| s.period == p && s.is_complete());
    if complete(requested) {
        return requested;
    }
    Period::ALL
        .into_iter()
        .find(|&p| complete(p))
        .unwrap_or(requested)
}

/// Human-readable summary of `scan_data_dir`.
pub fn format_scan(data_dir: &Path, statuses: &[PeriodStatus]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Data directory: {}\n", data_dir.display()));
    for status in statuses {
        if status.is_complete() {
            out.push_str(&format!("  {:<9} ok\n", status.period.display_name()));
            continue;
        }
        out.push_str(&format!(
            "  {:<9} missing {} file(s):\n",
            status.period.display_name(),
            status.missing.len()
        ));
        for path in &status.missing {
            out.push_str(&format!("    - {}\n", pretty_path(path)));
        }
    }
    out
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}
