//! Run configuration resolved from CLI flags and the environment.
//!
//! Precedence for the data directory: `--data-dir`, then `DASH_DATA_DIR`
//! (a `.env` file in the working directory is honoured), then `assets`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::cli::ViewArgs;
use crate::domain::Period;

pub const DATA_DIR_ENV: &str = "DASH_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "assets";

/// What to show: where the artifacts live and the initial selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    pub data_dir: PathBuf,
    pub period: Period,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DashConfig {
    pub fn from_args(args: &ViewArgs) -> Self {
        Self {
            data_dir: resolve_data_dir(args.data_dir.as_deref()),
            period: args.period,
            start: args.start,
            end: args.end,
        }
    }
}

/// Pick the data directory, loading `.env` first so `DASH_DATA_DIR` can live there.
pub fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
    dotenvy::dotenv().ok();
    data_dir_from(flag, std::env::var(DATA_DIR_ENV).ok())
}

fn data_dir_from(flag: Option<&Path>, env: Option<String>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    match env {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
        _ => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env() {
        let dir = data_dir_from(Some(Path::new("/data")), Some("/env".to_string()));
        assert_eq!(dir, PathBuf::from("/data"));
    }

    #[test]
    fn env_used_when_no_flag() {
        assert_eq!(data_dir_from(None, Some(" /env ".to_string())), PathBuf::from("/env"));
    }

    #[test]
    fn blank_env_falls_back_to_assets() {
        assert_eq!(data_dir_from(None, Some("  ".to_string())), PathBuf::from("assets"));
        assert_eq!(data_dir_from(None, None), PathBuf::from("assets"));
    }

    #[test]
    fn from_args_keeps_selection() {
        let args = ViewArgs {
            data_dir: Some(PathBuf::from("fixtures")),
            period: Period::Ten,
            start: NaiveDate::from_ymd_opt(2020, 1, 1),
            end: None,
        };
        let cfg = DashConfig::from_args(&args);
        assert_eq!(cfg.data_dir, PathBuf::from("fixtures"));
        assert_eq!(cfg.period, Period::Ten);
        assert_eq!(cfg.start, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(cfg.end, None);
    }
}
