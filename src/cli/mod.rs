//! Command-line parsing for the forecast comparison dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from loading, filtering and rendering.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{MetricsStyle, Period};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dash", version, about = "LSTM vs GRU Bitcoin forecast comparison dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (default).
    Tui(ViewArgs),
    /// Print the dashboard as text (metrics, rows, ASCII charts).
    Report(ReportArgs),
    /// Write a standalone HTML page with SVG charts.
    Html(HtmlArgs),
    /// Write the filtered rows of both models to CSV.
    Export(ExportArgs),
    /// List which periods have all their files in the data directory.
    Check(CheckArgs),
}

/// Selection shared by every front-end.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    /// Directory holding the `csv_model_*` / `csv_evalscore_model_*` files.
    ///
    /// Defaults to `$DASH_DATA_DIR`, then `assets`.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Analysis period in years (5 or 10).
    #[arg(short = 'p', long, value_enum, default_value_t = Period::Five)]
    pub period: Period,

    /// First date to show (inclusive). Defaults to the first available date.
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last date to show (inclusive). Defaults to the last available date.
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,
}

/// Options for the text report.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// How to print the evaluation scores.
    #[arg(long, value_enum, default_value_t = MetricsStyle::Table)]
    pub metrics_style: MetricsStyle,

    /// Disable the ASCII charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Print at most N rows per model.
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Print the view model as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Options for the HTML page.
#[derive(Debug, Args, Clone)]
pub struct HtmlArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file.
    #[arg(short = 'o', long, default_value = "dashboard.html")]
    pub out: PathBuf,
}

/// Options for the CSV export.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output directory.
    #[arg(short = 'o', long, default_value = "export")]
    pub out_dir: PathBuf,
}

/// Options for the data directory check.
#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    /// Directory to inspect (defaults like `--data-dir` elsewhere).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Parse a date flag with the same formats the CSV loader accepts.
fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    crate::io::ingest::parse_date(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flags_parse() {
        let cli = Cli::try_parse_from([
            "dash", "report", "-p", "10", "--start", "2020-01-01", "--end", "31/12/2020", "--rows", "5",
            "--metrics-style", "bullets", "--no-plot",
        ])
        .unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.view.period, Period::Ten);
        assert_eq!(args.view.start, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(args.view.end, NaiveDate::from_ymd_opt(2020, 12, 31));
        assert_eq!(args.rows, Some(5));
        assert_eq!(args.metrics_style, MetricsStyle::Bullets);
        assert!(args.no_plot);
    }

    #[test]
    fn invalid_period_and_date_are_rejected() {
        assert!(Cli::try_parse_from(["dash", "tui", "-p", "7"]).is_err());
        assert!(Cli::try_parse_from(["dash", "tui", "--start", "yesterday"]).is_err());
    }

    #[test]
    fn period_alias_is_accepted() {
        let cli = Cli::try_parse_from(["dash", "tui", "--period", "5y"]).unwrap();
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(args.period, Period::Five);
    }
}
