//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the data directory and initial selection
//! - runs the render pipeline
//! - hands the view model to the chosen front-end

use std::path::Path;

use clap::Parser;

use crate::cli::{CheckArgs, Command, ExportArgs, HtmlArgs, ReportArgs, ViewArgs};
use crate::config::{DashConfig, resolve_data_dir};
use crate::error::AppError;
use crate::logging::{self, info};
use crate::report::ReportOptions;

pub mod pipeline;
pub mod view;

/// Entry point for the `dash` binary.
pub fn run() -> Result<(), AppError> {
    // `dash` and `dash -p 10` behave like `dash tui ...`; clap needs the
    // subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Report(args) => handle_report(args),
        Command::Html(args) => handle_html(args),
        Command::Export(args) => handle_export(args),
        Command::Check(args) => handle_check(args),
    }
}

fn handle_tui(args: ViewArgs) -> Result<(), AppError> {
    crate::tui::run(DashConfig::from_args(&args))
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let view = render_from(&DashConfig::from_args(&args.view))?;

    if args.json {
        let json = serde_json::to_string_pretty(&view)
            .map_err(|e| AppError::output(format!("Failed to serialize view: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    let opts = report_options_from_args(&args);
    print!("{}", crate::report::format_report(&view, &opts));
    Ok(())
}

fn handle_html(args: HtmlArgs) -> Result<(), AppError> {
    let view = render_from(&DashConfig::from_args(&args.view))?;
    let page = crate::report::render_html_page(&view)?;
    std::fs::write(&args.out, page)
        .map_err(|e| AppError::output(format!("Failed to write {}: {e}", args.out.display())))?;

    info!(logging::DEFAULT, "html written"; "path" => %args.out.display());
    println!("{}", args.out.display());
    Ok(())
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let view = render_from(&DashConfig::from_args(&args.view))?;
    let paths = crate::io::write_filtered_csvs(&args.out_dir, &view)?;
    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let data_dir = resolve_data_dir(args.data_dir.as_deref());
    let (summary, result) = check_data_dir(&data_dir);
    print!("{summary}");
    result
}

/// Scan summary for `data_dir`, plus an error when nothing can be shown.
fn check_data_dir(data_dir: &Path) -> (String, Result<(), AppError>) {
    if let Err(err) = crate::io::validate_data_dir(data_dir) {
        return (String::new(), Err(err));
    }
    let statuses = crate::io::scan_data_dir(data_dir);
    let summary = crate::io::format_scan(data_dir, &statuses);

    if statuses.iter().any(|s| s.is_complete()) {
        (summary, Ok(()))
    } else {
        let err = AppError::input(format!("No complete period in {}", data_dir.display()));
        (summary, Err(err))
    }
}

fn render_from(config: &DashConfig) -> Result<view::ViewModel, AppError> {
    info!(logging::DEFAULT, "render";
        "data_dir" => %config.data_dir.display(),
        "period" => config.period.display_name(),
    );
    pipeline::render(&config.data_dir, config.period, config.start, config.end)
}

pub fn report_options_from_args(args: &ReportArgs) -> ReportOptions {
    ReportOptions {
        metrics_style: args.metrics_style,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        max_rows: args.rows,
    }
}

/// Rewrite argv so `dash` defaults to `dash tui`.
///
/// Rules:
/// - `dash`                      -> `dash tui`
/// - `dash -p 10 ...`            -> `dash tui -p 10 ...`
/// - `dash --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "report" | "html" | "export" | "check");
    if is_subcommand {
        return argv;
    }

    // A leading flag is a TUI flag.
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["dash"])), argv(&["dash", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["dash", "-p", "10"])),
            argv(&["dash", "tui", "-p", "10"])
        );
    }

    #[test]
    fn subcommands_and_help_untouched() {
        for args in [
            &["dash", "report", "--json"][..],
            &["dash", "check"][..],
            &["dash", "--help"][..],
            &["dash", "-V"][..],
        ] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }

    #[test]
    fn check_reports_missing_dir_and_incomplete_periods() {
        let dir = tempfile::tempdir().unwrap();

        let (summary, result) = check_data_dir(&dir.path().join("absent"));
        assert!(summary.is_empty());
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Data directory not found"), "{err}");

        let (summary, result) = check_data_dir(dir.path());
        assert!(summary.contains("missing 4 file(s)"), "{summary}");
        assert!(result.is_err());
    }

    #[test]
    fn report_options_follow_flags() {
        let cli = crate::cli::Cli::parse_from(["dash", "report", "--no-plot", "--rows", "3", "--width", "60"]);
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        let opts = report_options_from_args(&args);
        assert!(!opts.plot);
        assert_eq!(opts.max_rows, Some(3));
        assert_eq!(opts.plot_width, 60);
        assert_eq!(opts.plot_height, 20);
    }
}
