//! Snapshot writer for inspecting what the dashboard currently shows.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::view::ViewModel;
use crate::error::AppError;
use crate::report::format_view_markdown;

/// Write a markdown snapshot of `view` under `./debug`.
pub fn write_snapshot(view: &ViewModel) -> Result<PathBuf, AppError> {
    write_snapshot_in(Path::new("debug"), view)
}

pub fn write_snapshot_in(dir: &Path, view: &ViewModel) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::output(format!("Failed to create debug dir: {e}")))?;

    let now = Local::now();
    let path = dir.join(format!(
        "dash_snapshot_{}_{}.md",
        view.period.file_tag(),
        now.format("%Y%m%d_%H%M%S")
    ));

    let mut file = File::create(&path)
        .map_err(|e| AppError::output(format!("Failed to create debug file: {e}")))?;

    writeln!(file, "<!-- generated: {} -->", now.to_rfc3339())
        .map_err(|e| AppError::output(format!("Failed to write debug header: {e}")))?;
    file.write_all(format_view_markdown(view).as_bytes())
        .map_err(|e| AppError::output(format!("Failed to write debug snapshot: {e}")))?;

    Ok(path)
}
