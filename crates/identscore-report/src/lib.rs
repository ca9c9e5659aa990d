pub mod csv_report;
pub mod json;
pub mod text;

use std::path::{Path, PathBuf};

use thiserror::Error;

use identscore_core::config::ReportFormat;
use identscore_core::types::RunResult;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to serialize JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the report files for one format into `out_dir`, creating it when
/// missing. Each file is attempted independently; `Text` produces no file.
pub fn write_reports(
    result: &RunResult,
    format: ReportFormat,
    out_dir: &Path,
) -> Vec<Result<PathBuf, ReportError>> {
    if format == ReportFormat::Text {
        return Vec::new();
    }

    if let Err(source) = std::fs::create_dir_all(out_dir) {
        return vec![Err(ReportError::Io {
            path: out_dir.to_path_buf(),
            source,
        })];
    }

    match format {
        ReportFormat::Csv => vec![
            csv_report::write_detailed(result, out_dir),
            csv_report::write_summary(result, out_dir),
        ],
        ReportFormat::Json => vec![json::write_report(result, out_dir)],
        ReportFormat::Text => Vec::new(),
    }
}
