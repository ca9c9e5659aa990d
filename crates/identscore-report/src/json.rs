use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use identscore_core::types::{CategoryCounts, Language, RunResult};

use crate::ReportError;

/// Run result with generation metadata.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: String,
    pub tool_version: &'static str,
    #[serde(flatten)]
    pub result: &'a RunResult,
    pub entity_count: usize,
    pub category_counts: CategoryCounts,
}

impl<'a> JsonReport<'a> {
    pub fn new(result: &'a RunResult) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION"),
            result,
            entity_count: result.entity_count(),
            category_counts: result.category_counts(),
        }
    }
}

pub fn file_name(language: Language) -> String {
    format!("{}_Comprehensibility_Report.json", language.report_name())
}

/// Format a run result as pretty-printed JSON.
pub fn format_report(result: &RunResult) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(result))?)
}

pub fn write_report(result: &RunResult, out_dir: &Path) -> Result<PathBuf, ReportError> {
    let path = out_dir.join(file_name(result.language));
    let json = format_report(result)?;
    std::fs::write(&path, json).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(path)
}
