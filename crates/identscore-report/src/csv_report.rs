use std::io;
use std::path::{Path, PathBuf};

use identscore_core::types::{Language, RunResult};

use crate::ReportError;

const DETAILED_HEADER: [&str; 5] = [
    "File Path",
    "Entity Name",
    "Entity Type",
    "Comprehensibility Score",
    "Comprehensibility Category",
];

const SUMMARY_HEADER: [&str; 2] = ["File Path", "Comprehensibility Score"];

/// Label of the final summary row.
const OVERALL_LABEL: &str = "Average Comprehensibility Score";

pub fn detailed_file_name(language: Language) -> String {
    format!("{}_Detailed_Comprehensibility_Report.csv", language.report_name())
}

pub fn summary_file_name(language: Language) -> String {
    format!("{}_Summary_Comprehensibility_Report.csv", language.report_name())
}

fn score_cell(score: f64) -> String {
    format!("{score:.2}")
}

/// One row per file with its average, followed by one row per entity.
pub fn write_detailed_to<W: io::Write>(result: &RunResult, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(DETAILED_HEADER)?;

    for file in &result.file_results {
        writer.write_record([
            file.path.display().to_string().as_str(),
            "",
            "",
            score_cell(file.average_score).as_str(),
            "",
        ])?;
        for scored in &file.entities {
            writer.write_record([
                "",
                scored.entity.name.as_str(),
                scored.entity.kind.label(result.language),
                score_cell(scored.score).as_str(),
                scored.category.to_string().as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// One row per file average, then the overall average.
pub fn write_summary_to<W: io::Write>(result: &RunResult, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(SUMMARY_HEADER)?;

    for file in &result.file_results {
        writer.write_record([
            file.path.display().to_string(),
            score_cell(file.average_score),
        ])?;
    }
    writer.write_record([OVERALL_LABEL.to_string(), score_cell(result.overall_average)])?;

    writer.flush()?;
    Ok(())
}

pub fn format_detailed(result: &RunResult) -> String {
    let mut buf = Vec::new();
    // Writing into memory cannot fail for I/O reasons.
    if let Err(e) = write_detailed_to(result, &mut buf) {
        tracing::warn!("failed to format detailed report: {e}");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn format_summary(result: &RunResult) -> String {
    let mut buf = Vec::new();
    if let Err(e) = write_summary_to(result, &mut buf) {
        tracing::warn!("failed to format summary report: {e}");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_file<F>(path: PathBuf, write: F) -> Result<PathBuf, ReportError>
where
    F: FnOnce(std::fs::File) -> Result<(), csv::Error>,
{
    let file = std::fs::File::create(&path).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    write(file).map_err(|source| ReportError::Csv {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(path)
}

pub fn write_detailed(result: &RunResult, out_dir: &Path) -> Result<PathBuf, ReportError> {
    let path = out_dir.join(detailed_file_name(result.language));
    write_file(path, |file| write_detailed_to(result, file))
}

pub fn write_summary(result: &RunResult, out_dir: &Path) -> Result<PathBuf, ReportError> {
    let path = out_dir.join(summary_file_name(result.language));
    write_file(path, |file| write_summary_to(result, file))
}
