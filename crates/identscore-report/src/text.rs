use colored::{ColoredString, Colorize};

use identscore_core::scorer::ScoreBreakdown;
use identscore_core::types::{Readability, RunResult};

fn colored_score(score: f64, category: Readability) -> ColoredString {
    let s = format!("{score:.2}");
    match category {
        Readability::WellReadable => s.green(),
        Readability::ModerateReadable => s.yellow(),
        Readability::NonReadable => s.red(),
    }
}

/// Format a run summary for terminal output.
pub fn format_report(result: &RunResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}\n",
        format!("identscore - {} Identifier Comprehensibility", result.language.report_name())
            .bold()
    ));
    out.push_str(&format!("{}\n\n", "=".repeat(50)));

    out.push_str(&format!("{}\n{}\n", "Files".bold(), "-".repeat(50)));
    for file in &result.file_results {
        let category = Readability::from_score(file.average_score);
        out.push_str(&format!(
            "  {}  {} ({} entities)\n",
            colored_score(file.average_score, category),
            file.path.display(),
            file.entities.len(),
        ));
    }

    let counts = result.category_counts();
    out.push_str(&format!(
        "\n{}: {} entities in {} files\n",
        "Summary".bold(),
        counts.total(),
        result.file_results.len(),
    ));
    out.push_str(&format!(
        "  {:<18} {}\n",
        Readability::WellReadable.to_string(),
        counts.well_readable.to_string().green()
    ));
    out.push_str(&format!(
        "  {:<18} {}\n",
        Readability::ModerateReadable.to_string(),
        counts.moderate_readable.to_string().yellow()
    ));
    out.push_str(&format!(
        "  {:<18} {}\n",
        Readability::NonReadable.to_string(),
        counts.non_readable.to_string().red()
    ));

    let overall = Readability::from_score(result.overall_average);
    out.push_str(&format!(
        "\n{}: {}\n",
        "Average Comprehensibility Score".bold(),
        colored_score(result.overall_average, overall)
    ));

    out
}

/// Format the sub-word breakdown of a single identifier.
pub fn format_breakdown(identifier: &str, breakdown: &ScoreBreakdown) -> String {
    let mut out = format!(
        "{}  {} ({})\n",
        identifier.bold(),
        colored_score(breakdown.score, breakdown.category),
        breakdown.category
    );
    if breakdown.segments.is_empty() {
        out.push_str("  (no scorable sub-words)\n");
    }
    for segment in &breakdown.segments {
        let words: Vec<String> = segment
            .iter()
            .map(|(word, score)| format!("{word}={score:.1}"))
            .collect();
        out.push_str(&format!("  {}\n", words.join(" ")));
    }
    out
}
