//! CSV review export.
//!
//! One row per question: prompt, chosen answer text, correct answer text,
//! and the verdict.

use std::path::Path;

use anyhow::{Context, Result};

use quizforge_core::scorer::ScoreReport;

const NOT_ANSWERED: &str = "Not answered";
const UNDEFINED: &str = "undefined";

/// Quote a field for CSV when it contains a delimiter, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn verdict_label(verdict: Option<bool>) -> &'static str {
    match verdict {
        Some(true) => "Correct",
        Some(false) => "Incorrect",
        None => "Ungraded",
    }
}

/// Render a score report as CSV text.
pub fn review_csv(report: &ScoreReport) -> String {
    let mut out = String::from("Question,Your answer,Correct answer,Result\n");

    for entry in &report.entries {
        let chosen = entry.chosen.as_deref().unwrap_or(NOT_ANSWERED);
        let expected = entry.expected.as_deref().unwrap_or(UNDEFINED);
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_escape(&entry.prompt),
            csv_escape(chosen),
            csv_escape(expected),
            verdict_label(entry.verdict),
        ));
    }

    out
}

/// Write the CSV review to a file.
pub fn write_csv_report(report: &ScoreReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, review_csv(report))
        .with_context(|| format!("failed to write CSV report to {}", path.display()))?;
    Ok(())
}
