pub mod export;
pub mod generate;
pub mod init;
pub mod score;
pub mod take;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::scorer::ScoreReport;
use quizforge_export::csv::write_csv_report;

/// Print the post-submit summary table.
pub fn print_summary(report: &ScoreReport) {
    let mut table = Table::new();
    table.set_header(vec!["Questions", "Answered", "Score", "Max", "Percent"]);

    let answered = report.entries.iter().filter(|e| e.answered).count();
    let percent = if report.max_points > 0.0 {
        report.earned_points / report.max_points * 100.0
    } else {
        0.0
    };
    table.add_row(vec![
        Cell::new(report.entries.len()),
        Cell::new(answered),
        Cell::new(format!("{:.1}", report.earned_points)),
        Cell::new(format!("{:.1}", report.max_points)),
        Cell::new(format!("{percent:.1}%")),
    ]);

    println!("\n{table}");
    println!(
        "Score: {:.1} / {:.1} points",
        report.earned_points, report.max_points
    );
}

/// Print the per-question review.
pub fn print_review(report: &ScoreReport, show_correct: bool) {
    println!("\nReview:");
    for (i, entry) in report.entries.iter().enumerate() {
        let verdict = match entry.verdict {
            Some(true) => "correct",
            Some(false) => "incorrect",
            None => "ungraded",
        };
        println!("  {}. {} [{verdict}]", i + 1, entry.prompt);
        println!(
            "     your answer: {}",
            entry.chosen.as_deref().unwrap_or("Not answered")
        );
        if show_correct && entry.verdict == Some(false) {
            println!(
                "     correct answer: {}",
                entry.expected.as_deref().unwrap_or("undefined")
            );
        }
    }
}

/// Write the report in each requested format under `output`.
pub fn write_reports(report: &ScoreReport, output: &Path, formats: &str) -> Result<()> {
    std::fs::create_dir_all(output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    for fmt in formats.split(',').map(str::trim) {
        match fmt {
            "json" => {
                let path = output.join(format!("attempt-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            "csv" => {
                let path = output.join(format!("attempt-{timestamp}.csv"));
                write_csv_report(report, &path)?;
                eprintln!("CSV review saved to: {}", path.display());
            }
            other => {
                eprintln!("Unknown format: {other}");
            }
        }
    }

    Ok(())
}
