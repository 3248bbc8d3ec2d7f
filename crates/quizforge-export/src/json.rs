//! Normalized JSON re-export of a question set.

use std::path::Path;

use anyhow::{Context, Result};

use quizforge_core::model::QuizSource;
use quizforge_core::parser;

/// Render a quiz source in the wire format.
pub fn quiz_json_string(source: &QuizSource) -> Result<String> {
    parser::quiz_to_json(source)
}

/// Write the quiz document to a file.
pub fn write_quiz_json(source: &QuizSource, path: &Path) -> Result<()> {
    let json = quiz_json_string(source)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write quiz to {}", path.display()))?;
    Ok(())
}
