//! The `quizforge generate` command: build a quiz from plain study text.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_core::generator::generate_quiz;
use quizforge_export::json::write_quiz_json;

pub fn execute(input: PathBuf, topic: String, output: PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read input text: {}", input.display()))?;

    let Some(quiz) = generate_quiz(&text, &topic) else {
        anyhow::bail!(
            "could not generate a quiz from {}: the text is too short or has no \
             definition-shaped sentences",
            input.display()
        );
    };

    write_quiz_json(&quiz, &output)?;
    println!(
        "Generated {} questions from {} into {}",
        quiz.questions.len(),
        input.display(),
        output.display()
    );
    Ok(())
}
