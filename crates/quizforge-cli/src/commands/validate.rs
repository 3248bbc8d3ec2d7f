//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::parser::{load_quiz_directory, parse_quiz, validate_quiz};

pub fn execute(source: PathBuf) -> Result<()> {
    let quizzes = if source.is_dir() {
        load_quiz_directory(&source)?
    } else {
        vec![parse_quiz(&source)?]
    };

    if quizzes.is_empty() {
        anyhow::bail!("no quiz files found in {}", source.display());
    }

    let mut total_warnings = 0;
    for quiz in &quizzes {
        let warnings = validate_quiz(quiz);
        let title = if quiz.meta.title.is_empty() {
            "(untitled)"
        } else {
            &quiz.meta.title
        };
        println!("{title}: {} questions", quiz.questions.len());
        for warning in &warnings {
            match &warning.question_id {
                Some(id) => println!("  [{id}] {}", warning.message),
                None => println!("  {}", warning.message),
            }
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("{total_warnings} warning(s) found.");
    }

    Ok(())
}
