//! The `quizforge init` command: drop starter files into the current
//! directory so a new user has something to run immediately.

use std::path::Path;

use anyhow::{Context, Result};

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

# Directory holding persisted session progress
state_dir = "./quizforge-state"

# Directory for score reports
output_dir = "./quizforge-results"

# Default report formats on submit: json, csv (comma-separated)
format = "json"
"#;

const EXAMPLE_QUIZ: &str = r#"{
  "meta": {
    "title": "Getting started",
    "description": "A tiny example quiz.",
    "shuffleQuestions": false,
    "showCorrectAfterSubmit": true,
    "allowReview": true
  },
  "questions": [
    {
      "id": "q1",
      "type": "single",
      "question": "Which command starts an interactive quiz?",
      "points": 1,
      "options": [
        { "text": "quizforge validate", "correct": false },
        { "text": "quizforge take", "correct": true },
        { "text": "quizforge export", "correct": false }
      ]
    },
    {
      "id": "q2",
      "type": "short",
      "question": "What format are quiz files written in?",
      "points": 1,
      "answerText": ["json"]
    },
    {
      "id": "q3",
      "type": "long",
      "question": "What would you like to learn next?",
      "points": 0
    }
  ]
}
"#;

fn write_if_absent(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        println!("{} already exists, skipping", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(true)
}

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("quizforge.toml"), SAMPLE_CONFIG)?;
    write_if_absent(Path::new("quizzes/example.json"), EXAMPLE_QUIZ)?;

    println!();
    println!("Next steps:");
    println!("  quizforge validate --source quizzes/example.json");
    println!("  quizforge take --source quizzes/example.json");

    Ok(())
}
