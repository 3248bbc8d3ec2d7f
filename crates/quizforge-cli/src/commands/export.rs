//! The `quizforge export` command: fetch a quiz from any source and
//! re-serialize it as normalized quiz JSON.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_export::json::write_quiz_json;

use crate::source::load_source;

pub async fn execute(source_spec: String, output: PathBuf) -> Result<()> {
    let source = load_source(&source_spec).await?;
    write_quiz_json(&source, &output)?;
    println!(
        "Exported {} questions to {}",
        source.questions.len(),
        output.display()
    );
    Ok(())
}
