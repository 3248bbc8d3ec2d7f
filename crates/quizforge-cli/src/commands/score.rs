//! The `quizforge score` command: grade a persisted attempt without
//! re-entering the interactive session.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::scorer::score;
use quizforge_core::session::{Session, SessionOptions};
use quizforge_store::{FileStore, SnapshotStore};

use crate::commands::{print_review, print_summary, write_reports};
use crate::config::load_config_from;
use crate::source::load_source;

pub async fn execute(
    source_spec: String,
    state_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let state_dir = state_dir.unwrap_or(config.state_dir);
    let output = output.unwrap_or(config.output_dir);
    let format = format.unwrap_or(config.format);

    let source = load_source(&source_spec).await?;

    // Starting a session over the same state directory restores the
    // persisted answers; grading does not require a prior submit.
    let store = SnapshotStore::new(FileStore::new(&state_dir));
    let session = Session::start(source, SessionOptions::default(), Box::new(store));

    let report = score(&session);
    print_summary(&report);
    print_review(&report, session.meta().show_correct_after_submit);
    write_reports(&report, &output, &format)?;

    Ok(())
}
