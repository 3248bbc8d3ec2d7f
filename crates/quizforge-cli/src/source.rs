//! Quiz source loading.
//!
//! A source spec is either a filesystem path or an http(s) URL. The fetch
//! is single-shot: it resolves or fails once, and the caller decides how
//! visible the failure should be.

use std::path::Path;

use anyhow::{Context, Result};

use quizforge_core::model::QuizSource;
use quizforge_core::parser;

/// Load a quiz source from a path or URL.
pub async fn load_source(spec: &str) -> Result<QuizSource> {
    if spec.starts_with("http://") || spec.starts_with("https://") {
        fetch_source(spec).await
    } else {
        parser::parse_quiz(Path::new(spec))
    }
}

async fn fetch_source(url: &str) -> Result<QuizSource> {
    tracing::debug!(url, "fetching quiz source");
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("failed to fetch quiz source from {url}"))?;

    anyhow::ensure!(
        response.status().is_success(),
        "quiz source fetch failed: HTTP {} from {url}",
        response.status()
    );

    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read quiz source body from {url}"))?;

    parser::parse_quiz_str(&body, Path::new(url))
}
