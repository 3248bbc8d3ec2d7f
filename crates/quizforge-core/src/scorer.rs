//! Scoring and per-question review reports.
//!
//! [`score`] walks the session's question sequence once, in order, so
//! review reports are deterministic and submitting twice yields identical
//! results for unchanged answers.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matcher;
use crate::model::{Answer, Question, QuestionKind};
use crate::session::Session;

/// The outcome of scoring one quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Quiz title, for display.
    pub title: String,
    /// Points earned across all graded questions.
    pub earned_points: f64,
    /// Maximum points across all questions, graded or not.
    pub max_points: f64,
    /// Per-question review rows, in presentation order.
    pub entries: Vec<ReviewEntry>,
}

/// One row of the per-question review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub question_id: String,
    pub prompt: String,
    pub points: f64,
    /// Whether a usable answer was recorded. False also covers recorded
    /// indices that no longer fit the option list.
    pub answered: bool,
    /// Human-readable text of the chosen answer, when one exists.
    pub chosen: Option<String>,
    /// Human-readable text of the correct answer; `None` when the question
    /// defines none (authoring error or ungraded type).
    pub expected: Option<String>,
    /// Matcher verdict; `None` means ungraded.
    pub verdict: Option<bool>,
}

impl ScoreReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScoreReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// Score a session: accumulate earned/max points and build the review rows.
///
/// Pure with respect to the session; repeat calls with unchanged answers
/// produce identical totals.
pub fn score(session: &Session) -> ScoreReport {
    let mut earned = 0.0;
    let mut max = 0.0;
    let mut entries = Vec::with_capacity(session.len());

    for question in session.questions() {
        max += question.points;

        let answer = session.answer(&question.id);
        let verdict = matcher::grade(question, answer);
        if verdict == Some(true) {
            earned += question.points;
        }

        let chosen = answer.and_then(|a| chosen_text(question, a));
        entries.push(ReviewEntry {
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            points: question.points,
            answered: chosen.is_some(),
            chosen,
            expected: expected_text(question),
            verdict,
        });
    }

    ScoreReport {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        title: session.meta().title.clone(),
        earned_points: earned,
        max_points: max,
        entries,
    }
}

/// Render the recorded answer as option/answer text. `None` when a recorded
/// index no longer fits the option list (e.g. after a stale restore), which
/// the review shows as "not answered" instead of indexing out of bounds.
fn chosen_text(question: &Question, answer: &Answer) -> Option<String> {
    let options = question.options();
    match answer {
        Answer::Choice(i) => options?.get(*i).map(|o| o.text.clone()),
        Answer::Choices(set) => {
            let options = options?;
            if set.is_empty() || set.iter().any(|&i| i >= options.len()) {
                return None;
            }
            Some(
                set.iter()
                    .map(|&i| options[i].text.clone())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        }
        Answer::Text(s) => Some(s.clone()),
    }
}

/// Render the defined correct answer, when the question has one.
fn expected_text(question: &Question) -> Option<String> {
    match &question.kind {
        QuestionKind::Single { options, .. } => {
            options.iter().find(|o| o.correct).map(|o| o.text.clone())
        }
        QuestionKind::Multiple { options, .. } => {
            let correct: Vec<String> = options
                .iter()
                .filter(|o| o.correct)
                .map(|o| o.text.clone())
                .collect();
            if correct.is_empty() {
                None
            } else {
                Some(correct.join("; "))
            }
        }
        QuestionKind::Short { accepted } => {
            if accepted.is_empty() {
                None
            } else {
                Some(accepted.join(" / "))
            }
        }
        QuestionKind::Long => None,
    }
}
