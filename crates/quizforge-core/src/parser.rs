//! JSON quiz document parser.
//!
//! Loads quiz sources from JSON files and directories, converts between the
//! wire format and the typed model, and validates authored documents.
//!
//! The wire format is duck-typed (type-specific fields only sometimes
//! present), so parsing goes through raw intermediate structs and produces
//! the tagged [`QuestionKind`] model, where each kind carries only its own
//! fields.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Choice, Question, QuestionKind, QuizMeta, QuizSource};

/// Intermediate structure mirroring the JSON document shape.
#[derive(Debug, Serialize, Deserialize)]
struct RawQuizFile {
    #[serde(default)]
    meta: RawMeta,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeta {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    shuffle_questions: bool,
    #[serde(default)]
    show_correct_after_submit: bool,
    #[serde(default)]
    allow_review: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    question: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    points: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shuffle_options: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<RawChoice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    answer_text: Option<RawAnswerText>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawChoice {
    text: String,
    #[serde(default)]
    correct: bool,
}

/// `answerText` accepts either a single string or a list.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAnswerText {
    One(String),
    Many(Vec<String>),
}

impl RawAnswerText {
    fn into_vec(self) -> Vec<String> {
        match self {
            RawAnswerText::One(s) => vec![s],
            RawAnswerText::Many(v) => v,
        }
    }
}

/// Parse a JSON file into a `QuizSource`.
pub fn parse_quiz(path: &Path) -> Result<QuizSource> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a JSON string into a `QuizSource` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<QuizSource> {
    let parsed: RawQuizFile = serde_json::from_str(content)
        .with_context(|| format!("failed to parse quiz JSON: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(convert_question)
        .collect::<Result<Vec<_>>>()?;

    Ok(QuizSource {
        meta: QuizMeta {
            title: parsed.meta.title,
            description: parsed.meta.description,
            shuffle_questions: parsed.meta.shuffle_questions,
            show_correct_after_submit: parsed.meta.show_correct_after_submit,
            allow_review: parsed.meta.allow_review,
        },
        questions,
    })
}

fn convert_question(raw: RawQuestion) -> Result<Question> {
    let options = || -> Vec<Choice> {
        raw.options
            .as_ref()
            .map(|opts| {
                opts.iter()
                    .map(|o| Choice {
                        text: o.text.clone(),
                        correct: o.correct,
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    let kind = match raw.kind.as_str() {
        "single" => QuestionKind::Single {
            options: options(),
            shuffle_options: raw.shuffle_options.unwrap_or(false),
        },
        "multiple" => QuestionKind::Multiple {
            options: options(),
            shuffle_options: raw.shuffle_options.unwrap_or(false),
        },
        "short" | "short-text" => QuestionKind::Short {
            accepted: raw
                .answer_text
                .map(RawAnswerText::into_vec)
                .unwrap_or_default(),
        },
        "long" | "long-text" => QuestionKind::Long,
        other => anyhow::bail!("question '{}': unknown type '{other}'", raw.id),
    };

    let points = if raw.points < 0.0 {
        tracing::warn!(
            "question '{}': negative points ({}) clamped to 0",
            raw.id,
            raw.points
        );
        0.0
    } else {
        raw.points
    };

    Ok(Question {
        id: raw.id,
        prompt: raw.question,
        required: raw.required,
        points,
        kind,
    })
}

/// Serialize a `QuizSource` back into the wire format.
///
/// Runtime-only state never enters the model, so exporting and re-importing
/// a document reproduces an equivalent question set with identical
/// correctness flags.
pub fn quiz_to_json(source: &QuizSource) -> Result<String> {
    let raw = RawQuizFile {
        meta: RawMeta {
            title: source.meta.title.clone(),
            description: source.meta.description.clone(),
            shuffle_questions: source.meta.shuffle_questions,
            show_correct_after_submit: source.meta.show_correct_after_submit,
            allow_review: source.meta.allow_review,
        },
        questions: source.questions.iter().map(question_to_raw).collect(),
    };

    serde_json::to_string_pretty(&raw).context("failed to serialize quiz document")
}

fn question_to_raw(q: &Question) -> RawQuestion {
    let (shuffle_options, options, answer_text) = match &q.kind {
        QuestionKind::Single {
            options,
            shuffle_options,
        }
        | QuestionKind::Multiple {
            options,
            shuffle_options,
        } => (
            shuffle_options.then_some(true),
            Some(
                options
                    .iter()
                    .map(|o| RawChoice {
                        text: o.text.clone(),
                        correct: o.correct,
                    })
                    .collect(),
            ),
            None,
        ),
        QuestionKind::Short { accepted } => {
            (None, None, Some(RawAnswerText::Many(accepted.clone())))
        }
        QuestionKind::Long => (None, None, None),
    };

    RawQuestion {
        id: q.id.clone(),
        kind: q.kind_name().to_string(),
        question: q.prompt.clone(),
        required: q.required,
        points: q.points,
        shuffle_options,
        options,
        answer_text,
    }
}

/// Recursively load all `.json` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizSource>> {
    let mut sources = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sources.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match parse_quiz(&path) {
                Ok(source) => sources.push(source),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(sources)
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz source for common authoring issues.
pub fn validate_quiz(source: &QuizSource) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate question ids
    let mut seen_ids = std::collections::HashSet::new();
    for q in &source.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question id: {}", q.id),
            });
        }
    }

    for q in &source.questions {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "question prompt is empty".into(),
            });
        }

        if q.points < 0.0 {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("negative point value: {}", q.points),
            });
        }

        match &q.kind {
            QuestionKind::Single { options, .. } => {
                if options.is_empty() {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        message: "single-choice question has no options".into(),
                    });
                }
                let correct = options.iter().filter(|o| o.correct).count();
                if correct == 0 {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        message: "no option flagged correct; question cannot be graded".into(),
                    });
                } else if correct > 1 {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        message: format!(
                            "{correct} options flagged correct; only the first is used"
                        ),
                    });
                }
            }
            QuestionKind::Multiple { options, .. } => {
                if options.is_empty() {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        message: "multiple-choice question has no options".into(),
                    });
                } else if options.iter().all(|o| !o.correct) {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        message: "no option flagged correct; only an empty selection grades correct"
                            .into(),
                    });
                }
            }
            QuestionKind::Short { accepted } => {
                if accepted.iter().all(|s| s.trim().is_empty()) {
                    warnings.push(ValidationWarning {
                        question_id: Some(q.id.clone()),
                        message: "short-text question has no accepted answers".into(),
                    });
                }
            }
            QuestionKind::Long => {}
        }
    }

    warnings
}
