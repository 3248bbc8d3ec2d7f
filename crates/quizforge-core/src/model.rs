//! Core data model types for quizforge.
//!
//! These are the fundamental types the entire quizforge system uses to
//! represent questions, recorded answers, and quiz documents.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Quiz document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizMeta {
    /// Quiz title shown to the user.
    #[serde(default)]
    pub title: String,
    /// Longer description of the quiz.
    #[serde(default)]
    pub description: String,
    /// Whether the question order is randomized at session start.
    #[serde(default)]
    pub shuffle_questions: bool,
    /// Whether correct answers are revealed after submission.
    #[serde(default)]
    pub show_correct_after_submit: bool,
    /// Whether a per-question review is offered after submission.
    #[serde(default)]
    pub allow_review: bool,
}

/// A complete quiz document: metadata plus an ordered question list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSource {
    #[serde(default)]
    pub meta: QuizMeta,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A single immutable question definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the quiz.
    pub id: String,
    /// The prompt text shown to the user.
    pub prompt: String,
    /// Whether an answer is expected. Informational only; submission is
    /// never blocked on it.
    #[serde(default)]
    pub required: bool,
    /// Point value, non-negative.
    #[serde(default)]
    pub points: f64,
    /// Type-specific payload.
    pub kind: QuestionKind,
}

/// The four question types, each carrying only its relevant fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Pick exactly one option.
    Single {
        options: Vec<Choice>,
        #[serde(default)]
        shuffle_options: bool,
    },
    /// Pick any subset of options.
    Multiple {
        options: Vec<Choice>,
        #[serde(default)]
        shuffle_options: bool,
    },
    /// Free text matched against a set of accepted answers.
    Short { accepted: Vec<String> },
    /// Free text, never auto-graded.
    Long,
}

/// One selectable option of a `single` or `multiple` question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

impl Question {
    /// The option list, for choice-based kinds.
    pub fn options(&self) -> Option<&[Choice]> {
        match &self.kind {
            QuestionKind::Single { options, .. } | QuestionKind::Multiple { options, .. } => {
                Some(options)
            }
            QuestionKind::Short { .. } | QuestionKind::Long => None,
        }
    }

    /// Index of the first option flagged correct, if any.
    pub fn correct_index(&self) -> Option<usize> {
        self.options()?.iter().position(|o| o.correct)
    }

    /// The set of option indices flagged correct. Empty for non-choice kinds.
    pub fn correct_indices(&self) -> BTreeSet<usize> {
        self.options()
            .map(|opts| {
                opts.iter()
                    .enumerate()
                    .filter(|(_, o)| o.correct)
                    .map(|(i, _)| i)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether this question's options should be shuffled at session start.
    pub fn shuffle_options(&self) -> bool {
        match &self.kind {
            QuestionKind::Single {
                shuffle_options, ..
            }
            | QuestionKind::Multiple {
                shuffle_options, ..
            } => *shuffle_options,
            _ => false,
        }
    }

    /// The wire name of this question's type.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            QuestionKind::Single { .. } => "single",
            QuestionKind::Multiple { .. } => "multiple",
            QuestionKind::Short { .. } => "short",
            QuestionKind::Long => "long",
        }
    }
}

/// A recorded answer, polymorphic over question type.
///
/// Untagged so the persisted form stays `number | number[] | string`,
/// matching what presentation layers produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// Selected option index of a `single` question.
    Choice(usize),
    /// Selected option indices of a `multiple` question.
    Choices(BTreeSet<usize>),
    /// Trimmed text of a `short` or `long` question.
    Text(String),
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Choice(i) => write!(f, "#{i}"),
            Answer::Choices(set) => {
                let joined: Vec<String> = set.iter().map(|i| format!("#{i}")).collect();
                write!(f, "{}", joined.join(", "))
            }
            Answer::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A raw answer as produced by a presentation layer, before normalization.
#[derive(Debug, Clone)]
pub enum RawAnswer {
    /// Radio-style selection; `None` means the selection was cleared.
    Selection(Option<usize>),
    /// Checkbox-style selection; may contain duplicates, may be empty.
    Selections(Vec<usize>),
    /// Free text; may carry surrounding whitespace.
    Text(String),
}

/// The durable session state blob.
///
/// The stored question count is the sole compatibility check applied on
/// restore; there is no schema version field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The working question sequence, including any materialized shuffle
    /// order.
    pub questions: Vec<Question>,
    /// Current position in the sequence.
    pub index: usize,
    /// Recorded answers keyed by question id.
    pub answers: std::collections::HashMap<String, Answer>,
    /// Whether the attempt has been submitted.
    pub submitted: bool,
}
