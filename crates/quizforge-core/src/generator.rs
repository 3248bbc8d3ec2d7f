//! Quiz generation from plain text.
//!
//! Turns study material into a multiple-choice quiz by mining
//! definition-shaped sentences ("X is Y", "X allows Y", ...). Text
//! extraction from PDFs or other formats is the caller's concern; this
//! module only sees plain text.

use crate::model::{Choice, Question, QuestionKind, QuizMeta, QuizSource};

/// Minimum amount of source text worth mining.
const MIN_TEXT_LEN: usize = 200;

/// Maximum number of generated questions.
const MAX_QUESTIONS: usize = 10;

/// Copula/verb markers that signal a definition-shaped sentence.
const PATTERNS: &[&str] = &[" is ", " are ", " consists ", " allows ", " uses ", " serves "];

const DISTRACTORS: &[&str] = &[
    "An incorrect statement",
    "An unrelated concept",
    "A technology tool",
];

/// Generate a quiz from study text.
///
/// Returns `None` when the text is too short or yields no definition-shaped
/// sentences; callers surface that as a friendly message rather than an
/// error.
pub fn generate_quiz(text: &str, topic: &str) -> Option<QuizSource> {
    if text.trim().len() < MIN_TEXT_LEN {
        return None;
    }

    let questions: Vec<Question> = split_sentences(text)
        .into_iter()
        .filter(|s| s.len() > 60)
        .filter_map(split_definition)
        .take(MAX_QUESTIONS)
        .enumerate()
        .map(|(i, (subject, definition))| build_question(i, &subject, &definition))
        .collect();

    if questions.is_empty() {
        return None;
    }

    Some(QuizSource {
        meta: QuizMeta {
            title: format!("Auto-generated quiz ({topic})"),
            description: "Questions generated from study material.".into(),
            shuffle_questions: true,
            show_correct_after_submit: true,
            allow_review: true,
        },
        questions,
    })
}

fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '?', '!'])
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a sentence at the first definition marker into (subject,
/// definition). Sentences without a marker are dropped.
fn split_definition(sentence: String) -> Option<(String, String)> {
    let pos = PATTERNS
        .iter()
        .filter_map(|p| sentence.find(p).map(|i| (i, p.len())))
        .min_by_key(|(i, _)| *i)?;

    let subject = sentence[..pos.0].trim();
    let definition = sentence[pos.0 + pos.1..].trim();
    if subject.is_empty() || definition.is_empty() {
        return None;
    }
    Some((subject.to_string(), definition.to_string()))
}

fn build_question(index: usize, subject: &str, definition: &str) -> Question {
    let mut options = vec![Choice {
        text: definition.to_string(),
        correct: true,
    }];
    options.extend(DISTRACTORS.iter().map(|d| Choice {
        text: d.to_string(),
        correct: false,
    }));

    Question {
        id: format!("q{}", index + 1),
        prompt: format!("Which of the following best describes {subject}?"),
        required: true,
        points: 2.0,
        kind: QuestionKind::Multiple {
            options,
            shuffle_options: true,
        },
    }
}
