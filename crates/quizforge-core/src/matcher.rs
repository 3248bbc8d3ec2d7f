//! Answer matching rules.
//!
//! Stateless correctness checks per question type. `None` means "not
//! gradeable": long-text questions are never auto-scored, and a choice
//! question with no option flagged correct has no defined right answer.

use std::collections::BTreeSet;

use crate::model::{Answer, Question, QuestionKind};

/// Normalize a free-text answer for comparison: trim and lowercase.
pub fn normalize_answer_text(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Decide whether `answer` is correct for `question`.
///
/// Returns `Some(true)` / `Some(false)` for gradeable questions and `None`
/// where no verdict is defined. Out-of-range or wrong-shaped answers grade
/// as incorrect, never as a fault.
pub fn grade(question: &Question, answer: Option<&Answer>) -> Option<bool> {
    match &question.kind {
        QuestionKind::Single { options, .. } => {
            let correct = options.iter().position(|o| o.correct)?;
            let chosen = match answer {
                Some(Answer::Choice(i)) => Some(*i),
                _ => None,
            };
            Some(chosen == Some(correct))
        }
        QuestionKind::Multiple { options, .. } => {
            if options.iter().all(|o| !o.correct) {
                return None;
            }
            let correct: BTreeSet<usize> = options
                .iter()
                .enumerate()
                .filter(|(_, o)| o.correct)
                .map(|(i, _)| i)
                .collect();
            let chosen = match answer {
                Some(Answer::Choices(set)) => set.clone(),
                _ => BTreeSet::new(),
            };
            // Exact set equality; partial credit is explicitly not awarded.
            Some(chosen == correct)
        }
        QuestionKind::Short { accepted } => {
            let submitted = match answer {
                Some(Answer::Text(s)) => normalize_answer_text(s),
                _ => return Some(false),
            };
            if submitted.is_empty() {
                return Some(false);
            }
            Some(
                accepted
                    .iter()
                    .any(|a| normalize_answer_text(a) == submitted),
            )
        }
        QuestionKind::Long => None,
    }
}
