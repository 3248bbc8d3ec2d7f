//! Quiz session state machine.
//!
//! A [`Session`] owns the working question sequence for one attempt: the
//! (possibly shuffled) questions, the current position, the recorded answer
//! map, and the submitted flag. Navigation and answer recording mutate it;
//! answer recording writes through to the [`ProgressStore`] so an attempt
//! survives reloads.
//!
//! Shuffling happens exactly once, at initialization, and the resulting
//! order is part of the persisted snapshot. Recomputing the order later
//! (e.g. per render) would silently desynchronize recorded answer indices
//! from displayed options, so the restored sequence is adopted verbatim.

use std::collections::{BTreeSet, HashMap};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{
    Answer, Question, QuestionKind, QuizMeta, QuizSource, RawAnswer, SessionSnapshot,
};
use crate::traits::ProgressStore;

/// Configuration flags for session initialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Shuffle the question order even when the quiz metadata does not ask
    /// for it.
    pub force_shuffle: bool,
}

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// The mutable runtime state of one quiz attempt.
pub struct Session {
    meta: QuizMeta,
    /// Original source order, used by `reset`.
    source_questions: Vec<Question>,
    /// Working sequence for this attempt (post shuffle / restore).
    questions: Vec<Question>,
    index: usize,
    answers: HashMap<String, Answer>,
    submitted: bool,
    options: SessionOptions,
    store: Box<dyn ProgressStore>,
}

impl Session {
    /// Initialize a session from a quiz source, restoring persisted progress
    /// when a compatible snapshot exists.
    pub fn start(source: QuizSource, options: SessionOptions, store: Box<dyn ProgressStore>) -> Self {
        Self::start_with_rng(source, options, store, &mut rand::thread_rng())
    }

    /// Like [`Session::start`], with an explicit RNG for deterministic
    /// shuffling.
    pub fn start_with_rng<R: Rng>(
        source: QuizSource,
        options: SessionOptions,
        store: Box<dyn ProgressStore>,
        rng: &mut R,
    ) -> Self {
        let mut session = Session {
            meta: source.meta,
            source_questions: source.questions,
            questions: Vec::new(),
            index: 0,
            answers: HashMap::new(),
            submitted: false,
            options,
            store,
        };
        session.questions = build_sequence(
            &session.source_questions,
            session.meta.shuffle_questions || options.force_shuffle,
            rng,
        );
        session.restore();
        session
    }

    /// Adopt a persisted snapshot when its question count matches the
    /// freshly built sequence; otherwise discard it as stale.
    fn restore(&mut self) {
        let Some(snapshot) = self.store.load() else {
            return;
        };

        if snapshot.questions.len() != self.questions.len() {
            tracing::warn!(
                stored = snapshot.questions.len(),
                current = self.questions.len(),
                "persisted state question count mismatch, discarding"
            );
            if let Err(e) = self.store.clear() {
                tracing::warn!("failed to clear stale persisted state: {e}");
            }
            return;
        }

        // The snapshot carries the shuffle order the user last saw; adopting
        // it keeps recorded answer indices aligned with displayed options.
        self.questions = snapshot.questions;
        self.answers = snapshot.answers;
        self.index = snapshot.index.min(self.questions.len().saturating_sub(1));
        self.submitted = snapshot.submitted;
        tracing::debug!(
            answers = self.answers.len(),
            index = self.index,
            "restored persisted session state"
        );
    }

    /// Move one question in `direction`, clamped at the sequence bounds.
    /// Returns whether the position changed.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Prev => self.prev(),
            Direction::Next => self.next(),
        }
    }

    /// Move to the previous question. No-op at index 0.
    pub fn prev(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Move to the next question. No-op at the last index.
    pub fn next(&mut self) -> bool {
        if self.index + 1 >= self.questions.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Record (or clear) the answer for `question_id` and persist the full
    /// session state.
    ///
    /// The raw value is normalized per the target question's type; empty
    /// selections and blank text remove the entry rather than leaving a
    /// stale value. A persistence failure is logged and swallowed: the
    /// in-memory state stays authoritative for this session.
    pub fn record_answer(&mut self, question_id: &str, raw: RawAnswer) {
        let Some(question) = self.questions.iter().find(|q| q.id == question_id) else {
            tracing::warn!("ignoring answer for unknown question '{question_id}'");
            return;
        };

        let normalized = match (&question.kind, raw) {
            (QuestionKind::Single { .. }, RawAnswer::Selection(choice)) => {
                choice.map(Answer::Choice)
            }
            (QuestionKind::Multiple { .. }, RawAnswer::Selections(indices)) => {
                let set: BTreeSet<usize> = indices.into_iter().collect();
                if set.is_empty() {
                    None
                } else {
                    Some(Answer::Choices(set))
                }
            }
            (QuestionKind::Short { .. } | QuestionKind::Long, RawAnswer::Text(text)) => {
                let trimmed = text.trim().to_string();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Answer::Text(trimmed))
                }
            }
            (_, raw) => {
                tracing::warn!(
                    "answer shape {raw:?} does not fit {} question '{question_id}', ignoring",
                    question.kind_name()
                );
                return;
            }
        };

        match normalized {
            Some(answer) => {
                self.answers.insert(question_id.to_string(), answer);
            }
            None => {
                self.answers.remove(question_id);
            }
        }

        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.snapshot()) {
            tracing::warn!("progress not saved, continuing with in-memory state: {e}");
        }
    }

    /// Mark the attempt as submitted. Idempotent: submitting again simply
    /// re-scores.
    pub fn submit(&mut self) {
        self.submitted = true;
    }

    /// Clear persisted storage and reinitialize from the original source,
    /// discarding all in-memory answers.
    pub fn reset(&mut self) {
        self.reset_with_rng(&mut rand::thread_rng());
    }

    /// Like [`Session::reset`], with an explicit RNG.
    pub fn reset_with_rng<R: Rng>(&mut self, rng: &mut R) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear persisted state on reset: {e}");
        }
        self.questions = build_sequence(
            &self.source_questions,
            self.meta.shuffle_questions || self.options.force_shuffle,
            rng,
        );
        self.index = 0;
        self.answers.clear();
        self.submitted = false;
    }

    /// The current question, or `None` for an empty session.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Current position, or `None` for an empty session.
    pub fn index(&self) -> Option<usize> {
        if self.questions.is_empty() {
            None
        } else {
            Some(self.index)
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The working question sequence in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The recorded answer for a question, if any.
    pub fn answer(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Number of questions with a recorded answer.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn meta(&self) -> &QuizMeta {
        &self.meta
    }

    /// Total points across the working sequence.
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// The persistable view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            questions: self.questions.clone(),
            index: self.index,
            answers: self.answers.clone(),
            submitted: self.submitted,
        }
    }
}

/// Build the working sequence: optionally permute the question order, and
/// materialize each question's own option permutation where requested.
fn build_sequence<R: Rng>(source: &[Question], shuffle: bool, rng: &mut R) -> Vec<Question> {
    let mut questions = source.to_vec();

    if shuffle {
        questions.shuffle(rng);
    }

    for q in &mut questions {
        if q.shuffle_options() {
            match &mut q.kind {
                QuestionKind::Single { options, .. } | QuestionKind::Multiple { options, .. } => {
                    options.shuffle(rng);
                }
                _ => {}
            }
        }
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::model::{Choice, QuizSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::{Arc, Mutex};

    /// Shared in-memory store so tests can simulate a reload by handing the
    /// same backing cell to a second session.
    #[derive(Clone, Default)]
    struct TestStore {
        cell: Arc<Mutex<Option<SessionSnapshot>>>,
        fail_saves: bool,
    }

    impl ProgressStore for TestStore {
        fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
            if self.fail_saves {
                return Err(StoreError::Unavailable("test store down".into()));
            }
            *self.cell.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }

        fn load(&self) -> Option<SessionSnapshot> {
            self.cell.lock().unwrap().clone()
        }

        fn clear(&self) -> Result<(), StoreError> {
            *self.cell.lock().unwrap() = None;
            Ok(())
        }
    }

    fn choice(text: &str, correct: bool) -> Choice {
        Choice {
            text: text.into(),
            correct,
        }
    }

    fn question(id: &str, kind: QuestionKind) -> Question {
        Question {
            id: id.into(),
            prompt: format!("prompt {id}"),
            required: false,
            points: 1.0,
            kind,
        }
    }

    fn three_question_source() -> QuizSource {
        QuizSource {
            meta: QuizMeta::default(),
            questions: vec![
                question(
                    "q1",
                    QuestionKind::Single {
                        options: vec![choice("a", false), choice("b", true)],
                        shuffle_options: false,
                    },
                ),
                question(
                    "q2",
                    QuestionKind::Multiple {
                        options: vec![choice("x", true), choice("y", true), choice("z", false)],
                        shuffle_options: false,
                    },
                ),
                question(
                    "q3",
                    QuestionKind::Short {
                        accepted: vec!["22".into()],
                    },
                ),
            ],
        }
    }

    fn start(source: QuizSource, store: TestStore) -> Session {
        Session::start(source, SessionOptions::default(), Box::new(store))
    }

    #[test]
    fn starts_fresh_without_persisted_state() {
        let session = start(three_question_source(), TestStore::default());
        assert_eq!(session.index(), Some(0));
        assert_eq!(session.answered_count(), 0);
        assert!(!session.submitted());
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn empty_source_has_no_index() {
        let session = start(
            QuizSource {
                meta: QuizMeta::default(),
                questions: vec![],
            },
            TestStore::default(),
        );
        assert_eq!(session.index(), None);
        assert!(session.current().is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn navigation_clamps_at_bounds() {
        let mut session = start(three_question_source(), TestStore::default());

        assert!(!session.prev(), "prev at index 0 must be a no-op");
        assert_eq!(session.index(), Some(0));

        assert!(session.next());
        assert!(session.next());
        assert_eq!(session.index(), Some(2));

        assert!(!session.next(), "next at last index must be a no-op");
        assert_eq!(session.index(), Some(2));

        // Index stays in bounds under arbitrary navigation
        for _ in 0..10 {
            session.navigate(Direction::Prev);
        }
        assert_eq!(session.index(), Some(0));
    }

    #[test]
    fn navigation_on_empty_session_is_a_noop() {
        let mut session = start(
            QuizSource {
                meta: QuizMeta::default(),
                questions: vec![],
            },
            TestStore::default(),
        );
        assert!(!session.next());
        assert!(!session.prev());
        assert_eq!(session.index(), None);
    }

    #[test]
    fn record_answer_normalizes_by_kind() {
        let mut session = start(three_question_source(), TestStore::default());

        session.record_answer("q1", RawAnswer::Selection(Some(1)));
        assert_eq!(session.answer("q1"), Some(&Answer::Choice(1)));

        session.record_answer("q2", RawAnswer::Selections(vec![1, 0, 1]));
        assert_eq!(
            session.answer("q2"),
            Some(&Answer::Choices([0, 1].into_iter().collect()))
        );

        session.record_answer("q3", RawAnswer::Text("  22 ".into()));
        assert_eq!(session.answer("q3"), Some(&Answer::Text("22".into())));
    }

    #[test]
    fn clearing_answers_removes_entries() {
        let mut session = start(three_question_source(), TestStore::default());

        session.record_answer("q1", RawAnswer::Selection(Some(0)));
        session.record_answer("q1", RawAnswer::Selection(None));
        assert_eq!(session.answer("q1"), None);

        session.record_answer("q2", RawAnswer::Selections(vec![2]));
        session.record_answer("q2", RawAnswer::Selections(vec![]));
        assert_eq!(session.answer("q2"), None);

        session.record_answer("q3", RawAnswer::Text("22".into()));
        session.record_answer("q3", RawAnswer::Text("   ".into()));
        assert_eq!(session.answer("q3"), None);
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn unknown_question_id_is_ignored() {
        let mut session = start(three_question_source(), TestStore::default());
        session.record_answer("nope", RawAnswer::Text("x".into()));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn recorded_answer_survives_reload() {
        let store = TestStore::default();

        let mut session = start(three_question_source(), store.clone());
        session.next();
        session.record_answer("q3", RawAnswer::Text("22".into()));

        // Simulate a reload: a new session over the same backing store
        let restored = start(three_question_source(), store);
        assert_eq!(restored.answer("q3"), Some(&Answer::Text("22".into())));
        // The index current at recording time comes back too
        assert_eq!(restored.index(), Some(1));
    }

    #[test]
    fn stale_snapshot_is_discarded_on_count_mismatch() {
        let store = TestStore::default();

        let mut session = start(three_question_source(), store.clone());
        session.record_answer("q1", RawAnswer::Selection(Some(1)));

        // Reload against a source with a different question count
        let mut shrunk = three_question_source();
        shrunk.questions.pop();
        let restored = start(shrunk, store.clone());

        assert_eq!(restored.answered_count(), 0);
        assert_eq!(restored.index(), Some(0));
        assert!(!restored.submitted());
        // The stale blob was cleared, not just ignored
        assert!(store.cell.lock().unwrap().is_none());
    }

    #[test]
    fn shuffled_order_is_persisted_and_restored() {
        let store = TestStore::default();
        let mut source = three_question_source();
        source.meta.shuffle_questions = true;

        let mut rng = StdRng::seed_from_u64(7);
        let mut session = Session::start_with_rng(
            source.clone(),
            SessionOptions::default(),
            Box::new(store.clone()),
            &mut rng,
        );
        // An answer write captures the shuffled sequence in the snapshot
        session.record_answer("q1", RawAnswer::Selection(Some(1)));
        let order: Vec<String> = session.questions().iter().map(|q| q.id.clone()).collect();

        // A reload with a different RNG still sees the order the user saw
        let mut other_rng = StdRng::seed_from_u64(999);
        let restored = Session::start_with_rng(
            source,
            SessionOptions::default(),
            Box::new(store),
            &mut other_rng,
        );
        let restored_order: Vec<String> =
            restored.questions().iter().map(|q| q.id.clone()).collect();
        assert_eq!(restored_order, order);
    }

    #[test]
    fn option_shuffle_is_materialized_once() {
        let source = QuizSource {
            meta: QuizMeta::default(),
            questions: vec![question(
                "q1",
                QuestionKind::Single {
                    options: (0..8)
                        .map(|i| choice(&format!("opt{i}"), i == 0))
                        .collect(),
                    shuffle_options: true,
                },
            )],
        };

        let mut rng = StdRng::seed_from_u64(3);
        let session = Session::start_with_rng(
            source,
            SessionOptions::default(),
            Box::new(TestStore::default()),
            &mut rng,
        );

        // The permuted order is stored on the question itself; reading it
        // twice yields the same order.
        let first: Vec<String> = session.current().unwrap().options().unwrap()
            .iter()
            .map(|o| o.text.clone())
            .collect();
        let second: Vec<String> = session.current().unwrap().options().unwrap()
            .iter()
            .map(|o| o.text.clone())
            .collect();
        assert_eq!(first, second);
        // The correct flag moved with its option text
        let correct = session.current().unwrap().correct_index().unwrap();
        assert_eq!(session.current().unwrap().options().unwrap()[correct].text, "opt0");
    }

    #[test]
    fn restored_index_is_clamped() {
        let store = TestStore::default();
        *store.cell.lock().unwrap() = Some(SessionSnapshot {
            questions: three_question_source().questions,
            index: 99,
            answers: HashMap::new(),
            submitted: false,
        });

        let session = start(three_question_source(), store);
        assert_eq!(session.index(), Some(2));
    }

    #[test]
    fn submit_is_idempotent() {
        let mut session = start(three_question_source(), TestStore::default());
        session.submit();
        assert!(session.submitted());
        session.submit();
        assert!(session.submitted());
    }

    #[test]
    fn reset_clears_storage_and_answers() {
        let store = TestStore::default();
        let mut session = start(three_question_source(), store.clone());
        session.next();
        session.record_answer("q1", RawAnswer::Selection(Some(1)));
        session.submit();

        session.reset();

        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.index(), Some(0));
        assert!(!session.submitted());
        assert!(store.cell.lock().unwrap().is_none());
    }

    #[test]
    fn save_failure_keeps_in_memory_state() {
        let store = TestStore {
            fail_saves: true,
            ..TestStore::default()
        };
        let mut session = start(three_question_source(), store);
        session.record_answer("q1", RawAnswer::Selection(Some(1)));
        assert_eq!(session.answer("q1"), Some(&Answer::Choice(1)));
    }
}
