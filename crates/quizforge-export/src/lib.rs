//! quizforge-export — Result and question-set export surfaces.
//!
//! CSV review exports of a scored attempt, and normalized JSON re-exports
//! of a question set (stripped of runtime-only state, so an exported
//! document re-imports as an equivalent quiz).

pub mod csv;
pub mod json;
