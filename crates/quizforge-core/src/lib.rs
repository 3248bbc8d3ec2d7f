//! quizforge-core — Quiz model, session state machine, matcher, and scorer.
//!
//! This crate defines the fundamental data model, the session lifecycle,
//! and the grading logic that the rest of quizforge builds on. Durable
//! storage and presentation are collaborators behind the traits in
//! [`traits`].

pub mod error;
pub mod generator;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod scorer;
pub mod session;
pub mod traits;
