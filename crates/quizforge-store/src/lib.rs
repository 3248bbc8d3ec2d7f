//! quizforge-store — Durable persistence for quiz sessions.
//!
//! Implements the `ProgressStore` seam from `quizforge-core` on top of a
//! byte-oriented key-value store. The gateway serializes the full session
//! snapshot as JSON under one fixed key; a blob that cannot be decoded is
//! treated the same as no blob at all.

pub mod kv;
pub mod snapshot;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use snapshot::{SnapshotStore, STATE_KEY};
