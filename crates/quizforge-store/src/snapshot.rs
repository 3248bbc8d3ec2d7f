//! The session snapshot gateway.
//!
//! Serializes the full `SessionSnapshot` as JSON under one fixed key of a
//! [`KeyValueStore`]. Load failures of any kind (absent key, unreadable
//! backend, malformed JSON) surface as "no snapshot", never as an error —
//! corrupt persisted state is equivalent to no persisted state.

use quizforge_core::error::StoreError;
use quizforge_core::model::SessionSnapshot;
use quizforge_core::traits::ProgressStore;

use crate::kv::KeyValueStore;

/// The fixed storage key for session state.
pub const STATE_KEY: &str = "quiz_state_v1";

/// A [`ProgressStore`] over any key-value backend.
pub struct SnapshotStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }
}

impl<S: KeyValueStore> ProgressStore for SnapshotStore<S> {
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(snapshot)?;
        self.backend.set(STATE_KEY, &bytes)
    }

    fn load(&self) -> Option<SessionSnapshot> {
        let bytes = match self.backend.get(STATE_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("persisted state unreadable, starting fresh: {e}");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("persisted state malformed, starting fresh: {e}");
                None
            }
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove(STATE_KEY)
    }
}
