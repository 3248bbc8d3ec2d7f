//! The persistence seam between the session and durable storage.
//!
//! `ProgressStore` is implemented by the `quizforge-store` crate; the
//! session only ever sees the trait object.

use crate::error::StoreError;
use crate::model::SessionSnapshot;

/// Durable storage for in-progress session state.
///
/// Implementations must treat corrupt stored data as absent: `load` returns
/// `None` rather than an error, because a blob that cannot be decoded is
/// equivalent to no blob at all.
pub trait ProgressStore: Send + Sync {
    /// Persist the full session snapshot, replacing any previous one.
    fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError>;

    /// Read back the persisted snapshot, if a decodable one exists.
    fn load(&self) -> Option<SessionSnapshot>;

    /// Remove any persisted snapshot.
    fn clear(&self) -> Result<(), StoreError>;
}

/// A `ProgressStore` that stores nothing, for sessions that opt out of
/// durability.
pub struct NullStore;

impl ProgressStore for NullStore {
    fn save(&self, _snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        Ok(())
    }

    fn load(&self) -> Option<SessionSnapshot> {
        None
    }

    fn clear(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
