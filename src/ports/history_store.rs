use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Snapshot;

/// Failure against the remote document store. Surfaced to the HTTP layer as
/// a server-error-class condition; the core does not retry.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("history store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("history store returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected history store payload: {0}")]
    Payload(String),
}

/// Port for the remote document store holding archived snapshots.
///
/// Historic entries live under a fixed collection path keyed by
/// store-generated unique keys; the live forecast sits at a fixed single
/// path.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// All archived entries, sorted by key — store keys order by insertion,
    /// so this is oldest first.
    async fn entries(&self) -> Result<Vec<(String, Snapshot)>, PersistenceError>;

    /// Append a new entry, returning the store-generated key.
    async fn push_entry(&self, snapshot: &Snapshot) -> Result<String, PersistenceError>;

    /// Delete one entry by key.
    async fn remove_entry(&self, key: &str) -> Result<(), PersistenceError>;

    /// Overwrite the live forecast document.
    async fn set_forecast(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;

    /// The live forecast document, if one has been written.
    async fn forecast(&self) -> Result<Option<Snapshot>, PersistenceError>;
}
