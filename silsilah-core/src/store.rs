//! Record store collaborators: durable storage for the family collection.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

use crate::family::Family;

/// Errors from record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or written.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The stored collection could not be decoded.
    #[error("stored family data is corrupt: {0}")]
    Corrupt(String),

    /// A conditional write lost a race with a concurrent writer.
    #[error("concurrent modification detected")]
    Conflict,
}

/// Durable mapping from the family collection to its member list.
///
/// Writes replace the whole collection, so an update is load, mutate,
/// save against one snapshot. Implementations that serve concurrent
/// writers must offer a way to serialize that sequence or detect lost
/// races: a lock around the sequence, or a compare-and-swap write.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the full family snapshot.
    async fn load(&self) -> Result<Family, StoreError>;

    /// Replace the stored collection with a new snapshot.
    async fn save(&self, family: &Family) -> Result<(), StoreError>;
}

/// In-process record store guarded by a mutex.
///
/// Serves as the deterministic collaborator double in tests, and shows
/// the serialized read-modify-write shape: [`MemoryStore::modify`] runs
/// load, mutate, save as one critical section.
#[derive(Debug, Default)]
pub struct MemoryStore {
    family: Mutex<Family>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an initial snapshot.
    pub fn with_family(family: Family) -> Self {
        Self {
            family: Mutex::new(family),
        }
    }

    /// Run a mutation against the stored snapshot as one critical section.
    pub async fn modify<F, R>(&self, mutate: F) -> R
    where
        F: FnOnce(&mut Family) -> R,
    {
        let mut family = self.family.lock().await;
        mutate(&mut family)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self) -> Result<Family, StoreError> {
        Ok(self.family.lock().await.clone())
    }

    async fn save(&self, family: &Family) -> Result<(), StoreError> {
        *self.family.lock().await = family.clone();
        Ok(())
    }
}

/// Record store backed by a JSON file on disk.
///
/// The collection is stored as a plain JSON array of member records. A
/// missing file loads as the empty family, matching an empty remote
/// collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self) -> Result<Family, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no family file yet, starting empty");
                return Ok(Family::new());
            }
            Err(err) => return Err(StoreError::Backend(err.to_string())),
        };
        serde_json::from_str(&content).map_err(|err| StoreError::Corrupt(err.to_string()))
    }

    async fn save(&self, family: &Family) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(family)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        fs::write(&self.path, content)
            .await
            .map_err(|err| StoreError::Backend(err.to_string()))?;
        tracing::debug!(path = %self.path.display(), members = family.len(), "saved family snapshot");
        Ok(())
    }
}
