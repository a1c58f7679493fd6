//! Client-side key-value storage.
//!
//! This is the portal's equivalent of browser local storage: string keys,
//! string values, and a change signal other components can listen to. The
//! [`AuthState`](crate::session::AuthState) re-checks authentication whenever
//! the signal fires.

use std::collections::BTreeMap;

use tokio::sync::{RwLock, broadcast};

use crate::error::StorageError;

/// Key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the signed-in user as JSON.
pub const USER_KEY: &str = "user";

const EVENT_CAPACITY: usize = 64;

/// A change to one storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that changed.
    pub key: String,
    /// The new value, or `None` if the key was removed.
    pub value: Option<String>,
}

/// A pluggable key-value store shared by every portal component.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait ClientStorage: Send + Sync + 'static {
    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying store fails.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a value, overwriting any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying store fails.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the underlying store fails.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Listen for changes made through any handle to this store.
    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;
}

/// In-memory storage. Nothing survives the process.
#[derive(Debug)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
    events: broadcast::Sender<StorageEvent>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: RwLock::new(BTreeMap::new()),
            events,
        }
    }

    fn notify(&self, key: &str, value: Option<String>) {
        // No subscribers is fine.
        let _ = self.events.send(StorageEvent {
            key: key.to_owned(),
            value,
        });
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ClientStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        self.notify(key, Some(value.to_owned()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let removed = self.entries.write().await.remove(key);
        if removed.is_some() {
            self.notify(key, None);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}

/// Storage whose every read and write fails, for exercising degraded paths.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct FailingStorage {
    events: broadcast::Sender<StorageEvent>,
}

#[cfg(test)]
impl FailingStorage {
    pub(crate) fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { events }
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl ClientStorage for FailingStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Read {
            key: key.to_owned(),
            reason: "quota exceeded".to_owned(),
        })
    }

    async fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_owned(),
            reason: "quota exceeded".to_owned(),
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            key: key.to_owned(),
            reason: "quota exceeded".to_owned(),
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }
}
