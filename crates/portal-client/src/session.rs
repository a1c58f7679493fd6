//! Authentication state derived from client storage.
//!
//! A user is authenticated while a session token is stored. [`AuthState`]
//! caches that flag, publishes it over a `watch` channel, and re-reads storage
//! whenever storage signals a change or the owner calls [`AuthState::refresh`]
//! (the navigation bar does this on every route change).

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{ClientError, StorageError};
use crate::storage::{ClientStorage, TOKEN_KEY, USER_KEY};
use crate::types::User;

async fn check(storage: &dyn ClientStorage, flag: &watch::Sender<bool>) -> bool {
    let authenticated = match storage.get(TOKEN_KEY).await {
        Ok(token) => token.is_some_and(|t| !t.is_empty()),
        Err(e) => {
            warn!(error = %e, "failed to read session token, treating as signed out");
            false
        }
    };
    flag.send_if_modified(|current| {
        let changed = *current != authenticated;
        *current = authenticated;
        changed
    });
    authenticated
}

/// Observable "is the user signed in" flag.
///
/// Dropping the state stops its storage listener.
pub struct AuthState {
    storage: Arc<dyn ClientStorage>,
    flag: Arc<watch::Sender<bool>>,
    listener: JoinHandle<()>,
}

impl AuthState {
    /// Read the current session and start listening for storage changes.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub async fn new(storage: Arc<dyn ClientStorage>) -> Self {
        // Subscribe before the first read so no change slips between them.
        let mut events = storage.subscribe();
        let flag = Arc::new(watch::Sender::new(false));
        check(storage.as_ref(), &flag).await;

        let listener = {
            let storage = Arc::clone(&storage);
            let flag = Arc::clone(&flag);
            tokio::spawn(async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            debug!(key = %event.key, "storage changed, re-checking session");
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            debug!(skipped, "storage listener lagged, re-checking session");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                    check(storage.as_ref(), &flag).await;
                }
            })
        };

        Self {
            storage,
            flag,
            listener,
        }
    }

    /// Last known authentication flag.
    pub fn is_authenticated(&self) -> bool {
        *self.flag.borrow()
    }

    /// Re-read storage and return the fresh flag.
    pub async fn refresh(&self) -> bool {
        check(self.storage.as_ref(), &self.flag).await
    }

    /// Watch the authentication flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.flag.subscribe()
    }

    /// The stored session token, if any.
    pub async fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "failed to read session token");
                None
            }
        }
    }

    /// The signed-in user, if one is stored and readable.
    pub async fn current_user(&self) -> Option<User> {
        let raw = match self.storage.get(USER_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read stored user");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "stored user is not valid JSON");
                None
            }
        }
    }

    /// Persist a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if storage rejects a write, or
    /// [`ClientError::Json`] if the user cannot be serialized.
    pub async fn store_session(&self, token: &str, user: &User) -> Result<(), ClientError> {
        let user_json = serde_json::to_string(user)?;
        self.storage.set(TOKEN_KEY, token).await?;
        self.storage.set(USER_KEY, &user_json).await?;
        check(self.storage.as_ref(), &self.flag).await;
        info!(user = %user.email, "session stored");
        Ok(())
    }

    /// Clear the session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if storage rejects a removal.
    pub async fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY).await?;
        self.storage.remove(USER_KEY).await?;
        check(self.storage.as_ref(), &self.flag).await;
        info!("session cleared");
        Ok(())
    }
}

impl Drop for AuthState {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
