//! File-backed session store built on `local-storage`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use local_storage::{LocalStorage, StorageError, StorageKey};
use tracing::debug;

use super::dto::PersistedSessionDto;
use crate::domain::AuthSession;
use crate::domain::ports::{SessionRepository, SessionRepositoryError};

/// Storage key holding the persisted session.
pub const SESSION_STORAGE_KEY: &str = "auth-storage";

/// Session repository persisting to one JSON item in a storage directory.
#[derive(Debug, Clone)]
pub struct LocalStorageSessionRepository {
    storage: Arc<LocalStorage>,
    key: StorageKey,
}

impl LocalStorageSessionRepository {
    /// Open (creating if needed) the storage directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionRepositoryError::Read`] when the directory cannot be
    /// opened.
    pub fn open(root: &Path) -> Result<Self, SessionRepositoryError> {
        let storage = LocalStorage::open(root).map_err(map_storage_error)?;
        let key = StorageKey::new(SESSION_STORAGE_KEY).map_err(map_storage_error)?;
        Ok(Self {
            storage: Arc::new(storage),
            key,
        })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, SessionRepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&LocalStorage, &StorageKey) -> Result<T, StorageError> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        let key = self.key.clone();
        tokio::task::spawn_blocking(move || op(&storage, &key))
            .await
            .map_err(|err| SessionRepositoryError::read(format!("storage task failed: {err}")))?
            .map_err(map_storage_error)
    }
}

#[async_trait]
impl SessionRepository for LocalStorageSessionRepository {
    async fn load(&self) -> Result<Option<AuthSession>, SessionRepositoryError> {
        let stored: Option<PersistedSessionDto> = self
            .blocking(|storage, key| storage.get_item(key))
            .await?;
        match stored {
            Some(dto) => dto.into_domain().map_err(SessionRepositoryError::corrupt),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &AuthSession) -> Result<(), SessionRepositoryError> {
        let dto = PersistedSessionDto::from_session(session);
        self.blocking(move |storage, key| storage.set_item(key, &dto))
            .await?;
        debug!(root = %self.storage.root().display(), "session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionRepositoryError> {
        let removed = self
            .blocking(|storage, key| storage.remove_item(key))
            .await?;
        debug!(removed, "session cleared");
        Ok(())
    }
}

fn map_storage_error(error: StorageError) -> SessionRepositoryError {
    match error {
        StorageError::ParseError { .. } => SessionRepositoryError::corrupt(error.to_string()),
        StorageError::WriteError { .. } | StorageError::EncodeError { .. } => {
            SessionRepositoryError::write(error.to_string())
        }
        StorageError::OpenError { .. }
        | StorageError::ReadError { .. }
        | StorageError::InvalidKey { .. } => SessionRepositoryError::read(error.to_string()),
    }
}
