use std::{fmt::Display, sync::Arc, time::Duration};

use async_trait::async_trait;
use teloxide::{dispatching::dialogue::Storage, types::ChatId};
use thiserror::Error;

use crate::database::{NewTeam, PersistedUser};

use super::state::Session;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("download timed out after {0:?}")]
    Timeout(Duration),
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
    #[error("file download failed: {0}")]
    Download(#[from] teloxide::DownloadError),
    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
#[error("session storage failed: {0}")]
pub struct SessionStoreError(String);

/// Per chat `(state, draft)` storage. Absent sessions load as `Idle`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, chat_id: ChatId) -> Result<Session, SessionStoreError>;
    async fn save(&self, chat_id: ChatId, session: Session) -> Result<(), SessionStoreError>;
    async fn clear(&self, chat_id: ChatId) -> Result<(), SessionStoreError>;
}

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn insert_user(&self, user: &PersistedUser) -> Result<i64, StorageError>;
    async fn insert_team(&self, team: &NewTeam) -> Result<i64, StorageError>;
}

/// Turns a remote photo reference into a stable local one.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    async fn fetch(&self, remote: &str) -> Result<String, DownloadError>;
}

/// Session store on top of any teloxide dialogue storage.
pub struct DialogueStore<S> {
    storage: Arc<S>,
}

impl<S> DialogueStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

fn store_error<E: Display>(e: E) -> SessionStoreError {
    SessionStoreError(e.to_string())
}

#[async_trait]
impl<S> SessionStore for DialogueStore<S>
where
    S: Storage<Session> + Send + Sync + 'static,
    S::Error: Display + Send,
{
    async fn load(&self, chat_id: ChatId) -> Result<Session, SessionStoreError> {
        let session = Arc::clone(&self.storage)
            .get_dialogue(chat_id)
            .await
            .map_err(store_error)?;
        Ok(session.unwrap_or_default())
    }

    async fn save(&self, chat_id: ChatId, session: Session) -> Result<(), SessionStoreError> {
        Arc::clone(&self.storage)
            .update_dialogue(chat_id, session)
            .await
            .map_err(store_error)
    }

    async fn clear(&self, chat_id: ChatId) -> Result<(), SessionStoreError> {
        Arc::clone(&self.storage)
            .remove_dialogue(chat_id)
            .await
            .map_err(store_error)
    }
}

#[cfg(test)]
mod tests {
    use teloxide::dispatching::dialogue::InMemStorage;

    use super::*;
    use crate::registration::state::RegistrationState;

    #[tokio::test]
    async fn dialogue_store_round_trips_sessions() {
        let store = DialogueStore::new(InMemStorage::<Session>::new());
        let chat_id = ChatId(1);

        assert_eq!(store.load(chat_id).await.unwrap(), Session::default());

        let mut session = Session::default();
        session.state = RegistrationState::FillGroup;
        session.draft.name = "Иванов Иван".to_string();
        store.save(chat_id, session.clone()).await.unwrap();

        assert_eq!(store.load(chat_id).await.unwrap(), session);
        assert_eq!(store.load(ChatId(2)).await.unwrap(), Session::default());

        store.clear(chat_id).await.unwrap();
        assert_eq!(store.load(chat_id).await.unwrap(), Session::default());
    }
}
