// Session token kept in the OS credential store.
//
// keyring calls block (D-Bus, Security.framework), so each one runs on
// tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use guaumiau_core::{CoreError, SESSION_TOKEN_KEY, TokenStore};

use crate::ConfigError;

pub const KEYRING_SERVICE: &str = "guaumiau";

/// Token store backed by one keyring entry,
/// `service = "guaumiau"`, `user = "<profile>/session_token"`.
pub struct KeyringTokenStore {
    entry: Arc<keyring::Entry>,
    token: watch::Sender<Option<String>>,
}

impl KeyringTokenStore {
    fn new(profile_name: &str) -> Result<Self, keyring::Error> {
        let user = format!("{profile_name}/{SESSION_TOKEN_KEY}");
        let entry = keyring::Entry::new(KEYRING_SERVICE, &user)?;
        let (token, _) = watch::channel(None);
        Ok(Self {
            entry: Arc::new(entry),
            token,
        })
    }

    /// Open the entry for `profile_name`, loading any stored token so
    /// `watch()` starts from it.
    pub async fn open(profile_name: &str) -> Result<Self, ConfigError> {
        let store = Self::new(profile_name)?;
        let stored = store.fetch().await?;
        store.token.send_replace(stored);
        Ok(store)
    }

    async fn fetch(&self) -> Result<Option<String>, CoreError> {
        self.blocking(|entry| match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        })
        .await
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, CoreError>
    where
        T: Send + 'static,
        F: FnOnce(&keyring::Entry) -> Result<T, keyring::Error> + Send + 'static,
    {
        let entry = Arc::clone(&self.entry);
        tokio::task::spawn_blocking(move || op(&entry))
            .await
            .map_err(|e| storage_error(&e))?
            .map_err(|e| storage_error(&e))
    }
}

fn storage_error(err: &impl std::fmt::Display) -> CoreError {
    CoreError::Storage {
        message: err.to_string(),
    }
}

#[async_trait]
impl TokenStore for KeyringTokenStore {
    async fn read(&self) -> Result<Option<String>, CoreError> {
        let token = self.fetch().await?;
        self.token.send_if_modified(|current| {
            if *current == token {
                false
            } else {
                current.clone_from(&token);
                true
            }
        });
        Ok(token)
    }

    async fn write(&self, token: &str) -> Result<(), CoreError> {
        let owned = token.to_owned();
        self.blocking(move |entry| entry.set_password(&owned)).await?;
        self.token.send_replace(Some(token.to_owned()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        self.blocking(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        })
        .await?;
        self.token.send_replace(None);
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }
}
