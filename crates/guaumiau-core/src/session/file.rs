// File-backed preference store.
//
// Keeps a small JSON object of string preferences on disk, of which only
// `session_token` is ours. Writes go to a sibling temp file first and are
// renamed into place so a crash never leaves a half-written file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};
use tracing::debug;

use super::{SESSION_TOKEN_KEY, TokenStore};
use crate::error::CoreError;

type Preferences = BTreeMap<String, String>;

/// Token store persisted to a JSON preferences file.
pub struct FileTokenStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
    token: watch::Sender<Option<String>>,
}

impl FileTokenStore {
    /// Open a store at `path`, loading any persisted token so `watch()`
    /// starts from it. The file is created on first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let (token, _) = watch::channel(None);
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            token,
        };
        let persisted = store.load().await?.remove(SESSION_TOKEN_KEY);
        store.token.send_replace(persisted);
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Preferences, CoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(Preferences::new()),
            Ok(text) => serde_json::from_str(&text).map_err(CoreError::storage),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Preferences::new()),
            Err(e) => Err(CoreError::storage(e)),
        }
    }

    async fn store(&self, prefs: &Preferences) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(CoreError::storage)?;
        }
        let json = serde_json::to_string_pretty(prefs).map_err(CoreError::storage)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(CoreError::storage)?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(CoreError::storage)
    }

    async fn update(&self, token: Option<&str>) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut prefs = self.load().await?;
        match token {
            Some(t) => prefs.insert(SESSION_TOKEN_KEY.to_owned(), t.to_owned()),
            None => prefs.remove(SESSION_TOKEN_KEY),
        };
        self.store(&prefs).await?;
        debug!(path = %self.path.display(), present = token.is_some(), "session token persisted");
        self.token.send_replace(token.map(str::to_owned));
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn read(&self) -> Result<Option<String>, CoreError> {
        let token = self.load().await?.remove(SESSION_TOKEN_KEY);
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
        self.update(Some(token)).await
    }

    async fn clear(&self) -> Result<(), CoreError> {
        self.update(None).await
    }

    fn watch(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }
}
