use async_trait::async_trait;
use tokio::sync::watch;

use super::TokenStore;
use crate::error::CoreError;

/// Process-local token store. Nothing survives a restart.
pub struct MemoryTokenStore {
    token: watch::Sender<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        let (token, _) = watch::channel(None);
        Self { token }
    }

    /// A store that already holds `token`, as if a previous run logged in.
    pub fn with_token(token: impl Into<String>) -> Self {
        let (token, _) = watch::channel(Some(token.into()));
        Self { token }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn read(&self) -> Result<Option<String>, CoreError> {
        Ok(self.token.borrow().clone())
    }

    async fn write(&self, token: &str) -> Result<(), CoreError> {
        self.token.send_replace(Some(token.to_owned()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        self.token.send_replace(None);
        Ok(())
    }

    fn watch(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }
}
