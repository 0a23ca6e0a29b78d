// ── Session token store ──
//
// A single persisted slot holding the opaque session token. The store
// owns the value; everyone else reads it, writes it, or watches it.

mod file;
mod memory;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::CoreError;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

/// Key under which the token is persisted.
pub const SESSION_TOKEN_KEY: &str = "session_token";

/// Persistent storage for the session token.
///
/// Contents are opaque: no validation happens here. Implementations must
/// not block the calling task; blocking backends hop to a blocking pool.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the current token once.
    async fn read(&self) -> Result<Option<String>, CoreError>;

    /// Persist `token`, replacing any previous value.
    async fn write(&self, token: &str) -> Result<(), CoreError>;

    /// Remove the token.
    async fn clear(&self) -> Result<(), CoreError>;

    /// Observe changes made through this store.
    fn watch(&self) -> watch::Receiver<Option<String>>;
}
