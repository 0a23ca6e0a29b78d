use std::sync::Arc;

use guaumiau_api::{ApiClient, User};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::messages;
use crate::session::TokenStore;

/// Token persisted when the login reply carries no user id.
pub const FALLBACK_SESSION_TOKEN: &str = "active-session";

/// Owns session check, login, registration and logout.
#[derive(Clone)]
pub struct AuthRepository {
    api: Arc<ApiClient>,
    tokens: Arc<dyn TokenStore>,
}

impl AuthRepository {
    pub fn new(api: Arc<ApiClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }

    /// The token store backing this repository.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// `true` iff the store currently holds a non-empty token.
    ///
    /// A single read, not a subscription. An unreadable store counts as
    /// "no session" so the app falls back to the login flow.
    pub async fn check_session(&self) -> bool {
        match self.tokens.read().await {
            Ok(token) => token.is_some_and(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "session token unreadable, treating as logged out");
                false
            }
        }
    }

    /// Forget the local session. Local-only, so it never fails.
    pub async fn logout(&self) {
        if let Err(e) = self.tokens.clear().await {
            warn!(error = %e, "failed to clear session token (non-fatal)");
        }
        info!("session cleared");
    }

    pub async fn register_user(&self, user: &User) -> Result<bool, CoreError> {
        self.api
            .register(user)
            .await
            .map_err(|e| CoreError::from_api(e, messages::REGISTER_FAILED))?;
        debug!(email = %user.email, "account created");
        Ok(true)
    }

    /// Log in and persist the derived session token.
    ///
    /// The token is written only after a non-empty 2xx reply; an empty
    /// reply is a failure and leaves the store untouched.
    pub async fn login_user(&self, email: &str, password: &SecretString) -> Result<User, CoreError> {
        let user = self
            .api
            .login(email, password)
            .await
            .map_err(|e| CoreError::from_api(e, messages::LOGIN_FAILED))?
            .ok_or_else(|| CoreError::EmptyResponse {
                message: messages::EMPTY_LOGIN_RESPONSE.into(),
            })?;

        let token = session_token_for(&user);
        self.tokens.write(&token).await?;
        info!(user_id = ?user.id, "logged in");
        Ok(user)
    }
}

fn session_token_for(user: &User) -> String {
    user.id
        .map_or_else(|| FALLBACK_SESSION_TOKEN.to_owned(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_the_user_id() {
        let user = User {
            id: Some(12),
            ..User::default()
        };
        assert_eq!(session_token_for(&user), "12");
    }

    #[test]
    fn missing_id_uses_fallback_token() {
        assert_eq!(session_token_for(&User::default()), FALLBACK_SESSION_TOKEN);
    }
}
