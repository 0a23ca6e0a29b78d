// Auth endpoints
//
// Account registration and credential login. The backend keeps no
// server-side session for this client: a successful login answers with
// the user document and the caller decides what to persist.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{LoginRequest, User};

impl ApiClient {
    /// Create an account.
    ///
    /// `POST auth/register` with the user document. The reply body is
    /// ignored; any 2xx means the account exists.
    pub async fn register(&self, user: &User) -> Result<(), Error> {
        debug!(email = %user.email, pets = user.pets.len(), "registering account");
        self.post_discard("auth/register", user).await
    }

    /// Log in with email and password.
    ///
    /// `POST auth/login` with `{email, password}`. Returns `Ok(None)` when
    /// the server answers 2xx without a body.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Option<User>, Error> {
        debug!(email, "logging in");
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        self.post("auth/login", &body).await
    }
}
