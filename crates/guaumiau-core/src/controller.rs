// ── Application controller ──
//
// The state machine behind the app's screens. Owns the three published
// state containers (login/session, registration form, pet list) and the
// one-shot notification channel, and turns UI commands into repository
// calls. Every failure ends up as state and/or a notification.

use std::future::Future;
use std::sync::Arc;

use guaumiau_api::{ApiClient, Pet, User};
use secrecy::SecretString;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::config::CoreConfig;
use crate::error::CoreError;
use crate::messages;
use crate::repository::{AuthRepository, PetRepository};
use crate::session::TokenStore;
use crate::state::{
    LoginState, Notification, NotificationKind, PetListState, RegisterState, SessionStatus,
};
use crate::stream::StateStream;
use crate::validate;

const NOTIFICATION_CHANNEL_SIZE: usize = 32;

// ── AppController ────────────────────────────────────────────────

/// The main entry point for UI consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Commands may run
/// concurrently (see [`dispatch`](Self::dispatch)); each container is
/// updated by atomic snapshot replacement, so the last command to finish
/// wins.
#[derive(Clone)]
pub struct AppController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: CoreConfig,
    auth: AuthRepository,
    pets: PetRepository,
    login: watch::Sender<LoginState>,
    register: watch::Sender<RegisterState>,
    pet_list: watch::Sender<PetListState>,
    notifications: broadcast::Sender<Notification>,
}

impl AppController {
    /// Build a controller talking to `config.api_url`, persisting the
    /// session in `tokens`.
    pub fn new(config: CoreConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, CoreError> {
        let api = Arc::new(ApiClient::new(config.api_url.clone(), &config.transport())?);
        let auth = AuthRepository::new(Arc::clone(&api), tokens);
        let pets = PetRepository::new(api);
        Ok(Self::with_repositories(config, auth, pets))
    }

    /// Build a controller around existing repositories.
    pub fn with_repositories(config: CoreConfig, auth: AuthRepository, pets: PetRepository) -> Self {
        let (login, _) = watch::channel(LoginState::default());
        let (register, _) = watch::channel(RegisterState::default());
        let (pet_list, _) = watch::channel(PetListState::default());
        let (notifications, _) = broadcast::channel(NOTIFICATION_CHANNEL_SIZE);

        Self {
            inner: Arc::new(ControllerInner {
                config,
                auth,
                pets,
                login,
                register,
                pet_list,
                notifications,
            }),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.inner.config
    }

    // ── State observation ────────────────────────────────────────

    pub fn login_state(&self) -> StateStream<LoginState> {
        StateStream::new(self.inner.login.subscribe())
    }

    pub fn register_state(&self) -> StateStream<RegisterState> {
        StateStream::new(self.inner.register.subscribe())
    }

    pub fn pet_state(&self) -> StateStream<PetListState> {
        StateStream::new(self.inner.pet_list.subscribe())
    }

    pub fn login_snapshot(&self) -> LoginState {
        self.inner.login.borrow().clone()
    }

    pub fn register_snapshot(&self) -> RegisterState {
        self.inner.register.borrow().clone()
    }

    pub fn pet_snapshot(&self) -> PetListState {
        self.inner.pet_list.borrow().clone()
    }

    /// Subscribe to transient notifications.
    ///
    /// Only receivers alive at send time get a message; nothing is retained.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifications.subscribe()
    }

    // ── Session ──────────────────────────────────────────────────

    /// Resolve the session status from the token store; load pets if a
    /// session exists. Safe to call again: the check simply re-runs.
    pub async fn on_app_start(&self) {
        let limit = self.inner.config.command_timeout;
        let has_token = tokio::time::timeout(limit, self.inner.auth.check_session())
            .await
            .unwrap_or_else(|_| {
                warn!(?limit, "session check timed out, treating as logged out");
                false
            });

        let status = SessionStatus::from_check(has_token);
        self.inner.login.send_modify(|s| s.session = status);
        info!(?status, "session check complete");

        if status.is_active() {
            self.load_pets().await;
        }
    }

    pub async fn login(&self) {
        let (email, password) = {
            let state = self.inner.login.borrow();
            (state.email.trim().to_owned(), state.password.clone())
        };

        if let Err(message) = validate::login(&email, &password) {
            self.inner
                .login
                .send_modify(|s| s.error_message = Some(message.to_owned()));
            self.notify(NotificationKind::Error, message);
            return;
        }

        self.inner.login.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
        });
        let _loading = LoadingGuard::new(&self.inner.login, |s| s.is_loading = false);

        let password = SecretString::from(password);
        match self.bounded(self.inner.auth.login_user(&email, &password)).await {
            Ok(user) => {
                self.inner.login.send_modify(|s| {
                    s.login_success = true;
                    s.session = SessionStatus::Active;
                    s.error_message = None;
                });
                self.notify(NotificationKind::Success, messages::welcome(&user.name));
                self.load_pets().await;
            }
            Err(e) => {
                let reason = e.detail();
                debug!(kind = ?e.kind(), "login failed");
                self.inner.login.send_modify(|s| {
                    s.login_success = false;
                    s.error_message = Some(reason.clone());
                });
                self.notify(NotificationKind::Error, reason);
            }
        }
    }

    /// Forget the session and reset every container.
    pub async fn logout(&self) {
        let limit = self.inner.config.command_timeout;
        if tokio::time::timeout(limit, self.inner.auth.logout())
            .await
            .is_err()
        {
            warn!(?limit, "clearing the session token timed out");
        }

        self.inner.login.send_replace(LoginState {
            session: SessionStatus::Inactive,
            ..LoginState::default()
        });
        self.inner.register.send_replace(RegisterState::default());
        self.inner.pet_list.send_replace(PetListState::Loading);
        info!("logged out");
    }

    pub fn set_login_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.inner.login.send_modify(|s| s.email = email);
    }

    pub fn set_login_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.inner.login.send_modify(|s| s.password = password);
    }

    /// Dismiss the login error dialog.
    pub fn clear_login_error(&self) {
        self.inner.login.send_if_modified(|s| s.error_message.take().is_some());
    }

    // ── Registration ─────────────────────────────────────────────

    pub fn set_full_name(&self, full_name: impl Into<String>) {
        let full_name = full_name.into();
        self.inner.register.send_modify(|s| {
            s.full_name_error = validate::full_name(&full_name).map(str::to_owned);
            s.full_name = full_name;
        });
    }

    pub fn set_email(&self, email: impl Into<String>) {
        let email = email.into();
        self.inner.register.send_modify(|s| {
            s.email_error = validate::email(&email).map(str::to_owned);
            s.email = email;
        });
    }

    pub fn set_password(&self, password: impl Into<String>) {
        let password = password.into();
        self.inner.register.send_modify(|s| {
            s.password_error = validate::password(&password).map(str::to_owned);
            if !s.confirm_password.is_empty() {
                s.confirm_password_error =
                    validate::confirm_password(&password, &s.confirm_password).map(str::to_owned);
            }
            s.password = password;
        });
    }

    pub fn set_confirm_password(&self, confirm: impl Into<String>) {
        let confirm = confirm.into();
        self.inner.register.send_modify(|s| {
            s.confirm_password_error =
                validate::confirm_password(&s.password, &confirm).map(str::to_owned);
            s.confirm_password = confirm;
        });
    }

    pub fn set_phone(&self, phone: impl Into<String>) {
        let phone = phone.into();
        self.inner.register.send_modify(|s| s.phone = phone);
    }

    /// Buffer a pet for the account being registered. No I/O.
    pub fn add_pet_local(&self, pet: Pet) {
        self.inner.register.send_modify(|s| s.pets.push(pet));
    }

    /// Drop the first buffered pet equal to `pet`. No I/O.
    pub fn remove_pet_local(&self, pet: &Pet) {
        self.inner.register.send_if_modified(|s| {
            match s.pets.iter().position(|p| p == pet) {
                Some(idx) => {
                    s.pets.remove(idx);
                    true
                }
                None => false,
            }
        });
    }

    pub async fn register(&self) {
        let form = self.inner.register.borrow().clone();

        if let Err(message) = validate::registration(&form) {
            self.notify(NotificationKind::Error, message);
            return;
        }

        self.inner.register.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
        });
        let _loading = LoadingGuard::new(&self.inner.register, |s| s.is_loading = false);

        let user = User {
            id: None,
            name: form.full_name.trim().to_owned(),
            email: form.email.trim().to_owned(),
            password: Some(form.password),
            phone: form.phone.trim().to_owned(),
            pets: form.pets.iter().map(Pet::without_id).collect(),
        };

        match self.bounded(self.inner.auth.register_user(&user)).await {
            Ok(_) => {
                self.inner.register.send_replace(RegisterState {
                    registration_success: true,
                    ..RegisterState::default()
                });
                info!(pets = user.pets.len(), "registration complete");
                self.notify(NotificationKind::Success, messages::REGISTER_OK);
            }
            Err(e) => {
                let reason = e.detail();
                self.inner
                    .register
                    .send_modify(|s| s.error_message = Some(reason.clone()));
                self.notify(NotificationKind::Error, reason);
            }
        }
    }

    // ── Pets ─────────────────────────────────────────────────────

    /// Replace the pet list with a fresh copy from the server.
    pub async fn load_pets(&self) {
        self.inner.pet_list.send_replace(PetListState::Loading);

        let next = match self.bounded(self.inner.pets.list()).await {
            Ok(pets) => {
                debug!(count = pets.len(), "pets loaded");
                PetListState::Success(pets)
            }
            Err(e) => {
                warn!(error = %e, "loading pets failed");
                PetListState::Error(e.detail())
            }
        };
        self.inner.pet_list.send_replace(next);
    }

    pub async fn add_pet(&self, pet: Pet) {
        self.inner.pet_list.send_replace(PetListState::Loading);
        let outcome = self.bounded(self.inner.pets.add(&pet.without_id())).await;
        self.report(outcome.map(|_| ()), messages::PET_ADDED);
        self.load_pets().await;
    }

    pub async fn update_pet(&self, id: i64, pet: Pet) {
        self.inner.pet_list.send_replace(PetListState::Loading);
        let pet = pet.with_id(id);
        let outcome = self.bounded(self.inner.pets.update(id, &pet)).await;
        self.report(outcome.map(|_| ()), messages::PET_UPDATED);
        self.load_pets().await;
    }

    pub async fn delete_pet(&self, id: i64) {
        self.inner.pet_list.send_replace(PetListState::Loading);
        let outcome = self.bounded(self.inner.pets.delete(id)).await;
        self.report(outcome.map(|_| ()), messages::PET_DELETED);
        self.load_pets().await;
    }

    // ── Helpers ──────────────────────────────────────────────────

    /// Run a repository call under the per-command deadline.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, CoreError>>,
    ) -> Result<T, CoreError> {
        let limit = self.inner.config.command_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(?limit, "command deadline exceeded");
                Err(CoreError::timeout(limit))
            }
        }
    }

    fn report(&self, outcome: Result<(), CoreError>, success: &str) {
        match outcome {
            Ok(()) => self.notify(NotificationKind::Success, success),
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "pet mutation failed");
                self.notify(NotificationKind::Error, e.detail());
            }
        }
    }

    fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        // No receivers is fine: notifications are not retained.
        let _ = self.inner.notifications.send(Notification::new(kind, message));
    }
}

/// Clears a loading flag when dropped, on every exit path.
struct LoadingGuard<'a, T> {
    state: &'a watch::Sender<T>,
    clear: fn(&mut T),
}

impl<'a, T> LoadingGuard<'a, T> {
    fn new(state: &'a watch::Sender<T>, clear: fn(&mut T)) -> Self {
        Self { state, clear }
    }
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        self.state.send_modify(self.clear);
    }
}
