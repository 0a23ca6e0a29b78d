//! Client core between `guaumiau-api` and the app's screens.
//!
//! - **[`AppController`]**: The state machine. Commands such as
//!   [`login()`](AppController::login) or [`add_pet()`](AppController::add_pet)
//!   call the repositories and publish the outcome through three state
//!   containers ([`LoginState`], [`RegisterState`], [`PetListState`]) plus a
//!   one-shot [`Notification`] channel. [`AppController::dispatch`] runs a
//!   [`Command`] as its own task.
//!
//! - **Repositories** ([`repository`]): [`AuthRepository`] owns the session
//!   check, login token persistence and logout; [`PetRepository`] wraps pet
//!   CRUD. Both turn gateway failures into [`CoreError`].
//!
//! - **[`TokenStore`]**: The persisted session slot, with in-memory and
//!   JSON-file implementations.
//!
//! - **[`StateStream<T>`]**: Subscription handle with `current()` /
//!   `latest()` / `changed()` for reactive rendering.

pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod messages;
pub mod repository;
pub mod session;
pub mod state;
pub mod stream;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::Command;
pub use config::CoreConfig;
pub use controller::AppController;
pub use error::{CoreError, ErrorKind};
pub use repository::{AuthRepository, PetRepository};
pub use session::{FileTokenStore, MemoryTokenStore, SESSION_TOKEN_KEY, TokenStore};
pub use state::{
    LoginState, Notification, NotificationKind, PetListState, RegisterState, SessionStatus,
};
pub use stream::StateStream;

// Wire types used in commands.
pub use guaumiau_api::{Pet, PetKind, TlsMode, User};
