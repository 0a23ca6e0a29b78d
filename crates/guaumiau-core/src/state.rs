// ── Published UI state ──
//
// Immutable snapshots published by the controller. Consumers only ever
// see whole values; the controller replaces them atomically.

use guaumiau_api::Pet;

/// Whether a persisted session exists.
///
/// Starts `Unknown` until the app-start check runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    #[default]
    Unknown,
    Active,
    Inactive,
}

impl SessionStatus {
    /// Result of the app-start token check.
    pub fn from_check(has_token: bool) -> Self {
        if has_token { Self::Active } else { Self::Inactive }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

/// Login screen and session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub is_loading: bool,
    pub login_success: bool,
    pub session: SessionStatus,
    pub error_message: Option<String>,
}

/// Registration form, including pets buffered before the account exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterState {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    /// Pets added locally; sent with the registration request.
    pub pets: Vec<Pet>,
    pub full_name_error: Option<String>,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub confirm_password_error: Option<String>,
    pub is_loading: bool,
    pub registration_success: bool,
    pub error_message: Option<String>,
}

/// The pet list: exactly one of loading, loaded, or failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PetListState {
    #[default]
    Loading,
    Success(Vec<Pet>),
    Error(String),
}

impl PetListState {
    /// The loaded pets, if the list is in the `Success` state.
    pub fn pets(&self) -> Option<&[Pet]> {
        match self {
            Self::Success(pets) => Some(pets),
            Self::Loading | Self::Error(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A transient, one-shot message for toast/snackbar display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
