//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use guaumiau_config::ConfigError;
use guaumiau_core::{CoreError, ErrorKind};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("Login failed: {message}")]
    #[diagnostic(
        code(guaumiau::auth_failed),
        help("Check your email and password, then run: guaumiau login --email <EMAIL>")
    )]
    AuthFailed { message: String },

    #[error("No active session")]
    #[diagnostic(
        code(guaumiau::not_logged_in),
        help("Run: guaumiau login --email <EMAIL>")
    )]
    NotLoggedIn,

    #[error("The server rejected the request: {message}")]
    #[diagnostic(code(guaumiau::rejected))]
    Rejected { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(guaumiau::validation),
        help("Fix the highlighted value and try again.")
    )]
    Validation { message: String },

    #[error("Could not start the client: {0}")]
    #[diagnostic(code(guaumiau::core))]
    Core(#[from] CoreError),

    #[error(transparent)]
    #[diagnostic(
        code(guaumiau::config),
        help("Inspect the file with: guaumiau config show")
    )]
    Config(#[from] ConfigError),

    #[error("Could not read the password: {0}")]
    #[diagnostic(code(guaumiau::prompt))]
    Prompt(#[source] std::io::Error),

    #[error("Invalid output: {0}")]
    #[diagnostic(code(guaumiau::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render config: {0}")]
    #[diagnostic(code(guaumiau::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::NotLoggedIn => exit_code::AUTH,
            Self::Validation { .. } | Self::Config(_) => exit_code::USAGE,
            Self::Core(err) => match err.kind() {
                ErrorKind::Transport => exit_code::CONNECTION,
                ErrorKind::Timeout => exit_code::TIMEOUT,
                ErrorKind::Config | ErrorKind::Validation => exit_code::USAGE,
                _ => exit_code::GENERAL,
            },
            _ => exit_code::GENERAL,
        }
    }
}
