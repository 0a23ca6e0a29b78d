// ── Core error types ──
//
// User-facing errors from guaumiau-core. The `Display` text of every
// variant is what the app shows to the pet owner, so HTTP failures
// display exactly the server's message (or an operation fallback).
// `kind()` lets callers branch without matching on strings.

use std::time::Duration;

use thiserror::Error;

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connectivity problem: refused, DNS, reset, client-side timeout.
    Transport,
    /// The server answered with a non-2xx status.
    Http,
    /// Local form checks failed before any request was made.
    Validation,
    /// A 2xx answer without the body the operation needs.
    EmptyResponse,
    /// A 2xx answer whose body could not be understood.
    InvalidResponse,
    /// The command exceeded its deadline.
    Timeout,
    /// The session token store failed.
    Storage,
    /// Bad runtime configuration.
    Config,
}

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("{message}")]
    Transport { message: String },

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    EmptyResponse { message: String },

    #[error("Respuesta inválida del servidor: {message}")]
    InvalidResponse { message: String },

    #[error("La operación excedió el tiempo de espera ({timeout_ms} ms)")]
    Timeout { timeout_ms: u64 },

    #[error("Error de almacenamiento de sesión: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Http { .. } => ErrorKind::Http,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::EmptyResponse { .. } => ErrorKind::EmptyResponse,
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    /// Human-readable detail, as shown in notifications and error slots.
    pub fn detail(&self) -> String {
        self.to_string()
    }

    pub(crate) fn timeout(limit: Duration) -> Self {
        Self::Timeout {
            timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub(crate) fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }

    /// Translate a gateway error for one operation.
    ///
    /// `fallback` names the operation (e.g. "Error al cargar mascotas") and
    /// is used as `"<fallback> (<status>)"` when the server sent no body.
    pub fn from_api(err: guaumiau_api::Error, fallback: &str) -> Self {
        match err {
            guaumiau_api::Error::Http { status, body } => Self::Http {
                status,
                message: body.unwrap_or_else(|| format!("{fallback} ({status})")),
            },
            other => Self::from(other),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<guaumiau_api::Error> for CoreError {
    fn from(err: guaumiau_api::Error) -> Self {
        match err {
            guaumiau_api::Error::Transport(e) => Self::Transport {
                message: e.to_string(),
            },
            guaumiau_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            guaumiau_api::Error::Tls(message) => Self::Transport { message },
            guaumiau_api::Error::Http { status, body } => Self::Http {
                status,
                message: body.unwrap_or_else(|| format!("HTTP {status}")),
            },
            guaumiau_api::Error::Deserialization { message, body: _ } => {
                Self::InvalidResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_body_is_the_detail() {
        let err = CoreError::from_api(
            guaumiau_api::Error::Http {
                status: 401,
                body: Some("Credenciales inválidas".into()),
            },
            "Error de credenciales",
        );
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.detail(), "Credenciales inválidas");
    }

    #[test]
    fn http_without_body_uses_fallback() {
        let err = CoreError::from_api(
            guaumiau_api::Error::Http {
                status: 500,
                body: None,
            },
            "Error al cargar mascotas",
        );
        assert_eq!(err.to_string(), "Error al cargar mascotas (500)");
    }

    #[test]
    fn timeout_reports_milliseconds() {
        let err = CoreError::timeout(Duration::from_millis(1500));
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err, CoreError::Timeout { timeout_ms: 1500 });
    }
}
