//! Shared configuration for Guau&Miau tools.
//!
//! TOML profiles layered with `GUAUMIAU_*` environment overrides, the
//! choice of session token backend, and translation to
//! `guaumiau_core::CoreConfig`. The CLI adds flag-aware wrappers on top.

mod keyring_store;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use guaumiau_core::config::DEFAULT_API_URL;
use guaumiau_core::{CoreConfig, FileTokenStore, MemoryTokenStore, TlsMode, TokenStore};

pub use keyring_store::{KEYRING_SERVICE, KeyringTokenStore};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' is not defined in {}", path.display())]
    UnknownProfile { profile: String, path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring unavailable: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("session store unavailable: {0}")]
    Session(#[from] guaumiau_core::CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// HTTP request timeout, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Deadline for each backend call a command makes, in seconds.
    #[serde(default = "default_command_timeout")]
    pub command_timeout: u64,

    #[serde(default)]
    pub token_store: TokenStoreKind,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            command_timeout: default_command_timeout(),
            token_store: TokenStoreKind::default(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_command_timeout() -> u64 {
    15
}

/// Where the session token lives between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    /// JSON preferences file under the platform data directory.
    #[default]
    File,
    /// OS credential store.
    Keyring,
    /// Process memory only; every run starts logged out.
    Memory,
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// API root (e.g., "http://10.0.2.2:8080/").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override the HTTP timeout.
    pub timeout: Option<u64>,

    /// Override the command deadline.
    pub command_timeout: Option<u64>,

    /// Override the token backend.
    pub token_store: Option<TokenStoreKind>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            ca_cert: None,
            timeout: None,
            command_timeout: None,
            token_store: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

impl Config {
    /// Name of the profile to use when `requested` is `None`.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or(DEFAULT_PROFILE)
    }

    /// Look up a profile. The default profile may be left out of the
    /// file entirely, in which case built-in values apply.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(profile) => Ok(profile.clone()),
            None if name == DEFAULT_PROFILE => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile {
                profile: name.into(),
                path: config_path(),
            }),
        }
    }

    /// The token backend for `profile`, falling back to the global default.
    pub fn token_store_kind(&self, profile: &Profile) -> TokenStoreKind {
        profile.token_store.unwrap_or(self.defaults.token_store)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "guaumiau", "guaumiau")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// File backing the session token of `profile_name`.
pub fn token_file_path(profile_name: &str) -> PathBuf {
    let base = project_dirs().map_or_else(
        || dirs_fallback(".local/share"),
        |dirs| dirs.data_dir().to_path_buf(),
    );
    base.join(profile_name).join("session.json")
}

fn dirs_fallback(under_home: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(under_home);
    p.push("guaumiau");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path. A missing file is not an error.
///
/// Environment keys use `__` between levels, e.g.
/// `GUAUMIAU_DEFAULTS__COMMAND_TIMEOUT=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("GUAUMIAU_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        Config::default()
    })
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `CoreConfig` from a profile and the global defaults.
pub fn profile_to_core_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<CoreConfig, ConfigError> {
    let api_url = parse_api_url(&profile.api_url)?;

    let tls = profile
        .ca_cert
        .clone()
        .map_or(TlsMode::System, TlsMode::CustomCa);

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    let command_timeout =
        Duration::from_secs(profile.command_timeout.unwrap_or(defaults.command_timeout));
    if command_timeout.is_zero() {
        return Err(ConfigError::Validation {
            field: "command_timeout".into(),
            reason: "must be at least one second".into(),
        });
    }

    Ok(CoreConfig {
        api_url,
        tls,
        timeout,
        command_timeout,
    })
}

/// Parse an API root, forcing a trailing slash so relative endpoint
/// paths join under it.
pub fn parse_api_url(raw: &str) -> Result<url::Url, ConfigError> {
    let mut url: url::Url = raw.trim().parse().map_err(|_| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("expected http or https, got '{}'", url.scheme()),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Open the session token backend for `profile_name`. Persistent
/// backends load the stored token up front.
pub async fn open_token_store(
    kind: TokenStoreKind,
    profile_name: &str,
) -> Result<Arc<dyn TokenStore>, ConfigError> {
    let store: Arc<dyn TokenStore> = match kind {
        TokenStoreKind::File => {
            Arc::new(FileTokenStore::open(token_file_path(profile_name)).await?)
        }
        TokenStoreKind::Keyring => Arc::new(KeyringTokenStore::open(profile_name).await?),
        TokenStoreKind::Memory => Arc::new(MemoryTokenStore::new()),
    };
    tracing::debug!(?kind, profile = profile_name, "token store opened");
    Ok(store)
}
