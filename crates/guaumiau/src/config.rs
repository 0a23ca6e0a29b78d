//! CLI-aware wrappers over `guaumiau-config`: flag overrides on top of
//! the active profile.

use guaumiau_config::{Config, Profile, TokenStoreKind, open_token_store, profile_to_core_config};
use guaumiau_core::AppController;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The profile selected by `--profile`, with every global flag applied.
pub fn resolve_profile(cfg: &Config, global: &GlobalOpts) -> Result<(String, Profile), CliError> {
    let name = cfg.profile_name(global.profile.as_deref()).to_owned();
    let mut profile = cfg.profile(&name)?;

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    if global.command_timeout.is_some() {
        profile.command_timeout = global.command_timeout;
    }
    if let Some(store) = global.store {
        profile.token_store = Some(TokenStoreKind::from(store));
    }
    Ok((name, profile))
}

/// Build the controller for this invocation.
pub async fn build_controller(global: &GlobalOpts) -> Result<AppController, CliError> {
    let cfg = guaumiau_config::load_config_or_default();
    let (name, profile) = resolve_profile(&cfg, global)?;

    let core = profile_to_core_config(&profile, &cfg.defaults)?;
    let tokens = open_token_store(cfg.token_store_kind(&profile), &name).await?;

    tracing::debug!(profile = %name, api_url = %core.api_url, "controller configured");
    Ok(AppController::new(core, tokens)?)
}
