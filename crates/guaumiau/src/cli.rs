//! Clap derive structures for the `guaumiau` CLI.
//!
//! Defines the command tree, global flags, and shared value types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use guaumiau_config::TokenStoreKind;
use guaumiau_core::{Pet, PetKind};
use strum::IntoEnumIterator;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// guaumiau -- manage your Guau&Miau account and pets from a terminal
#[derive(Debug, Parser)]
#[command(
    name = "guaumiau",
    version,
    about = "Guau&Miau pet owner client",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "GUAUMIAU_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, short = 'u', global = true)]
    pub api_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Per-command deadline in seconds
    #[arg(long, global = true)]
    pub command_timeout: Option<u64>,

    /// Where the session token is kept
    #[arg(long, global = true)]
    pub store: Option<StoreArg>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Shared Enums ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StoreArg {
    File,
    Keyring,
    Memory,
}

impl From<StoreArg> for TokenStoreKind {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::File => Self::File,
            StoreArg::Keyring => Self::Keyring,
            StoreArg::Memory => Self::Memory,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show whether a session is stored
    Status,

    /// Log in and store the session
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Create an account, optionally with pets
    Register(RegisterArgs),

    /// List and manage your pets
    #[command(alias = "p")]
    Pets(PetsArgs),

    /// Inspect or initialize the config file
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, short = 'e')]
    pub email: String,

    /// Prompted for when omitted
    #[arg(long, env = "GUAUMIAU_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long, short = 'n')]
    pub name: String,

    #[arg(long, short = 'e')]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Prompted for (twice) when omitted
    #[arg(long, env = "GUAUMIAU_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Pet to register with the account, as NAME:TYPE (repeatable)
    #[arg(long = "pet", value_parser = parse_pet_spec)]
    pub pets: Vec<Pet>,
}

#[derive(Debug, Args)]
pub struct PetsArgs {
    #[command(subcommand)]
    pub command: PetsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PetsCommand {
    /// List pets
    #[command(alias = "ls")]
    List,

    /// Add a pet
    Add {
        #[arg(long, short = 'n')]
        name: String,
        #[arg(long = "type", short = 't', help = pet_type_help())]
        pet_type: String,
    },

    /// Replace a pet's name and type
    Update {
        id: i64,
        #[arg(long, short = 'n')]
        name: String,
        #[arg(long = "type", short = 't', help = pet_type_help())]
        pet_type: String,
    },

    /// Delete a pet
    #[command(alias = "rm")]
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Print the effective configuration
    Show,

    /// Write a profile to the config file
    Init {
        /// API root URL for the profile
        #[arg(long)]
        api_url: String,

        /// Token backend for the profile
        #[arg(long)]
        token_store: Option<StoreArg>,
    },
}

/// Help for `--type`: the well-known kinds, though any text is accepted.
fn pet_type_help() -> String {
    let kinds: Vec<String> = PetKind::iter().map(|k| k.to_string()).collect();
    format!("Pet type: {} or any free text", kinds.join(", "))
}

/// Parse `NAME:TYPE` into an unsaved pet.
pub fn parse_pet_spec(raw: &str) -> Result<Pet, String> {
    let (name, pet_type) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:TYPE, got '{raw}'"))?;
    let (name, pet_type) = (name.trim(), pet_type.trim());
    if name.is_empty() || pet_type.is_empty() {
        return Err(format!("expected NAME:TYPE, got '{raw}'"));
    }
    Ok(Pet::new(name, pet_type))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pet_spec_parsing() {
        assert_eq!(parse_pet_spec("Firulais:Perro").unwrap(), Pet::new("Firulais", "Perro"));
        assert_eq!(parse_pet_spec(" Misha : Gato ").unwrap(), Pet::new("Misha", "Gato"));
        assert!(parse_pet_spec("Firulais").is_err());
        assert!(parse_pet_spec(":Perro").is_err());
    }

    #[test]
    fn register_collects_pets() {
        let cli = Cli::try_parse_from([
            "guaumiau",
            "register",
            "--name",
            "Ana",
            "--email",
            "ana@example.com",
            "--pet",
            "Firulais:Perro",
            "--pet",
            "Misha:Gato",
        ])
        .unwrap();
        let Command::Register(args) = cli.command else {
            panic!("expected register");
        };
        assert_eq!(args.pets.len(), 2);
        assert_eq!(args.pets[1].pet_type, "Gato");
    }

    #[test]
    fn type_help_lists_known_kinds() {
        assert_eq!(
            pet_type_help(),
            "Pet type: Perro, Gato, Ave, Otro or any free text"
        );

        let mut cmd = Cli::command();
        let add = cmd
            .find_subcommand_mut("pets")
            .unwrap()
            .find_subcommand_mut("add")
            .unwrap();
        let help = add.render_help().to_string();
        assert!(help.contains("Perro, Gato, Ave, Otro"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["guaumiau", "pets", "list", "--store", "memory", "-vv"]).unwrap();
        assert!(matches!(cli.global.store, Some(StoreArg::Memory)));
        assert_eq!(cli.global.verbose, 2);
    }
}
