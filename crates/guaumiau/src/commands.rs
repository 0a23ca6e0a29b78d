//! Command handlers. Each one drives the `AppController` the way a screen
//! would, then reads the published state to decide what to print.

use tokio::sync::broadcast::{self, error::TryRecvError};

use guaumiau_config::{
    DEFAULT_PROFILE, Profile, config_path, load_config, load_config_or_default, parse_api_url,
    save_config,
};
use guaumiau_core::{
    AppController, Notification, NotificationKind, Pet, PetListState, SessionStatus, messages,
};

use crate::cli::{
    Command, ConfigCommand, GlobalOpts, LoginArgs, OutputFormat, PetsCommand, RegisterArgs,
};
use crate::error::CliError;
use crate::output;

// ── Notifications ────────────────────────────────────────────────────

/// Collects the controller's transient notifications for one command.
struct Notices {
    rx: broadcast::Receiver<Notification>,
    color: bool,
    quiet: bool,
}

impl Notices {
    fn new(controller: &AppController, global: &GlobalOpts) -> Self {
        Self {
            rx: controller.notifications(),
            color: output::should_color(global.color),
            quiet: global.quiet,
        }
    }

    /// Print informational notices; return the last error message, if any.
    fn flush(&mut self) -> Option<String> {
        let mut failure = None;
        loop {
            match self.rx.try_recv() {
                Ok(notice) if notice.kind == NotificationKind::Error => {
                    failure = Some(notice.message);
                }
                Ok(notice) => output::print_notice(&notice, self.color, self.quiet),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notifications dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        failure
    }
}

// ── Dispatch ─────────────────────────────────────────────────────────

pub async fn dispatch(
    cmd: Command,
    controller: &AppController,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut notices = Notices::new(controller, global);
    match cmd {
        Command::Status => status(controller, global).await,
        Command::Login(args) => login(args, controller, &mut notices).await,
        Command::Logout => {
            controller.logout().await;
            output::print_output("Logged out", global.quiet);
            Ok(())
        }
        Command::Register(args) => register(args, controller, &mut notices).await,
        Command::Pets(args) => pets(args.command, controller, global, &mut notices).await,
        Command::Config(args) => config(args.command, global),
    }
}

// ── Session ──────────────────────────────────────────────────────────

async fn status(controller: &AppController, global: &GlobalOpts) -> Result<(), CliError> {
    controller.on_app_start().await;
    let session = controller.login_snapshot().session;
    let api_url = controller.config().api_url.as_str();

    let out = match global.output {
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "session": session_label(session),
            "api_url": api_url,
        }))?,
        OutputFormat::Plain => session_label(session).to_owned(),
        OutputFormat::Table => match controller.pet_snapshot() {
            PetListState::Success(pets) if session.is_active() => {
                format!("Session active at {api_url} ({} pets)", pets.len())
            }
            _ if session.is_active() => format!("Session active at {api_url}"),
            _ => format!("No session stored for {api_url}"),
        },
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

fn session_label(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Unknown => "unknown",
        SessionStatus::Active => "active",
        SessionStatus::Inactive => "inactive",
    }
}

async fn login(
    args: LoginArgs,
    controller: &AppController,
    notices: &mut Notices,
) -> Result<(), CliError> {
    let password = match args.password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };

    controller.set_login_email(args.email);
    controller.set_login_password(password);
    controller.login().await;

    notices.flush();
    let state = controller.login_snapshot();
    if state.login_success {
        Ok(())
    } else {
        Err(CliError::AuthFailed {
            message: state.error_message.unwrap_or_default(),
        })
    }
}

// ── Registration ─────────────────────────────────────────────────────

async fn register(
    args: RegisterArgs,
    controller: &AppController,
    notices: &mut Notices,
) -> Result<(), CliError> {
    let (password, confirm) = match args.password {
        Some(password) => (password.clone(), password),
        None => (prompt("Password: ")?, prompt("Confirm password: ")?),
    };

    controller.set_full_name(args.name);
    controller.set_email(args.email);
    controller.set_password(password);
    controller.set_confirm_password(confirm);
    controller.set_phone(args.phone);
    for pet in args.pets {
        controller.add_pet_local(pet);
    }

    let form = controller.register_snapshot();
    for warning in [&form.email_error, &form.password_error].into_iter().flatten() {
        tracing::warn!(%warning, "form check");
    }

    controller.register().await;

    let failure = notices.flush();
    let state = controller.register_snapshot();
    if state.registration_success {
        return Ok(());
    }
    let message = failure.unwrap_or_else(|| messages::REGISTER_FAILED.to_owned());
    Err(match state.error_message {
        Some(_) => CliError::Rejected { message },
        None => CliError::Validation { message },
    })
}

// ── Pets ─────────────────────────────────────────────────────────────

async fn pets(
    cmd: PetsCommand,
    controller: &AppController,
    global: &GlobalOpts,
    notices: &mut Notices,
) -> Result<(), CliError> {
    controller.on_app_start().await;
    if !controller.login_snapshot().session.is_active() {
        return Err(CliError::NotLoggedIn);
    }

    match cmd {
        PetsCommand::List => {}
        PetsCommand::Add { name, pet_type } => controller.add_pet(Pet::new(name, pet_type)).await,
        PetsCommand::Update { id, name, pet_type } => {
            controller.update_pet(id, Pet::new(name, pet_type)).await;
        }
        PetsCommand::Delete { id } => controller.delete_pet(id).await,
    }

    let failure = notices.flush();
    match controller.pet_snapshot() {
        PetListState::Success(pets) => {
            output::print_output(&output::render_pets(global.output, &pets)?, global.quiet);
        }
        PetListState::Error(message) => return Err(CliError::Rejected { message }),
        PetListState::Loading => {
            return Err(CliError::Rejected {
                message: messages::LOAD_PETS_FAILED.into(),
            });
        }
    }

    match failure {
        Some(message) => Err(CliError::Rejected { message }),
        None => Ok(()),
    }
}

// ── Config ───────────────────────────────────────────────────────────

pub fn config(cmd: ConfigCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
        }
        ConfigCommand::Show => {
            let cfg = load_config()?;
            output::print_output(&toml::to_string_pretty(&cfg)?, global.quiet);
        }
        ConfigCommand::Init {
            api_url,
            token_store,
        } => {
            let api_url = parse_api_url(&api_url)?;
            let mut cfg = load_config_or_default();
            let name = global.profile.clone().unwrap_or_else(|| DEFAULT_PROFILE.into());

            cfg.profiles.insert(
                name.clone(),
                Profile {
                    api_url: api_url.to_string(),
                    token_store: token_store.map(Into::into),
                    ..Profile::default()
                },
            );
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(name.clone());
            }
            save_config(&cfg)?;
            output::print_output(
                &format!("Profile '{name}' written to {}", config_path().display()),
                global.quiet,
            );
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String, CliError> {
    rpassword::prompt_password(label).map_err(CliError::Prompt)
}
