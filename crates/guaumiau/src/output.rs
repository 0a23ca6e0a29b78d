//! Output formatting: table, JSON, plain.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use guaumiau_core::{Notification, NotificationKind, Pet};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

#[derive(Tabled)]
struct PetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Nombre")]
    name: String,
    #[tabled(rename = "Tipo")]
    pet_type: String,
    #[tabled(rename = "Dueño")]
    owner: String,
}

impl From<&Pet> for PetRow {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.map(|id| id.to_string()).unwrap_or_default(),
            name: pet.name.clone(),
            pet_type: pet.pet_type.clone(),
            owner: pet.owner_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }
}

pub fn render_pets(format: OutputFormat, pets: &[Pet]) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<PetRow> = pets.iter().map(PetRow::from).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(pets)?,
        OutputFormat::Plain => pets
            .iter()
            .map(|p| format!("{}\t{}", p.id.unwrap_or_default(), p.name))
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a notification to stderr. Errors are left to the caller.
pub fn print_notice(notice: &Notification, color: bool, quiet: bool) {
    if quiet {
        return;
    }
    let mut stderr = io::stderr().lock();
    let _ = match (notice.kind, color) {
        (NotificationKind::Success, true) => writeln!(stderr, "{}", notice.message.green()),
        (NotificationKind::Error, true) => writeln!(stderr, "{}", notice.message.red()),
        _ => writeln!(stderr, "{}", notice.message),
    };
}
