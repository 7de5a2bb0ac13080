//! Command: install starship and apply presets.
use std::io::Write;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{StarshipAction, StarshipOpts};
use crate::starship::{self, InstallOutcome, PRESETS};
use crate::ui::Prompter;

/// Run the starship command.
///
/// Without a subcommand starship is installed and the preset picker opened.
///
/// # Errors
///
/// Returns an error if installation fails or a preset cannot be applied.
pub fn run(
    setup: &CommandSetup,
    opts: &StarshipOpts,
    prompter: &dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    match &opts.action {
        Some(StarshipAction::Install) => install(setup),
        Some(StarshipAction::Theme { name }) => theme(setup, name.as_deref(), prompter),
        None => {
            writeln!(out, "{}", setup.theme.title("Starship Prompt"))?;
            install(setup)?;
            theme(setup, None, prompter)
        }
    }
}

/// Install starship unless it is already on `PATH`.
///
/// # Errors
///
/// Returns an error if the installer fails.
pub fn install(setup: &CommandSetup) -> Result<()> {
    let log = &setup.ctx.log;
    match starship::install(setup.executor())? {
        InstallOutcome::AlreadyInstalled => log.info("starship is already installed"),
        InstallOutcome::Homebrew => log.info("installed starship with Homebrew"),
        InstallOutcome::Script => log.info("installed starship with the upstream script"),
    }
    Ok(())
}

/// Apply preset `name`, or one picked from the preset list.
///
/// # Errors
///
/// Returns an error for an unknown preset or if `starship preset` fails.
pub fn theme(setup: &CommandSetup, name: Option<&str>, prompter: &dyn Prompter) -> Result<()> {
    let chosen = match name {
        Some(n) => n.to_string(),
        None => {
            let items: Vec<String> = PRESETS
                .iter()
                .map(|p| format!("{} ({})", p.label, p.name))
                .collect();
            match prompter.select("Select a starship preset", &items, 0)? {
                Some(i) => PRESETS.get(i).map(|p| p.name.to_string()).unwrap_or_default(),
                None => return Ok(()),
            }
        }
    };
    let path = starship::apply_preset(setup.env(), setup.executor(), &chosen)?;
    setup
        .ctx
        .log
        .info(&format!("applied preset {chosen} to {}", path.display()));
    Ok(())
}
