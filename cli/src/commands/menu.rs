//! Command: the interactive main menu.
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use super::{CommandSetup, install, motd, shell, starship, status};
use crate::cli::{OsscriptsOpts, StarshipOpts};
use crate::recipes;
use crate::ui::Prompter;

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Status report.
    Status,
    /// Shell integration menu.
    Shell,
    /// MOTD menu.
    Motd,
    /// Homebrew bundles.
    Bundles,
    /// Wallpaper casks.
    Wallpapers,
    /// Starship install and presets.
    Starship,
    /// OS-provided recipes.
    OsScripts,
    /// Leave the menu.
    Exit,
}

impl Entry {
    const fn label(self) -> &'static str {
        match self {
            Self::Status => "Show status",
            Self::Shell => "Shell experience",
            Self::Motd => "Message of the day",
            Self::Bundles => "Install Homebrew bundles",
            Self::Wallpapers => "Install wallpapers",
            Self::Starship => "Starship prompt",
            Self::OsScripts => "OS scripts",
            Self::Exit => "Exit",
        }
    }
}

/// Entries shown for this machine; OS scripts only when some exist.
#[must_use]
pub fn entries(setup: &CommandSetup, share_root: &Path) -> Vec<Entry> {
    let mut entries = vec![
        Entry::Status,
        Entry::Shell,
        Entry::Motd,
        Entry::Bundles,
        Entry::Wallpapers,
        Entry::Starship,
    ];
    if recipes::available(setup.executor(), share_root).is_ok() {
        entries.push(Entry::OsScripts);
    }
    entries.push(Entry::Exit);
    entries
}

/// Loop over the main menu until "Exit" or cancel.
///
/// A failing action is logged and the menu shown again.
///
/// # Errors
///
/// Returns an error only if a prompt or `out` fails.
pub fn run(
    setup: &CommandSetup,
    prompter: &dyn Prompter,
    share_root: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let entries = entries(setup, share_root);
    let items: Vec<String> = entries.iter().map(|e| e.label().to_string()).collect();
    loop {
        writeln!(out, "{}", setup.theme.title("Bluefin CLI"))?;
        let Some(entry) = prompter
            .select("What would you like to do?", &items, 0)?
            .and_then(|i| entries.get(i).copied())
        else {
            return Ok(());
        };
        let result = match entry {
            Entry::Status => status::run(setup, out),
            Entry::Shell => shell::menu(setup, prompter, out),
            Entry::Motd => motd::menu(setup, prompter, out),
            Entry::Bundles => install::menu(setup, prompter, out),
            Entry::Wallpapers => install::install_wallpapers(setup, &[], prompter),
            Entry::Starship => {
                starship::run(setup, &StarshipOpts { action: None }, prompter, out)
            }
            Entry::OsScripts => super::osscripts::run(
                setup,
                &OsscriptsOpts { list: false },
                share_root,
                prompter,
                out,
            ),
            Entry::Exit => return Ok(()),
        };
        if let Err(e) = result {
            setup.ctx.log.error(&format!("{e:#}"));
        }
    }
}
