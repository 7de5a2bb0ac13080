//! Command: manage a Brewfile in the working directory.
use std::path::Path;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{BrewfileAction, BrewfileOpts};
use crate::resources::ResourceChange;
use crate::resources::brewfile::Brewfile;

/// Run the brewfile command against `dir/Brewfile`.
///
/// # Errors
///
/// Returns an error when `init` finds an existing file, when `add` or
/// `apply` find none, or when brew fails.
pub fn run(setup: &CommandSetup, opts: &BrewfileOpts, dir: &Path) -> Result<()> {
    let log = &setup.ctx.log;
    let brewfile = Brewfile::in_dir(dir);
    match &opts.action {
        BrewfileAction::Init => {
            let path = brewfile.init()?;
            log.info(&format!("created {}", path.display()));
        }
        BrewfileAction::Add { package } => match brewfile.add(package)? {
            ResourceChange::AlreadyCorrect => log.info(&format!("{package} is already listed")),
            _ => log.info(&format!("added {package} to {}", brewfile.path().display())),
        },
        BrewfileAction::Apply => brewfile.apply(setup.executor())?,
    }
    Ok(())
}
