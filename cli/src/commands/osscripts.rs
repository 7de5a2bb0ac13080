//! Command: list and run OS-provided just recipes and scripts.
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::OsscriptsOpts;
use crate::recipes;
use crate::ui::Prompter;

/// Run the osscripts command over the recipes found under `root`.
///
/// # Errors
///
/// Returns an error if `just` is missing, nothing was found, or the chosen
/// recipe fails.
pub fn run(
    setup: &CommandSetup,
    opts: &OsscriptsOpts,
    root: &Path,
    prompter: &dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    let found = recipes::available(setup.executor(), root)?;
    if opts.list {
        writeln!(out, "{}", setup.theme.title("OS Scripts"))?;
        for recipe in &found {
            writeln!(out, "  {recipe}")?;
        }
        return Ok(());
    }

    let items: Vec<String> = found.iter().map(ToString::to_string).collect();
    let Some(recipe) = prompter
        .select("Select a script to run", &items, 0)?
        .and_then(|i| found.get(i))
    else {
        return Ok(());
    };
    setup.ctx.log.info(&format!("running {recipe}"));
    recipe.run(setup.executor())
}
