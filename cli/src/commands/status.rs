//! Command: print the status report.
use std::io::Write;

use anyhow::Result;

use super::CommandSetup;
use crate::logging::terminal_columns;
use crate::status::StatusReport;

/// Gather and print the status report at the terminal's width.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(setup: &CommandSetup, out: &mut dyn Write) -> Result<()> {
    render(setup, terminal_columns(), out)
}

/// [`run`] at an explicit `width`.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn render(setup: &CommandSetup, width: usize, out: &mut dyn Write) -> Result<()> {
    let report = StatusReport::gather(&setup.ctx);
    write!(out, "{}", report.render(&setup.theme, width))?;
    Ok(())
}
