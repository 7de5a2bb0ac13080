//! Command: print version information.
use std::io::Write;

use anyhow::Result;

/// Version baked in at build time, or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("BLUEFIN_CLI_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "bluefin-cli {}", version())?;
    Ok(())
}
