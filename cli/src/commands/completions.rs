//! Command: print shell completions.
use std::io::Write;

use clap::CommandFactory;

use crate::cli::{Cli, CompletionsOpts};

/// Write the completion script for the requested shell to `out`.
pub fn run(opts: &CompletionsOpts, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(opts.shell, &mut cmd, name, out);
}
