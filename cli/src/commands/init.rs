//! Command: print the init script a shell evaluates at startup.
use std::io::Write;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{InitOpts, ToolFlags};
use crate::config::tool_config::{ConfigStore, ToolConfig};
use crate::error::ConfigError;
use crate::shell::Shell;
use crate::shell::script::{motd_hook, render_init};

/// Apply `--enable` / `--disable` names to `cfg`; disables win.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownTool`] for a name that is not a tool.
pub fn apply_flags(cfg: &mut ToolConfig, flags: &ToolFlags) -> Result<(), ConfigError> {
    for name in &flags.enable {
        cfg.set_enabled_by_name(name, true)?;
    }
    for name in &flags.disable {
        cfg.set_enabled_by_name(name, false)?;
    }
    Ok(())
}

/// Run the init command.
///
/// The saved config is never modified; flags only affect this output. A
/// broken config file falls back to defaults so shell startup keeps working.
///
/// # Errors
///
/// Returns an error for an unsupported shell, an unknown tool name, or if
/// `out` cannot be written.
pub fn run(setup: &CommandSetup, opts: &InitOpts, out: &mut dyn Write) -> Result<()> {
    let shell: Shell = opts.shell.parse()?;
    let mut cfg = ConfigStore::resolve(setup.env()).load_or_default(Some(shell), &*setup.ctx.log);
    apply_flags(&mut cfg, &opts.tools)?;

    write!(out, "{}", render_init(shell.family(), &cfg))?;
    if opts.motd {
        write!(out, "{}", motd_hook(shell.family()))?;
    }
    Ok(())
}
