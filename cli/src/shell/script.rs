//! Shell code emitted by `bluefin-cli init` and persisted env files.
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;

use super::ShellFamily;
use super::integration::motd_hook as hook_line;
use crate::config::tool_config::ToolConfig;
use crate::environment::Environment;
use crate::resources::helpers::fs::write_with_parents;

const POSIX_SCRIPT: &str = include_str!("../../resources/shell.sh");
const FISH_SCRIPT: &str = include_str!("../../resources/shell.fish");

/// The integration script body for `family`.
#[must_use]
pub const fn embedded_script(family: ShellFamily) -> &'static str {
    match family {
        ShellFamily::Posix => POSIX_SCRIPT,
        ShellFamily::Fish => FISH_SCRIPT,
    }
}

/// One export line per known tool, `1` when enabled and `0` otherwise.
///
/// ```
/// use bluefin_cli::config::tool_config::ToolConfig;
/// use bluefin_cli::shell::{Shell, ShellFamily, script::render_exports};
///
/// let cfg = ToolConfig::defaults(Some(Shell::Bash));
/// let out = render_exports(ShellFamily::Posix, &cfg);
/// assert!(out.starts_with("export BLUEFIN_SHELL_ENABLE_EZA=1\n"));
/// ```
#[must_use]
pub fn render_exports(family: ShellFamily, cfg: &ToolConfig) -> String {
    let mut out = String::new();
    for (tool, enabled) in cfg.iter() {
        let name = tool.descriptor().env_var;
        let value = u8::from(enabled);
        let _ = match family {
            ShellFamily::Posix => writeln!(out, "export {name}={value}"),
            ShellFamily::Fish => writeln!(out, "set -gx {name} {value}"),
        };
    }
    out
}

/// Exports, a blank line, then the integration script.
#[must_use]
pub fn render_init(family: ShellFamily, cfg: &ToolConfig) -> String {
    let mut out = render_exports(family, cfg);
    out.push('\n');
    out.push_str(embedded_script(family));
    out
}

/// The MOTD hook appended by `init --motd`, newline-terminated.
#[must_use]
pub fn motd_hook(family: ShellFamily) -> String {
    format!("\n{}\n", hook_line(family))
}

/// Write `env.sh` and `env.fish` under the state directory.
///
/// Returns the paths written, POSIX first.
///
/// # Errors
///
/// Returns an error if a file or its directory cannot be written.
pub fn write_env_files(env: &Environment, cfg: &ToolConfig) -> Result<Vec<PathBuf>> {
    let dir = env.state_dir().join("shell");
    let files = [
        (dir.join("env.sh"), ShellFamily::Posix),
        (dir.join("env.fish"), ShellFamily::Fish),
    ];
    let mut written = Vec::with_capacity(files.len());
    for (path, family) in files {
        write_with_parents(&path, &render_init(family, cfg))?;
        written.push(path);
    }
    Ok(written)
}
