//! Enable and disable bluefin-cli in shell startup files.
use std::collections::BTreeMap;

use anyhow::Result;

use super::{Shell, ShellFamily};
use crate::environment::Environment;
use crate::resources::rc_block::RcBlockResource;
use crate::resources::{Applicable, Resource, ResourceChange, ResourceState};

/// A kind of managed block in an rc file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// Evaluates `bluefin-cli init` on shell startup.
    Shell,
    /// Prints the message of the day in interactive sessions.
    Motd,
}

impl Block {
    /// Name embedded in the block's markers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shell => "shell",
            Self::Motd => "motd",
        }
    }

    /// Body written between the markers for `shell`.
    #[must_use]
    pub fn body(self, shell: Shell) -> String {
        match self {
            Self::Shell => directive(shell),
            Self::Motd => motd_hook(shell.family()).to_string(),
        }
    }
}

/// The line that loads bluefin-cli's init script into `shell`.
///
/// ```
/// use bluefin_cli::shell::{Shell, integration::directive};
///
/// assert_eq!(directive(Shell::Zsh), r#"eval "$(bluefin-cli init zsh)""#);
/// assert_eq!(directive(Shell::Fish), "bluefin-cli init fish | source");
/// ```
#[must_use]
pub fn directive(shell: Shell) -> String {
    match shell.family() {
        ShellFamily::Posix => format!("eval \"$(bluefin-cli init {shell})\""),
        ShellFamily::Fish => format!("bluefin-cli init {shell} | source"),
    }
}

/// Shell code that shows the MOTD when the session is interactive.
#[must_use]
pub const fn motd_hook(family: ShellFamily) -> &'static str {
    match family {
        ShellFamily::Posix => {
            "if [ -t 1 ] && command -v bluefin-cli >/dev/null 2>&1; then bluefin-cli motd show; fi"
        }
        ShellFamily::Fish => {
            "status is-interactive; and type -q bluefin-cli; and bluefin-cli motd show"
        }
    }
}

/// The managed `block` in `shell`'s rc file.
#[must_use]
pub fn rc_block(env: &Environment, shell: Shell, block: Block) -> RcBlockResource {
    RcBlockResource::new(&shell.rc_path(&env.home), block.name(), &block.body(shell))
}

/// Add (`enable`) or remove the managed `block` for `shell`.
///
/// Returns [`ResourceChange::AlreadyCorrect`] when the file was already in
/// the requested state.
///
/// # Errors
///
/// Returns an error if the rc file cannot be read or written, or if it
/// contains a begin marker without a matching end marker.
pub fn toggle(env: &Environment, shell: Shell, block: Block, enable: bool) -> Result<ResourceChange> {
    let resource = rc_block(env, shell, block);
    if enable {
        resource.apply()
    } else {
        resource.remove()
    }
}

/// [`toggle`] for a shell given by name.
///
/// The name is validated before any file is touched.
///
/// # Errors
///
/// Returns [`TargetError::UnsupportedShell`](crate::error::TargetError::UnsupportedShell)
/// for an unknown name, otherwise anything [`toggle`] returns.
pub fn toggle_by_name(
    env: &Environment,
    name: &str,
    block: Block,
    enable: bool,
) -> Result<(Shell, ResourceChange)> {
    let shell: Shell = name.parse()?;
    let change = toggle(env, shell, block, enable)?;
    Ok((shell, change))
}

/// What an rc file holds for one managed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// A complete block is present.
    Enabled,
    /// No block, or no rc file.
    Disabled,
    /// A begin marker without its end marker; enable and disable refuse it.
    Malformed,
}

/// State of `block` in `shell`'s rc file. An unreadable file reads as
/// [`BlockState::Disabled`].
#[must_use]
pub fn block_state(env: &Environment, shell: Shell, block: Block) -> BlockState {
    match rc_block(env, shell, block).current_state() {
        Ok(ResourceState::Correct) => BlockState::Enabled,
        Ok(ResourceState::Invalid { .. }) => BlockState::Malformed,
        Ok(ResourceState::Missing) | Err(_) => BlockState::Disabled,
    }
}

/// Whether a complete `block` is present in each shell's rc file.
#[must_use]
pub fn status(env: &Environment, block: Block) -> BTreeMap<Shell, bool> {
    Shell::ALL
        .into_iter()
        .map(|shell| (shell, rc_block(env, shell, block).is_present()))
        .collect()
}

/// Human-readable outcome of a toggle, e.g. `bash: enabled`.
#[must_use]
pub fn describe(shell: Shell, enable: bool, change: &ResourceChange) -> String {
    let state = if enable { "enabled" } else { "disabled" };
    match change {
        ResourceChange::AlreadyCorrect => format!("{shell}: already {state}"),
        ResourceChange::Skipped { reason } => format!("{shell}: skipped ({reason})"),
        ResourceChange::Applied => format!("{shell}: {state}"),
    }
}
