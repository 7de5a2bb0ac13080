//! Starship prompt installation and presets.
use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::environment::Environment;
use crate::error::TargetError;
use crate::exec::Executor;
use crate::resources::package::BREW_ENV;

/// Upstream installer used when Homebrew is not available.
pub const INSTALL_SCRIPT: &str = "curl -sS https://starship.rs/install.sh | sh -s -- -y";

/// A `starship preset` name with its menu label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Name passed to `starship preset`.
    pub name: &'static str,
    /// Menu label.
    pub label: &'static str,
}

/// Presets offered in the theme menu.
pub const PRESETS: [Preset; 11] = [
    Preset { name: "nerd-font-symbols", label: "Nerd Font Symbols" },
    Preset { name: "no-runtime-versions", label: "No Runtime Versions" },
    Preset { name: "plain-text-symbols", label: "Plain Text Symbols" },
    Preset { name: "pure-preset", label: "Pure Preset" },
    Preset { name: "tokyo-night", label: "Tokyo Night" },
    Preset { name: "gruvbox-rainbow", label: "Gruvbox Rainbow" },
    Preset { name: "catppuccin-powerline", label: "Catppuccin Powerline" },
    Preset { name: "jetpack", label: "Jetpack" },
    Preset { name: "no-empty-icons", label: "No Empty Icons" },
    Preset { name: "no-nerd-font", label: "No Nerd Font" },
    Preset { name: "pastel-powerline", label: "Pastel Powerline" },
];

/// How [`install`] obtained starship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Already on `PATH`.
    AlreadyInstalled,
    /// Installed with `brew`.
    Homebrew,
    /// Installed with the upstream script.
    Script,
}

/// Make sure `starship` is on `PATH`.
///
/// # Errors
///
/// Returns an error if the installer fails.
pub fn install(executor: &dyn Executor) -> Result<InstallOutcome> {
    if executor.which("starship") {
        return Ok(InstallOutcome::AlreadyInstalled);
    }
    if executor.which("brew") {
        executor
            .run_interactive("brew", &["install", "starship"], &BREW_ENV)
            .context("brew install starship")?;
        return Ok(InstallOutcome::Homebrew);
    }
    executor
        .run_interactive("sh", &["-c", INSTALL_SCRIPT], &[])
        .context("starship install script")?;
    Ok(InstallOutcome::Script)
}

/// Look up a preset by name.
///
/// # Errors
///
/// Returns [`TargetError::UnknownPreset`] if no preset has that name.
pub fn find_preset(name: &str) -> Result<&'static Preset, TargetError> {
    let name = name.trim();
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| TargetError::UnknownPreset {
            name: name.to_string(),
            valid: PRESETS.iter().map(|p| p.name).collect::<Vec<_>>().join(", "),
        })
}

/// `~/.config/starship.toml`.
#[must_use]
pub fn config_path(env: &Environment) -> PathBuf {
    env.home.join(".config").join("starship.toml")
}

/// Write preset `name` to `~/.config/starship.toml`.
///
/// # Errors
///
/// Returns an error for an unknown preset, if `~/.config` cannot be
/// created, or if `starship preset` fails.
pub fn apply_preset(env: &Environment, executor: &dyn Executor, name: &str) -> Result<PathBuf> {
    let preset = find_preset(name)?;
    let path = config_path(env);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let target = path.to_string_lossy();
    executor
        .run_interactive("starship", &["preset", preset.name, "-o", target.as_ref()], &[])
        .with_context(|| format!("applying starship preset '{}'", preset.name))?;
    Ok(path)
}
