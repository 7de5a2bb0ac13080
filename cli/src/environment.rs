//! Process inputs captured once per run.
//!
//! Everything below the command layer reads paths and environment variables
//! from an [`Environment`] value instead of `std::env`, so tests can point a
//! whole command at a temporary home directory.
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::shell::Shell;

/// Application directory name under the config and state roots.
pub const APP_DIR: &str = "bluefin-cli";

/// Paths and variables the tool reads from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// User home directory (`$HOME`).
    pub home: PathBuf,
    /// Homebrew prefix (`$HOMEBREW_PREFIX`), `None` when unset or empty.
    pub homebrew_prefix: Option<PathBuf>,
    /// Login shell path (`$SHELL`).
    pub shell: Option<String>,
    /// Desktop session (`$XDG_CURRENT_DESKTOP`).
    pub desktop: Option<String>,
    /// Cache root (`$XDG_CACHE_HOME`), `None` when unset or empty.
    pub cache_home: Option<PathBuf>,
    /// Parent process id, used to guess the interactive shell.
    pub parent_pid: Option<u32>,
}

impl Environment {
    /// Capture the environment of the running process.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is not set.
    pub fn from_process() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("HOME environment variable is not set"))?;
        Ok(Self {
            home,
            homebrew_prefix: non_empty_var("HOMEBREW_PREFIX").map(PathBuf::from),
            shell: non_empty_var("SHELL"),
            desktop: non_empty_var("XDG_CURRENT_DESKTOP"),
            cache_home: non_empty_var("XDG_CACHE_HOME").map(PathBuf::from),
            parent_pid: parent_pid(),
        })
    }

    /// An environment rooted at `home` with no other variables set.
    #[must_use]
    pub fn with_home(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            homebrew_prefix: None,
            shell: None,
            desktop: None,
            cache_home: None,
            parent_pid: None,
        }
    }

    /// `~/.config/bluefin-cli`.
    #[must_use]
    pub fn home_config_dir(&self) -> PathBuf {
        self.home.join(".config").join(APP_DIR)
    }

    /// Directory holding `shell.json`.
    ///
    /// Precedence: `~/.config/bluefin-cli` if it already exists, then
    /// `$HOMEBREW_PREFIX/etc/bluefin-cli`, then `~/.config/bluefin-cli`.
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        let home_config = self.home_config_dir();
        if home_config.is_dir() {
            return home_config;
        }
        self.homebrew_prefix
            .as_ref()
            .map_or(home_config, |prefix| prefix.join("etc").join(APP_DIR))
    }

    /// `~/.local/share/bluefin-cli`.
    #[must_use]
    pub fn state_dir(&self) -> PathBuf {
        self.home.join(".local").join("share").join(APP_DIR)
    }

    /// `~/.local/share/bluefin-cli/motd`.
    #[must_use]
    pub fn motd_dir(&self) -> PathBuf {
        self.state_dir().join("motd")
    }

    /// `$XDG_CACHE_HOME/bluefin-cli`, or `~/.cache/bluefin-cli`.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_home
            .clone()
            .unwrap_or_else(|| self.home.join(".cache"))
            .join(APP_DIR)
    }

    /// Log file for `command` under [`cache_dir`](Self::cache_dir).
    #[must_use]
    pub fn log_file(&self, command: &str) -> PathBuf {
        self.cache_dir().join(format!("{command}.log"))
    }

    /// The login shell, if `$SHELL` names a supported one.
    #[must_use]
    pub fn default_shell(&self) -> Option<Shell> {
        self.shell.as_deref().and_then(shell_from_path)
    }
}

/// Parse the shell name out of a path or command name such as `/usr/bin/zsh`
/// or `-bash` (login shells are reported with a leading dash).
#[must_use]
pub fn shell_from_path(path: &str) -> Option<Shell> {
    let base = Path::new(path.trim().trim_start_matches('-'))
        .file_name()?
        .to_str()?;
    base.parse().ok()
}

#[cfg(unix)]
fn parent_pid() -> Option<u32> {
    Some(std::os::unix::process::parent_id()).filter(|pid| *pid > 0)
}

#[cfg(not(unix))]
const fn parent_pid() -> Option<u32> {
    None
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
