//! Supported shells and their startup files.
//!
//! - [`integration`] — enable/disable the managed rc-file blocks
//! - [`script`] — render `init` output and persisted env files
pub mod integration;
pub mod script;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::TargetError;

/// A shell whose startup file bluefin-cli can manage.
///
/// # Examples
///
/// ```
/// use bluefin_cli::shell::{Shell, ShellFamily};
///
/// let zsh: Shell = "zsh".parse().unwrap();
/// assert_eq!(zsh, Shell::Zsh);
/// assert_eq!(zsh.family(), ShellFamily::Posix);
/// assert!("powershell".parse::<Shell>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shell {
    /// GNU Bash.
    Bash,
    /// Z shell.
    Zsh,
    /// Fish.
    Fish,
}

/// Syntax family for emitted shell code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFamily {
    /// `export NAME=value` shells (bash, zsh).
    Posix,
    /// `set -gx NAME value`.
    Fish,
}

impl Shell {
    /// Every supported shell, in display order.
    pub const ALL: [Self; 3] = [Self::Bash, Self::Zsh, Self::Fish];

    /// Lowercase shell name, which is also its binary name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
            Self::Fish => "fish",
        }
    }

    /// Syntax family used when rendering shell code.
    #[must_use]
    pub const fn family(self) -> ShellFamily {
        match self {
            Self::Bash | Self::Zsh => ShellFamily::Posix,
            Self::Fish => ShellFamily::Fish,
        }
    }

    /// The startup file sourced by interactive sessions of this shell.
    #[must_use]
    pub fn rc_path(self, home: &Path) -> PathBuf {
        match self {
            Self::Bash => home.join(".bashrc"),
            Self::Zsh => home.join(".zshrc"),
            Self::Fish => home.join(".config").join("fish").join("config.fish"),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shell {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|shell| shell.name() == lower)
            .ok_or_else(|| TargetError::UnsupportedShell(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Bash".parse::<Shell>().unwrap(), Shell::Bash);
        assert_eq!(" FISH ".parse::<Shell>().unwrap(), Shell::Fish);
    }

    #[test]
    fn parse_rejects_unsupported() {
        let err = "powershell".parse::<Shell>().unwrap_err();
        assert!(matches!(err, TargetError::UnsupportedShell(ref s) if s == "powershell"));
    }

    #[test]
    fn rc_paths() {
        let home = Path::new("/home/u");
        assert_eq!(Shell::Bash.rc_path(home), PathBuf::from("/home/u/.bashrc"));
        assert_eq!(Shell::Zsh.rc_path(home), PathBuf::from("/home/u/.zshrc"));
        assert_eq!(
            Shell::Fish.rc_path(home),
            PathBuf::from("/home/u/.config/fish/config.fish")
        );
    }

    #[test]
    fn families() {
        assert_eq!(Shell::Bash.family(), ShellFamily::Posix);
        assert_eq!(Shell::Zsh.family(), ShellFamily::Posix);
        assert_eq!(Shell::Fish.family(), ShellFamily::Fish);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for shell in Shell::ALL {
            assert_eq!(shell.to_string().parse::<Shell>().unwrap(), shell);
        }
    }
}
