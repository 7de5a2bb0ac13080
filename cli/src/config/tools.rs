//! Registry of the shell-enhancement tools bluefin-cli manages.
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::shell::Shell;

/// A managed tool.
///
/// Declaration order is registry order: it drives the order of emitted
/// exports, installs and status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tool {
    /// `ls` replacement.
    Eza,
    /// `grep` replacement.
    Ugrep,
    /// `cat` replacement.
    Bat,
    /// Shell history search.
    Atuin,
    /// Prompt.
    Starship,
    /// Directory jumper.
    Zoxide,
    /// Rust coreutils.
    UutilsCoreutils,
    /// Rust findutils.
    UutilsFindutils,
    /// Rust diffutils.
    UutilsDiffutils,
    /// Multi-shell completions.
    Carapace,
}

/// Static description of a managed tool.
#[derive(Debug, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// The tool this entry describes.
    pub tool: Tool,
    /// Display name.
    pub name: &'static str,
    /// Lowercase key used in `shell.json` and on the command line.
    pub key: &'static str,
    /// One-line description shown in menus.
    pub description: &'static str,
    /// Binary looked up on `PATH` to decide whether it is installed.
    pub binary: &'static str,
    /// Homebrew formula name.
    pub package: &'static str,
    /// Enabled state when the config file says nothing.
    pub default_enabled: bool,
    /// Exported variable the shell scripts read.
    pub env_var: &'static str,
    /// Per-shell overrides of `default_enabled`.
    pub shell_defaults: &'static [(Shell, bool)],
}

static EZA: ToolDescriptor = ToolDescriptor {
    tool: Tool::Eza,
    name: "Eza",
    key: "eza",
    description: "Modern ls replacement",
    binary: "eza",
    package: "eza",
    default_enabled: true,
    env_var: "BLUEFIN_SHELL_ENABLE_EZA",
    shell_defaults: &[],
};

static UGREP: ToolDescriptor = ToolDescriptor {
    tool: Tool::Ugrep,
    name: "Ugrep",
    key: "ugrep",
    description: "Faster grep with interactive search",
    binary: "ug",
    package: "ugrep",
    default_enabled: true,
    env_var: "BLUEFIN_SHELL_ENABLE_UGREP",
    shell_defaults: &[],
};

static BAT: ToolDescriptor = ToolDescriptor {
    tool: Tool::Bat,
    name: "Bat",
    key: "bat",
    description: "cat with syntax highlighting",
    binary: "bat",
    package: "bat",
    default_enabled: true,
    env_var: "BLUEFIN_SHELL_ENABLE_BAT",
    shell_defaults: &[],
};

static ATUIN: ToolDescriptor = ToolDescriptor {
    tool: Tool::Atuin,
    name: "Atuin",
    key: "atuin",
    description: "Searchable shell history",
    binary: "atuin",
    package: "atuin",
    default_enabled: false,
    env_var: "BLUEFIN_SHELL_ENABLE_ATUIN",
    shell_defaults: &[(Shell::Zsh, true), (Shell::Fish, true)],
};

static STARSHIP: ToolDescriptor = ToolDescriptor {
    tool: Tool::Starship,
    name: "Starship",
    key: "starship",
    description: "Cross-shell prompt",
    binary: "starship",
    package: "starship",
    default_enabled: true,
    env_var: "BLUEFIN_SHELL_ENABLE_STARSHIP",
    shell_defaults: &[],
};

static ZOXIDE: ToolDescriptor = ToolDescriptor {
    tool: Tool::Zoxide,
    name: "Zoxide",
    key: "zoxide",
    description: "Smarter cd",
    binary: "zoxide",
    package: "zoxide",
    default_enabled: true,
    env_var: "BLUEFIN_SHELL_ENABLE_ZOXIDE",
    shell_defaults: &[],
};

static UUTILS_COREUTILS: ToolDescriptor = ToolDescriptor {
    tool: Tool::UutilsCoreutils,
    name: "UutilsCoreutils",
    key: "uutilscoreutils",
    description: "Rust rewrite of GNU coreutils",
    binary: "hashsum",
    package: "uutils-coreutils",
    default_enabled: true,
    env_var: "BLUEFIN_SHELL_ENABLE_UUTILSCOREUTILS",
    shell_defaults: &[],
};

static UUTILS_FINDUTILS: ToolDescriptor = ToolDescriptor {
    tool: Tool::UutilsFindutils,
    name: "UutilsFindutils",
    key: "uutilsfindutils",
    description: "Rust rewrite of GNU findutils",
    binary: "ufind",
    package: "uutils-findutils",
    default_enabled: true,
    env_var: "BLUEFIN_SHELL_ENABLE_UUTILSFINDUTILS",
    shell_defaults: &[],
};

static UUTILS_DIFFUTILS: ToolDescriptor = ToolDescriptor {
    tool: Tool::UutilsDiffutils,
    name: "UutilsDiffutils",
    key: "uutilsdiffutils",
    description: "Rust rewrite of GNU diffutils",
    binary: "udiffutils",
    package: "uutils-diffutils",
    default_enabled: true,
    env_var: "BLUEFIN_SHELL_ENABLE_UUTILSDIFFUTILS",
    shell_defaults: &[],
};

static CARAPACE: ToolDescriptor = ToolDescriptor {
    tool: Tool::Carapace,
    name: "Carapace",
    key: "carapace",
    description: "Multi-shell completion engine",
    binary: "carapace",
    package: "carapace",
    default_enabled: false,
    env_var: "BLUEFIN_SHELL_ENABLE_CARAPACE",
    shell_defaults: &[],
};

impl Tool {
    /// Every managed tool in registry order.
    pub const ALL: [Self; 10] = [
        Self::Eza,
        Self::Ugrep,
        Self::Bat,
        Self::Atuin,
        Self::Starship,
        Self::Zoxide,
        Self::UutilsCoreutils,
        Self::UutilsFindutils,
        Self::UutilsDiffutils,
        Self::Carapace,
    ];

    /// Static description of this tool.
    #[must_use]
    pub fn descriptor(self) -> &'static ToolDescriptor {
        match self {
            Self::Eza => &EZA,
            Self::Ugrep => &UGREP,
            Self::Bat => &BAT,
            Self::Atuin => &ATUIN,
            Self::Starship => &STARSHIP,
            Self::Zoxide => &ZOXIDE,
            Self::UutilsCoreutils => &UUTILS_COREUTILS,
            Self::UutilsFindutils => &UUTILS_FINDUTILS,
            Self::UutilsDiffutils => &UUTILS_DIFFUTILS,
            Self::Carapace => &CARAPACE,
        }
    }

    /// Lowercase key.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// Enabled state when nothing is configured, honouring the per-shell
    /// override when `shell` is given.
    ///
    /// # Examples
    ///
    /// ```
    /// use bluefin_cli::config::tools::Tool;
    /// use bluefin_cli::shell::Shell;
    ///
    /// assert!(!Tool::Atuin.default_for(None));
    /// assert!(!Tool::Atuin.default_for(Some(Shell::Bash)));
    /// assert!(Tool::Atuin.default_for(Some(Shell::Zsh)));
    /// ```
    #[must_use]
    pub fn default_for(self, shell: Option<Shell>) -> bool {
        let desc = self.descriptor();
        shell
            .and_then(|s| {
                desc.shell_defaults
                    .iter()
                    .find(|(candidate, _)| *candidate == s)
                    .map(|(_, enabled)| *enabled)
            })
            .unwrap_or(desc.default_enabled)
    }

    /// Comma-separated list of every key, for error messages.
    #[must_use]
    pub fn valid_keys() -> String {
        Self::ALL.map(Self::key).join(", ")
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tool {
    type Err = ConfigError;

    /// Parse a key or display name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tool| {
                let desc = tool.descriptor();
                desc.key.eq_ignore_ascii_case(wanted) || desc.name.eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ConfigError::UnknownTool {
                name: s.to_string(),
                valid: Self::valid_keys(),
            })
    }
}
