//! Message of the day: tips, OS banner, and the shell hook.
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context as _, Result};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::motd::{FILE_NAME, MotdConfig};
use crate::environment::Environment;
use crate::error::TargetError;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::{Os, Platform};
use crate::shell::Shell;
use crate::shell::integration::{self, Block};

/// Linux OS identification file.
pub const OS_RELEASE: &str = "/etc/os-release";

/// Tips installed by [`setup`] as `NN-tip.md`.
pub const DEFAULT_TIPS: [&str; 15] = [
    "Use `brew search` and `brew install` to install packages. Homebrew will take care of updates automatically",
    "`tldr vim` will give you the basic rundown on commands for a given tool",
    "Performance profiling tools are built-in: try `top`, `htop`, and other debugging tools",
    "Switch shells safely: change your shell in Terminal settings instead of system-wide",
    "Container development is OS-agnostic - your devcontainers work on Linux, macOS, and Windows",
    "Use `docker compose` for multi-container development if devcontainers don't fit your workflow",
    "Bluefin separates the OS from your development environment - embrace the cloud-native workflow",
    "Check out DevPod for open-source, client-only development environments that work with any IDE",
    "Develop with devcontainers! Use `devcontainer.json` files in your projects for isolated, reproducible environments",
    "VS Code comes with devcontainers extension pre-installed - perfect for containerized development",
    "Use `eza -l --icons` for a beautiful file listing with icons and colors",
    "The `bat` command is like `cat` but with syntax highlighting and Git integration",
    "Navigate directories faster with `zoxide` - just use `z <partial-name>` to jump around",
    "Search your shell history with `atuin` using Ctrl+R for a better history search experience",
    "Customize your prompt with `starship config` to modify colors, icons, and modules",
];

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Directory holding the tip files.
#[must_use]
pub fn tips_dir(env: &Environment) -> PathBuf {
    env.motd_dir().join("tips")
}

/// Path of `motd.json`.
#[must_use]
pub fn config_path(env: &Environment) -> PathBuf {
    env.motd_dir().join(FILE_NAME)
}

/// Create the tips directory, add any missing default tips, and write
/// `motd.json` if it does not exist.
///
/// Existing tips and settings are left as they are.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be written.
pub fn setup(env: &Environment) -> Result<()> {
    let tips = tips_dir(env);
    std::fs::create_dir_all(&tips).with_context(|| format!("creating {}", tips.display()))?;
    for (i, tip) in DEFAULT_TIPS.iter().enumerate() {
        let file = tips.join(format!("{:02}-tip.md", i + 1));
        if !file.exists() {
            std::fs::write(&file, tip).with_context(|| format!("writing {}", file.display()))?;
        }
    }
    let config = config_path(env);
    if !config.exists() {
        MotdConfig::default().save(&config)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// OS name and version shown in the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// e.g. `Bluefin`, `macOS`.
    pub name: String,
    /// e.g. `42`, `15.1`.
    pub tag: String,
}

impl ImageInfo {
    /// Detect from `os_release` on Linux or `sw_vers` on macOS.
    ///
    /// Falls back to the OS name and `unknown`.
    #[must_use]
    pub fn detect(platform: &Platform, executor: &dyn Executor, os_release: &Path) -> Self {
        let (name, tag) = match platform.os {
            Os::MacOs => {
                let tag = executor
                    .run("sw_vers", &["-productVersion"])
                    .ok()
                    .map(|r| r.stdout.trim().to_string())
                    .filter(|v| !v.is_empty());
                (Some("macOS".to_string()), tag)
            }
            Os::Linux => std::fs::read_to_string(os_release)
                .map(|text| parse_os_release(&text))
                .unwrap_or_default(),
            Os::Other => (None, None),
        };
        Self {
            name: name.unwrap_or_else(|| platform.os.to_string()),
            tag: tag.unwrap_or_else(|| "unknown".to_string()),
        }
    }
}

/// `NAME` and `VERSION_ID` from an os-release file, quotes removed.
#[must_use]
pub fn parse_os_release(text: &str) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut version = None;
    for line in text.lines() {
        if let Some(v) = line.strip_prefix("NAME=") {
            name = Some(v.trim_matches('"').to_string());
        } else if let Some(v) = line.strip_prefix("VERSION_ID=") {
            version = Some(v.trim_matches('"').to_string());
        }
    }
    (name, version)
}

/// A random `*.md` tip from `dir`, prefixed for display.
///
/// Returns `None` when the directory has no readable tips.
pub fn random_tip<R: Rng + ?Sized>(dir: &Path, rng: &mut R) -> Option<String> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    let file = files.choose(rng)?;
    let content = std::fs::read_to_string(file).ok()?;
    Some(format!("💡 **Tip:** {}", content.trim()))
}

/// The banner as markdown.
#[must_use]
pub fn render(info: &ImageInfo, tip: Option<&str>) -> String {
    format!(
        "# 󱍢 Welcome to Bluefin CLI
󱋩 {name}:{tag}

|  Command | Description |
| ------- | ----------- |
| `bluefin-cli shell bash on`  | Enable shell integration for bash  |
| `bluefin-cli status` | Show current configuration |
| `bluefin-cli help` | Show all available commands |
| `brew help` | Manage command line packages |

{tip}

- **󰊤** [GitHub Issues](https://github.com/projectbluefin/bluefin-cli/issues)
- **󰈙** [Documentation](https://github.com/projectbluefin/bluefin-cli)
",
        name = info.name,
        tag = info.tag,
        tip = tip.unwrap_or_default(),
    )
}

/// Print the banner, through `glow` when available.
///
/// Plain markdown is written to `out` when `glow` is missing or fails.
///
/// # Errors
///
/// Returns an error if setup fails or `out` cannot be written.
pub fn show(
    env: &Environment,
    platform: &Platform,
    executor: &dyn Executor,
    log: &dyn Log,
    out: &mut dyn Write,
) -> Result<()> {
    setup(env)?;
    let config = MotdConfig::load(&config_path(env)).unwrap_or_else(|e| {
        log.warn(&format!("{e}; using defaults"));
        MotdConfig::default()
    });
    let tips = config
        .tips_directory
        .as_ref()
        .map_or_else(|| tips_dir(env), PathBuf::from);
    let info = ImageInfo::detect(platform, executor, Path::new(OS_RELEASE));
    let tip = random_tip(&tips, &mut rand::thread_rng());
    let content = render(&info, tip.as_deref());

    if executor.which("glow") {
        let args = ["-s", config.default_theme.as_str(), "-w", "80", "-"];
        match executor.run_with_stdin("glow", &args, &content) {
            Ok(()) => return Ok(()),
            Err(e) => log.debug(&format!("glow failed, printing plain text: {e:#}")),
        }
    }
    writeln!(out, "{content}")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

/// Shells a `motd toggle` applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotdTarget {
    /// One shell.
    Shell(Shell),
    /// bash, zsh and fish.
    All,
}

impl MotdTarget {
    /// The shells covered, in display order.
    #[must_use]
    pub fn shells(self) -> Vec<Shell> {
        match self {
            Self::Shell(shell) => vec![shell],
            Self::All => Shell::ALL.to_vec(),
        }
    }
}

impl fmt::Display for MotdTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell(shell) => shell.fmt(f),
            Self::All => f.write_str("all"),
        }
    }
}

impl FromStr for MotdTarget {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse()
            .map(Self::Shell)
            .map_err(|_| TargetError::UnknownMotdTarget(s.to_string()))
    }
}

/// Add or remove the MOTD block for each shell in `target`.
///
/// A failure for one shell is logged and the others still run. Returns the
/// number of shells that failed.
///
/// # Errors
///
/// Returns an error only if setup fails.
pub fn toggle(env: &Environment, target: MotdTarget, enable: bool, log: &dyn Log) -> Result<usize> {
    if enable {
        setup(env)?;
    }
    let mut failures = 0;
    for shell in target.shells() {
        match integration::toggle(env, shell, Block::Motd, enable) {
            Ok(change) => log.info(&format!("MOTD {}", integration::describe(shell, enable, &change))),
            Err(e) => {
                failures += 1;
                log.error(&format!("MOTD for {shell}: {e:#}"));
            }
        }
    }
    Ok(failures)
}

/// Validate and persist the glow theme.
///
/// # Errors
///
/// Returns [`TargetError::UnknownTheme`] for an unknown theme, or an error if
/// `motd.json` cannot be read or written.
pub fn set_theme(env: &Environment, theme: &str) -> Result<String> {
    let path = config_path(env);
    let mut config = MotdConfig::load(&path)?;
    config.set_theme(theme)?;
    config.save(&path)?;
    Ok(config.default_theme)
}
