//! Which managed tools are enabled, and where that is persisted.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::tools::Tool;
use crate::environment::Environment;
use crate::error::ConfigError;
use crate::logging::Log;
use crate::shell::Shell;

/// Current config file name.
pub const FILE_NAME: &str = "shell.json";

/// Config file name used by earlier releases; renamed on first resolve.
pub const LEGACY_FILE_NAME: &str = "bling.json";

/// Enabled state for every managed tool.
///
/// Always fully resolved: every [`Tool`] has an entry, so there is no
/// "unset" state to fall back from at lookup time.
///
/// # Examples
///
/// ```
/// use bluefin_cli::config::tool_config::ToolConfig;
/// use bluefin_cli::config::tools::Tool;
///
/// let mut cfg = ToolConfig::defaults(None);
/// assert!(cfg.is_enabled(Tool::Eza));
/// cfg.set_enabled(Tool::Eza, false);
/// assert!(!cfg.is_enabled(Tool::Eza));
/// assert!(cfg.set_enabled_by_name("Bat", false).is_ok());
/// assert!(cfg.set_enabled_by_name("ezza", true).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    enabled: BTreeMap<Tool, bool>,
}

impl ToolConfig {
    /// Every tool at its default, using the per-shell override for `shell`.
    #[must_use]
    pub fn defaults(shell: Option<Shell>) -> Self {
        Self {
            enabled: Tool::ALL
                .into_iter()
                .map(|tool| (tool, tool.default_for(shell)))
                .collect(),
        }
    }

    /// Whether `tool` is enabled.
    #[must_use]
    pub fn is_enabled(&self, tool: Tool) -> bool {
        self.enabled
            .get(&tool)
            .copied()
            .unwrap_or_else(|| tool.default_for(None))
    }

    /// Enable or disable `tool`.
    pub fn set_enabled(&mut self, tool: Tool, enabled: bool) {
        self.enabled.insert(tool, enabled);
    }

    /// Case-insensitive lookup by key or display name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTool`] if `name` matches no tool.
    pub fn is_enabled_by_name(&self, name: &str) -> Result<bool, ConfigError> {
        Ok(self.is_enabled(name.parse()?))
    }

    /// Case-insensitive update by key or display name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownTool`] if `name` matches no tool.
    pub fn set_enabled_by_name(&mut self, name: &str, enabled: bool) -> Result<(), ConfigError> {
        self.set_enabled(name.parse()?, enabled);
        Ok(())
    }

    /// `(tool, enabled)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Tool, bool)> + '_ {
        self.enabled.iter().map(|(tool, enabled)| (*tool, *enabled))
    }

    /// Tools that are enabled, in registry order.
    pub fn enabled_tools(&self) -> impl Iterator<Item = Tool> + '_ {
        self.iter().filter(|(_, on)| *on).map(|(tool, _)| tool)
    }

    /// Decode a JSON object of `key → bool`.
    ///
    /// Keys that are absent resolve to their default for `shell`. Keys that
    /// name no tool are returned alongside the config so the caller can
    /// report them; they are not kept.
    ///
    /// # Errors
    ///
    /// Returns the decode error if `text` is not a JSON object of booleans.
    pub fn from_json(
        text: &str,
        shell: Option<Shell>,
    ) -> Result<(Self, Vec<String>), serde_json::Error> {
        let raw: BTreeMap<String, bool> = serde_json::from_str(text)?;
        let mut cfg = Self::defaults(shell);
        let mut unknown = Vec::new();
        for (key, enabled) in raw {
            match key.parse::<Tool>() {
                Ok(tool) => cfg.set_enabled(tool, enabled),
                Err(_) => unknown.push(key),
            }
        }
        Ok((cfg, unknown))
    }

    /// Encode as a pretty-printed JSON object with lowercase keys and a
    /// trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let map: BTreeMap<&str, bool> = self.iter().map(|(t, on)| (t.key(), on)).collect();
        let mut out = serde_json::to_string_pretty(&map)?;
        out.push('\n');
        Ok(out)
    }
}

/// Loads and saves [`ToolConfig`] at a resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Resolve the config path for `env`, renaming a legacy `bling.json`
    /// to `shell.json` if only the legacy file exists.
    #[must_use]
    pub fn resolve(env: &Environment) -> Self {
        let dir = env.config_dir();
        let path = dir.join(FILE_NAME);
        let legacy = dir.join(LEGACY_FILE_NAME);
        if !path.exists() && legacy.is_file() {
            // A failed rename leaves the legacy file in place; defaults apply.
            std::fs::rename(&legacy, &path).ok();
        }
        Self { path }
    }

    /// A store at an explicit path.
    #[must_use]
    pub fn at(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Path of the config file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, using defaults for `shell` when the file is absent.
    ///
    /// Nothing is written when the file is absent. Unknown keys are reported
    /// through `log` and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] if the file
    /// exists but cannot be read or decoded.
    pub fn load(&self, shell: Option<Shell>, log: &dyn Log) -> Result<ToolConfig, ConfigError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log.debug(&format!(
                    "no config at {}, using defaults",
                    self.path.display()
                ));
                return Ok(ToolConfig::defaults(shell));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };
        let (cfg, unknown) =
            ToolConfig::from_json(&text, shell).map_err(|source| ConfigError::Parse {
                path: self.path.display().to_string(),
                source,
            })?;
        for key in unknown {
            log.warn(&format!(
                "ignoring unknown tool '{key}' in {}",
                self.path.display()
            ));
        }
        Ok(cfg)
    }

    /// Load the config, logging a warning and returning defaults on error.
    #[must_use]
    pub fn load_or_default(&self, shell: Option<Shell>, log: &dyn Log) -> ToolConfig {
        self.load(shell, log).unwrap_or_else(|e| {
            log.warn(&format!("{e}; using defaults"));
            ToolConfig::defaults(shell)
        })
    }

    /// Write the whole config, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the directory or file cannot be
    /// written.
    pub fn save(&self, cfg: &ToolConfig) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: self.path.display().to_string(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = cfg.to_json().map_err(|e| write_err(e.into()))?;
        std::fs::write(&self.path, json).map_err(write_err)
    }
}
