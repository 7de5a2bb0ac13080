//! Persisted MOTD settings (`motd.json`).
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TargetError};

/// File name under the MOTD state directory.
pub const FILE_NAME: &str = "motd.json";

/// Styles understood by `glow -s`.
pub const THEMES: [&str; 6] = ["dark", "light", "dracula", "pink", "tokyo-night", "notty"];

/// MOTD settings.
///
/// Unknown fields written by other releases are ignored on read and not
/// preserved on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MotdConfig {
    /// Directory holding `*.md` tips.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tips_directory: Option<String>,
    /// `glow` style used when rendering.
    pub default_theme: String,
}

impl Default for MotdConfig {
    fn default() -> Self {
        Self {
            tips_directory: None,
            default_theme: "dark".to_string(),
        }
    }
}

impl MotdConfig {
    /// Load from `path`, returning defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Write to `path`, creating the parent directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let mut json = serde_json::to_string_pretty(self).map_err(|e| write_err(e.into()))?;
        json.push('\n');
        std::fs::write(path, json).map_err(write_err)
    }

    /// Set the theme after validating it against [`THEMES`].
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::UnknownTheme`] for anything else.
    pub fn set_theme(&mut self, theme: &str) -> Result<(), TargetError> {
        let theme = theme.trim().to_ascii_lowercase();
        if !THEMES.contains(&theme.as_str()) {
            return Err(TargetError::UnknownTheme {
                name: theme,
                valid: THEMES.join(", "),
            });
        }
        self.default_theme = theme;
        Ok(())
    }
}
