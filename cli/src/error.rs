//! Domain-specific error types for bluefin-cli.
//!
//! Library modules return these typed errors; command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] with the standard `?` operator
//! and add context where a path or a subcommand helps the user.
//!
//! # Error hierarchy
//!
//! ```text
//! BluefinError
//! ├── Config(ConfigError)             — shell.json / motd.json, tool names
//! ├── Target(TargetError)             — shells, bundles, themes, presets, rc blocks
//! ├── ExternalTool(ExternalToolError) — missing binaries, failing subprocesses
//! └── Network(NetworkError)           — bundle downloads
//! ```

use thiserror::Error;

/// Top-level error type aggregating the domain errors.
#[derive(Error, Debug)]
pub enum BluefinError {
    /// Configuration file or tool-name error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The user named something this tool does not manage.
    #[error("Unsupported target: {0}")]
    Target(#[from] TargetError),

    /// A required external program is missing or failed.
    #[error("External tool error: {0}")]
    ExternalTool(#[from] ExternalToolError),

    /// A download failed.
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

/// Errors that arise from loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file (or its directory) could not be written.
    #[error("cannot write config file {path}: {source}")]
    Write {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON of the expected shape.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Path of the file.
        path: String,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// A tool name did not match any managed tool.
    #[error("unknown tool '{name}': must be one of {valid}")]
    UnknownTool {
        /// The name as given.
        name: String,
        /// Comma-separated list of valid names.
        valid: String,
    },
}

/// Errors for targets the tool does not know how to handle.
#[derive(Error, Debug)]
pub enum TargetError {
    /// Shell name outside bash, zsh and fish.
    #[error("unsupported shell '{0}': must be one of bash, zsh, fish")]
    UnsupportedShell(String),

    /// Bundle name not in the bundle table.
    #[error("unknown bundle '{name}': must be one of {valid}")]
    UnknownBundle {
        /// The name as given.
        name: String,
        /// Comma-separated list of valid names.
        valid: String,
    },

    /// A local Brewfile path that does not exist.
    #[error("Brewfile not found: {0}")]
    MissingBrewfile(String),

    /// MOTD toggle target outside the supported shells and `all`.
    #[error("unknown MOTD target '{0}': must be one of bash, zsh, fish, all")]
    UnknownMotdTarget(String),

    /// MOTD theme not understood by the renderer.
    #[error("unknown MOTD theme '{name}': must be one of {valid}")]
    UnknownTheme {
        /// The name as given.
        name: String,
        /// Comma-separated list of valid names.
        valid: String,
    },

    /// Starship preset not in the preset list.
    #[error("unknown starship preset '{name}': must be one of {valid}")]
    UnknownPreset {
        /// The name as given.
        name: String,
        /// Comma-separated list of valid names.
        valid: String,
    },

    /// A managed block whose begin marker has no matching end marker.
    #[error("malformed managed block in {path}: '{marker}' has no matching end marker")]
    MalformedBlock {
        /// Path of the rc file.
        path: String,
        /// The begin marker that was found.
        marker: String,
    },
}

/// Errors from external programs.
#[derive(Error, Debug)]
pub enum ExternalToolError {
    /// A program the operation depends on is not on `PATH`.
    #[error("required tool '{program}' not found in PATH")]
    Missing {
        /// Name of the program.
        program: String,
    },

    /// A program ran and exited non-zero.
    #[error("command '{program}' failed (exit {code}): {stderr}")]
    CommandFailed {
        /// Name of the program.
        program: String,
        /// Exit code, `-1` when terminated by a signal.
        code: i32,
        /// Captured standard error, empty for inherited stdio.
        stderr: String,
    },
}

/// Errors from HTTP downloads.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// The request failed or returned a non-success status.
    #[error("failed to download {url}: {reason}")]
    Download {
        /// URL that was requested.
        url: String,
        /// Transport error or HTTP status.
        reason: String,
    },
}
