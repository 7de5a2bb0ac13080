//! Persisted configuration and static tables.
//!
//! - [`tools`] — the managed tool registry
//! - [`tool_config`] — `shell.json`: which tools are enabled
//! - [`motd`] — `motd.json`
//! - [`bundles`] — Homebrew bundle table
pub mod bundles;
pub mod motd;
pub mod tool_config;
pub mod tools;
