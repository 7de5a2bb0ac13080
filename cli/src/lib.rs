//! Shell tool integration, Homebrew bundles and MOTD for Bluefin.
//!
//! `bluefin-cli` adds a marker-delimited block to bash, zsh and fish rc
//! files that evaluates `bluefin-cli init <shell>`, which prints the enabled
//! tools as environment exports followed by the bundled init script.
//!
//! The public API is organised into these layers:
//!
//! - **[`config`]** — tool registry, `shell.json`, `motd.json` and bundle tables
//! - **[`resources`]** — idempotent `check + apply` primitives (rc blocks, brew packages, …)
//! - **[`tasks`]** — named units of work wired to resources, with a run summary
//! - **[`shell`]** — init script rendering and rc-file integration
//! - **[`commands`]** — subcommand handlers and interactive menus
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod exec;
pub mod logging;
pub mod motd;
pub mod platform;
pub mod recipes;
pub mod resources;
pub mod shell;
pub mod starship;
pub mod status;
pub mod tasks;
pub mod ui;
pub mod wallpapers;
