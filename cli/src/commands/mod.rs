//! Subcommand handlers.
//!
//! Each handler receives a [`CommandSetup`] built once in `main`, writes
//! command output to an explicit `out`, and asks questions through a
//! [`Prompter`](crate::ui::Prompter) so it can run against a temporary home
//! in tests.
pub mod brewfile;
pub mod completions;
pub mod init;
pub mod install;
pub mod menu;
pub mod motd;
pub mod osscripts;
pub mod shell;
pub mod starship;
pub mod status;
pub mod version;

use std::sync::Arc;

use crate::environment::Environment;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::tasks::Context;
use crate::ui::Theme;

/// Shared state produced by the common command setup sequence.
#[derive(Debug, Clone)]
pub struct CommandSetup {
    /// Environment, platform, logger and executor for resources and tasks.
    pub ctx: Context,
    /// The concrete logger, for task summaries.
    pub log: Arc<Logger>,
    /// Output styling.
    pub theme: Theme,
}

impl CommandSetup {
    /// Wire the captured environment to the detected platform and the
    /// system executor; `command` names the log file.
    #[must_use]
    pub fn init(env: Environment, command: &str, theme: Theme) -> Self {
        let log = Arc::new(Logger::with_log_file(Some(env.log_file(command))));
        Self::new(
            env,
            Platform::detect(),
            log,
            Arc::new(SystemExecutor),
            theme,
        )
    }

    /// Assemble a setup from explicit parts.
    #[must_use]
    pub fn new(
        env: Environment,
        platform: Platform,
        log: Arc<Logger>,
        executor: Arc<dyn Executor>,
        theme: Theme,
    ) -> Self {
        let ctx = Context::new(
            Arc::new(env),
            Arc::new(platform),
            Arc::clone(&log) as Arc<dyn Log>,
            executor,
        );
        Self { ctx, log, theme }
    }

    /// The captured environment.
    #[must_use]
    pub fn env(&self) -> &Environment {
        &self.ctx.env
    }

    /// The subprocess executor.
    #[must_use]
    pub fn executor(&self) -> &dyn Executor {
        self.ctx.executor.as_ref()
    }
}
