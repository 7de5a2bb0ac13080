//! Persist the rendered init scripts for shells that source a file.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::config::tool_config::ToolConfig;
use crate::shell::script::write_env_files;

/// Write `env.sh` and `env.fish` under the state directory.
#[derive(Debug)]
pub struct WriteEnvFiles {
    config: ToolConfig,
}

impl WriteEnvFiles {
    /// Create the task for `config`.
    #[must_use]
    pub const fn new(config: ToolConfig) -> Self {
        Self { config }
    }
}

impl Task for WriteEnvFiles {
    fn name(&self) -> &'static str {
        "Write env files"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for path in write_env_files(&ctx.env, &self.config)? {
            ctx.log.debug(&format!("wrote {}", path.display()));
        }
        Ok(TaskResult::Ok)
    }
}
