//! Install the binaries behind enabled shell tools.
use anyhow::Result;

use super::{Context, Task, TaskResult, process_resources};
use crate::config::tool_config::ToolConfig;
use crate::config::tools::Tool;
use crate::resources::package::BrewToolResource;

/// Install every enabled tool whose binary is not on `PATH`.
///
/// Tools are installed one at a time in registry order. A missing `brew` or
/// a failed install is logged as a warning and the next tool is tried.
#[derive(Debug)]
pub struct InstallShellTools {
    config: ToolConfig,
}

impl InstallShellTools {
    /// Create the task for the tools enabled in `config`.
    #[must_use]
    pub const fn new(config: ToolConfig) -> Self {
        Self { config }
    }
}

impl Task for InstallShellTools {
    fn name(&self) -> &'static str {
        "Install shell tools"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        self.config.enabled_tools().next().is_some()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for tool in Tool::ALL.iter().filter(|t| !self.config.is_enabled(**t)) {
            ctx.log.debug(&format!("{tool} is disabled, not installing"));
        }

        let executor = &*ctx.executor;
        if !executor.which("brew") {
            ctx.log
                .debug("brew not found in PATH, missing tools will be skipped");
        }

        let resources = self
            .config
            .enabled_tools()
            .map(|tool| BrewToolResource::new(tool.descriptor(), executor));
        process_resources(ctx, resources, "install")
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::Executor;
    use crate::resources::test_helpers::MockExecutor;
    use crate::tasks::test_helpers::make_context_with_executor;
    use std::sync::Arc;

    fn shared(exec: &Arc<MockExecutor>) -> Arc<dyn Executor> {
        Arc::clone(exec) as Arc<dyn Executor>
    }

    fn only(enabled: &[Tool]) -> ToolConfig {
        let mut cfg = ToolConfig::defaults(None);
        for tool in Tool::ALL {
            cfg.set_enabled(tool, enabled.contains(&tool));
        }
        cfg
    }

    #[test]
    fn should_run_only_with_enabled_tools() {
        let (ctx, _log) = make_context_with_executor(Arc::new(MockExecutor::new()));
        assert!(!InstallShellTools::new(only(&[])).should_run(&ctx));
        assert!(InstallShellTools::new(only(&[Tool::Bat])).should_run(&ctx));
    }

    #[test]
    fn disabled_tool_is_never_installed() {
        let exec = Arc::new(MockExecutor::new().with_programs(&["brew"]));
        let (ctx, _log) = make_context_with_executor(shared(&exec));

        let task = InstallShellTools::new(only(&[Tool::Bat]));
        assert_eq!(task.run(&ctx).unwrap(), TaskResult::Ok);
        assert_eq!(exec.calls(), vec!["brew install bat"]);
    }

    #[test]
    fn present_binaries_are_left_alone() {
        let exec = Arc::new(MockExecutor::new().with_programs(&["brew", "eza", "zoxide"]));
        let (ctx, _log) = make_context_with_executor(shared(&exec));

        let task = InstallShellTools::new(only(&[Tool::Eza, Tool::Zoxide, Tool::Starship]));
        task.run(&ctx).unwrap();
        assert_eq!(exec.calls(), vec!["brew install starship"]);
    }

    #[test]
    fn missing_brew_is_not_fatal() {
        let exec = Arc::new(MockExecutor::new());
        let (ctx, _log) = make_context_with_executor(shared(&exec));

        let task = InstallShellTools::new(only(&[Tool::Eza, Tool::Bat]));
        assert_eq!(task.run(&ctx).unwrap(), TaskResult::Ok);
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn failed_install_continues_with_next_tool() {
        let exec = Arc::new(
            MockExecutor::new()
                .with_programs(&["brew"])
                .with_responses(vec![(false, "")]),
        );
        let (ctx, _log) = make_context_with_executor(shared(&exec));

        let task = InstallShellTools::new(only(&[Tool::Eza, Tool::Bat]));
        assert_eq!(task.run(&ctx).unwrap(), TaskResult::Ok);
        assert_eq!(exec.calls(), vec!["brew install eza", "brew install bat"]);
    }
}
