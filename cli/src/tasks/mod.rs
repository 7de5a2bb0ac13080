//! Named tasks that orchestrate resource changes.
pub mod bundles;
mod context;
pub mod env_files;
mod processing;
pub mod tools;

pub use context::Context;
pub use processing::{TaskResult, TaskStats, process_resources};

use anyhow::Result;

use crate::logging::TaskStatus;

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task has anything to do in `ctx`.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails to execute, such as when system commands
    /// fail or files cannot be written.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}

/// Execute `tasks` in order, then print the summary.
///
/// # Errors
///
/// Returns an error naming the number of failed tasks if any failed.
pub fn run_tasks_to_completion(
    tasks: &[Box<dyn Task>],
    ctx: &Context,
    log: &crate::logging::Logger,
) -> Result<()> {
    for task in tasks {
        execute(task.as_ref(), ctx);
    }
    log.print_summary();
    let failures = log.failure_count();
    if failures > 0 {
        anyhow::bail!("{failures} task(s) failed");
    }
    Ok(())
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_helpers::make_context;

    /// A mock task for testing `execute()`.
    struct MockTask {
        name: &'static str,
        should_run: bool,
        result: Result<TaskResult, String>,
    }

    impl Task for MockTask {
        fn name(&self) -> &str {
            self.name
        }
        fn should_run(&self, _ctx: &Context) -> bool {
            self.should_run
        }
        fn run(&self, _ctx: &Context) -> Result<TaskResult> {
            self.result.clone().map_err(|s| anyhow::anyhow!("{s}"))
        }
    }

    fn task(name: &'static str, should_run: bool, result: Result<TaskResult, String>) -> MockTask {
        MockTask {
            name,
            should_run,
            result,
        }
    }

    #[test]
    fn execute_records_non_applicable_task() {
        let (ctx, log) = make_context();
        execute(&task("n/a", false, Ok(TaskResult::Ok)), &ctx);
        let entries = log.task_entries();
        assert_eq!(entries[0].status, TaskStatus::NotApplicable);
    }

    #[test]
    fn execute_records_ok_task() {
        let (ctx, log) = make_context();
        execute(&task("ok-task", true, Ok(TaskResult::Ok)), &ctx);
        assert_eq!(log.failure_count(), 0);
        assert_eq!(log.task_entries()[0].status, TaskStatus::Ok);
    }

    #[test]
    fn execute_records_failed_task() {
        let (ctx, log) = make_context();
        execute(&task("fail-task", true, Err("kaboom".to_string())), &ctx);
        assert_eq!(log.failure_count(), 1);
        assert_eq!(log.task_entries()[0].message.as_deref(), Some("kaboom"));
    }

    #[test]
    fn execute_records_skipped_task() {
        let (ctx, log) = make_context();
        let skipped = Ok(TaskResult::Skipped("not needed".to_string()));
        execute(&task("skip-task", true, skipped), &ctx);
        assert_eq!(log.failure_count(), 0);
        assert_eq!(log.task_entries()[0].status, TaskStatus::Skipped);
    }

    #[test]
    fn run_to_completion_reports_failures() {
        let (ctx, log) = make_context();
        let tasks: Vec<Box<dyn Task>> = vec![
            Box::new(task("a", true, Ok(TaskResult::Ok))),
            Box::new(task("b", true, Err("bad".to_string()))),
        ];
        let err = run_tasks_to_completion(&tasks, &ctx, &log).unwrap_err();
        assert!(err.to_string().contains("1 task(s) failed"));
        assert_eq!(log.task_entries().len(), 2);
    }
}
