//! Generic resource processing loop: check state, apply, collect stats.

use anyhow::Result;

use super::context::Context;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use bluefin_cli::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("brew not found".into());
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (nothing to do, or a prerequisite is missing).
    Skipped(String),
}

/// Counters for batch tasks that process many items.
///
/// # Examples
///
/// ```
/// use bluefin_cli::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 1, already_ok: 2, skipped: 3 };
/// assert_eq!(stats.summary(), "1 changed, 2 already ok, 3 skipped");
///
/// let clean = TaskStats { changed: 3, already_ok: 10, skipped: 0 };
/// assert_eq!(clean.summary(), "3 changed, 10 already ok");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of items changed or applied.
    pub changed: u32,
    /// Number of items already in the correct state.
    pub already_ok: u32,
    /// Number of items skipped due to errors or inapplicability.
    pub skipped: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self) -> String {
        if self.skipped > 0 {
            format!(
                "{} changed, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} changed, {} already ok", self.changed, self.already_ok)
        }
    }

    /// Log the summary and return [`TaskResult::Ok`].
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary());
        TaskResult::Ok
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.skipped += other.skipped;
    }
}

/// Check each resource's state in order and apply the ones that are missing.
///
/// Resources are processed one at a time, synchronously. `verb` names the
/// action in log lines (e.g. "install"). A failed or skipped apply is
/// logged as a warning and counted as skipped; the batch carries on.
///
/// # Errors
///
/// Returns an error if a state check fails.
pub fn process_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        let current = resource.current_state()?;
        stats += process_single(ctx, &resource, current, verb);
    }
    Ok(stats.finish(ctx))
}

fn process_single<R: Resource>(
    ctx: &Context,
    resource: &R,
    resource_state: ResourceState,
    verb: &str,
) -> TaskStats {
    let desc = resource.description();
    let mut delta = TaskStats::new();
    match resource_state {
        ResourceState::Correct => {
            ctx.log.debug(&format!("ok: {desc}"));
            delta.already_ok += 1;
        }
        ResourceState::Invalid { reason } => {
            ctx.log.warn(&format!("skipping {desc}: {reason}"));
            delta.skipped += 1;
        }
        ResourceState::Missing => {
            delta += apply_resource(ctx, resource, verb);
        }
    }
    delta
}

fn apply_resource<R: Resource>(ctx: &Context, resource: &R, verb: &str) -> TaskStats {
    let desc = resource.description();
    let mut delta = TaskStats::new();
    match resource.apply() {
        Ok(ResourceChange::Applied) => {
            ctx.log.info(&format!("{verb}: {desc}"));
            delta.changed += 1;
        }
        Ok(ResourceChange::AlreadyCorrect) => {
            delta.already_ok += 1;
        }
        Ok(ResourceChange::Skipped { reason }) => {
            ctx.log.warn(&format!("failed to {verb} {desc}: {reason}"));
            delta.skipped += 1;
        }
        Err(e) => {
            ctx.log.warn(&format!("failed to {verb} {desc}: {e:#}"));
            delta.skipped += 1;
        }
    }
    delta
}
