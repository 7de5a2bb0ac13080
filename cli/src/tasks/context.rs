//! Shared state handed to every task and resource.
use std::sync::Arc;

use crate::environment::Environment;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;

/// Shared context for task execution.
#[derive(Clone)]
pub struct Context {
    /// Paths and variables read from the process environment.
    pub env: Arc<Environment>,
    /// Detected platform information.
    pub platform: Arc<Platform>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("env", &self.env)
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("executor", &self.executor)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub const fn new(
        env: Arc<Environment>,
        platform: Arc<Platform>,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            env,
            platform,
            log,
            executor,
        }
    }
}
