//! Homebrew formula resource for a managed tool.
use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::config::tools::ToolDescriptor;
use crate::exec::Executor;

/// Environment passed to every `brew` invocation.
pub const BREW_ENV: [(&str, &str); 1] = [("HOMEBREW_NO_ENV_HINTS", "1")];

/// A tool whose binary should be on `PATH`, installed with `brew` if not.
#[derive(Debug)]
pub struct BrewToolResource<'a> {
    tool: &'static ToolDescriptor,
    executor: &'a dyn Executor,
}

impl<'a> BrewToolResource<'a> {
    /// Create a resource for `tool`.
    #[must_use]
    pub const fn new(tool: &'static ToolDescriptor, executor: &'a dyn Executor) -> Self {
        Self { tool, executor }
    }
}

impl Applicable for BrewToolResource<'_> {
    fn description(&self) -> String {
        format!("{} ({})", self.tool.name, self.tool.package)
    }

    /// Install the formula with inherited stdio.
    ///
    /// Returns [`ResourceChange::Skipped`] when `brew` is not on `PATH`.
    fn apply(&self) -> Result<ResourceChange> {
        if !self.executor.which("brew") {
            return Ok(ResourceChange::Skipped {
                reason: "Homebrew not found".to_string(),
            });
        }
        self.executor
            .run_interactive("brew", &["install", self.tool.package], &BREW_ENV)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for BrewToolResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        Ok(if self.executor.which(self.tool.binary) {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        })
    }
}
