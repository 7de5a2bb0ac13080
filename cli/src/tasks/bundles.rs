//! Install a Homebrew bundle, remote or local.
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::config::bundles::{self, Bundle};
use crate::error::TargetError;
use crate::resources::Applicable;
use crate::resources::bundle::{
    BrewBundleResource, FlathubRemoteResource, TempBrewfile, require,
};

/// What `install` was asked to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleSource {
    /// A published bundle.
    Named(&'static Bundle),
    /// A Brewfile on disk.
    File(PathBuf),
}

impl BundleSource {
    /// Interpret `target`: a value containing a path separator is a local
    /// Brewfile, anything else a bundle name.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing local file or an unknown bundle name.
    pub fn parse(target: &str) -> Result<Self> {
        if target.contains('/') || target.contains('\\') {
            let path = Path::new(target);
            if !path.is_file() {
                return Err(TargetError::MissingBrewfile(target.to_string()).into());
            }
            return Ok(Self::File(path.to_path_buf()));
        }
        bundles::find(target).map(Self::Named).ok_or_else(|| {
            TargetError::UnknownBundle {
                name: target.to_string(),
                valid: bundles::valid_names(),
            }
            .into()
        })
    }
}

impl fmt::Display for BundleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(bundle) => f.write_str(bundle.name),
            Self::File(path) => path.display().fmt(f),
        }
    }
}

/// Install one bundle with `brew bundle`.
#[derive(Debug)]
pub struct InstallBundle {
    source: BundleSource,
}

impl InstallBundle {
    /// Create the task for `source`.
    #[must_use]
    pub const fn new(source: BundleSource) -> Self {
        Self { source }
    }

    /// One task per published bundle, in table order.
    #[must_use]
    pub fn all() -> Vec<Box<dyn Task>> {
        bundles::BUNDLES
            .iter()
            .map(|b| Box::new(Self::new(BundleSource::Named(b))) as Box<dyn Task>)
            .collect()
    }
}

impl Task for InstallBundle {
    fn name(&self) -> &'static str {
        match self.source {
            BundleSource::Named(bundle) => bundle.name,
            BundleSource::File(_) => "Brewfile",
        }
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let executor = &*ctx.executor;
        require(executor, "brew")?;

        match &self.source {
            BundleSource::File(path) => {
                ctx.log.info(&format!("installing {}", path.display()));
                BrewBundleResource::new(path, executor).apply()?;
            }
            BundleSource::Named(bundle) => {
                if bundle.needs_flathub {
                    let change = FlathubRemoteResource::new(executor).apply()?;
                    ctx.log.debug(&format!("flathub remote: {change:?}"));
                }
                ctx.log.info(&format!("downloading {}", bundle.url()));
                let file = TempBrewfile::fetch(&bundle.url(), bundle.file)
                    .with_context(|| format!("fetching bundle {}", bundle.name))?;
                BrewBundleResource::new(file.path(), executor).apply()?;
            }
        }
        Ok(TaskResult::Ok)
    }
}
