//! Homebrew bundles, their download, and the Flathub remote.
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::package::BREW_ENV;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::{ExternalToolError, NetworkError};
use crate::exec::Executor;

/// Flathub repository definition passed to `flatpak remote-add`.
pub const FLATHUB_URL: &str = "https://dl.flathub.org/repo/flathub.flatpakrepo";

/// Fail with [`ExternalToolError::Missing`] unless `program` is on `PATH`.
///
/// # Errors
///
/// Returns [`ExternalToolError::Missing`] if the program is not found.
pub fn require(executor: &dyn Executor, program: &str) -> Result<(), ExternalToolError> {
    if executor.which(program) {
        Ok(())
    } else {
        Err(ExternalToolError::Missing {
            program: program.to_string(),
        })
    }
}

/// Download `url` into `dest`, replacing any existing file.
///
/// No retry. A non-2xx status is an error.
///
/// # Errors
///
/// Returns [`NetworkError::Download`] if the request fails or the body
/// cannot be written.
pub fn download(url: &str, dest: &Path) -> Result<(), NetworkError> {
    let fail = |reason: String| NetworkError::Download {
        url: url.to_string(),
        reason,
    };
    let mut response = ureq::get(url).call().map_err(|e| fail(e.to_string()))?;
    let mut file = std::fs::File::create(dest)
        .map_err(|e| fail(format!("cannot create {}: {e}", dest.display())))?;
    std::io::copy(&mut response.body_mut().as_reader(), &mut file)
        .map_err(|e| fail(e.to_string()))?;
    Ok(())
}

/// A downloaded Brewfile that deletes itself when dropped.
#[derive(Debug)]
pub struct TempBrewfile {
    path: PathBuf,
}

impl TempBrewfile {
    /// Download `url` to `file_name` in the system temp directory.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Download`] if the download fails.
    pub fn fetch(url: &str, file_name: &str) -> Result<Self, NetworkError> {
        let path = std::env::temp_dir().join(file_name);
        let file = Self { path };
        download(url, &file.path)?;
        Ok(file)
    }

    /// Location of the downloaded file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempBrewfile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// `brew bundle install --file <path>`.
///
/// Always applies; Homebrew decides what is already installed.
#[derive(Debug)]
pub struct BrewBundleResource<'a> {
    file: PathBuf,
    executor: &'a dyn Executor,
}

impl<'a> BrewBundleResource<'a> {
    /// Install the packages listed in `file`.
    #[must_use]
    pub fn new(file: &Path, executor: &'a dyn Executor) -> Self {
        Self {
            file: file.to_path_buf(),
            executor,
        }
    }
}

impl Applicable for BrewBundleResource<'_> {
    fn description(&self) -> String {
        format!("bundle {}", self.file.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        require(self.executor, "brew")?;
        let file = self.file.to_string_lossy();
        self.executor.run_interactive(
            "brew",
            &["bundle", "install", "--file", file.as_ref()],
            &BREW_ENV,
        )?;
        Ok(ResourceChange::Applied)
    }
}

/// The `flathub` remote in flatpak's remote list.
#[derive(Debug)]
pub struct FlathubRemoteResource<'a> {
    executor: &'a dyn Executor,
}

impl<'a> FlathubRemoteResource<'a> {
    /// Create the resource.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor) -> Self {
        Self { executor }
    }
}

impl Applicable for FlathubRemoteResource<'_> {
    fn description(&self) -> String {
        "flathub remote".to_string()
    }

    fn apply(&self) -> Result<ResourceChange> {
        require(self.executor, "flatpak")?;
        if self.current_state()? == ResourceState::Correct {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        self.executor.run_interactive(
            "flatpak",
            &["remote-add", "--if-not-exists", "flathub", FLATHUB_URL],
            &[],
        )?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for FlathubRemoteResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let listed = self.executor.run_unchecked("flatpak", &["remote-list"])?;
        Ok(if listed.success && listed.stdout.contains("flathub") {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        })
    }
}
