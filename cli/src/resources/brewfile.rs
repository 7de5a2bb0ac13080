//! A `Brewfile` in a project directory.
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::helpers::fs::read_or_empty;
use super::package::BREW_ENV;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::TargetError;
use crate::exec::Executor;

/// File name Homebrew looks for.
pub const FILE_NAME: &str = "Brewfile";

const SCAFFOLD: &str = "# Brewfile - Add your packages here\n\n";

/// `Brewfile` in `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brewfile {
    dir: PathBuf,
}

impl Brewfile {
    /// The Brewfile in `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Full path of the file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    /// Create the file with a comment header.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(&self) -> Result<PathBuf> {
        let path = self.path();
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        std::fs::write(&path, SCAFFOLD).with_context(|| format!("creating {}", path.display()))?;
        Ok(path)
    }

    /// Add `brew "<package>"` unless an identical line is already present.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::MissingBrewfile`] if the file does not exist,
    /// or an I/O error if it cannot be updated.
    pub fn add(&self, package: &str) -> Result<ResourceChange> {
        let path = self.path();
        if !path.is_file() {
            return Err(TargetError::MissingBrewfile(path.display().to_string()).into());
        }
        BrewfileEntryResource::new(&path, package).apply()
    }

    /// Run `brew bundle install` in the Brewfile's directory.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::MissingBrewfile`] if the file does not exist,
    /// or the error from `brew`.
    pub fn apply(&self, executor: &dyn Executor) -> Result<()> {
        let path = self.path();
        if !path.is_file() {
            return Err(TargetError::MissingBrewfile(path.display().to_string()).into());
        }
        super::bundle::require(executor, "brew")?;
        let file = path.to_string_lossy();
        executor.run_interactive("brew", &["bundle", "install", "--file", file.as_ref()], &BREW_ENV)
    }
}

/// One `brew "<package>"` line in a Brewfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrewfileEntryResource {
    path: PathBuf,
    line: String,
}

impl BrewfileEntryResource {
    /// An entry for `package` in the file at `path`.
    #[must_use]
    pub fn new(path: &Path, package: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            line: format!("brew \"{package}\""),
        }
    }
}

impl Applicable for BrewfileEntryResource {
    fn description(&self) -> String {
        format!("{} in {}", self.line, self.path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let mut content = read_or_empty(&self.path)?;
        if content.lines().any(|l| l.trim() == self.line) {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&self.line);
        content.push('\n');
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for BrewfileEntryResource {
    fn current_state(&self) -> Result<ResourceState> {
        let content = read_or_empty(&self.path)?;
        Ok(if content.lines().any(|l| l.trim() == self.line) {
            ResourceState::Correct
        } else {
            ResourceState::Missing
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;

    #[test]
    fn init_creates_scaffold_once() {
        let tmp = tempfile::tempdir().unwrap();
        let brewfile = Brewfile::in_dir(tmp.path());
        let path = brewfile.init().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SCAFFOLD);

        let err = brewfile.init().unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn add_requires_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Brewfile::in_dir(tmp.path()).add("jq").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TargetError>(),
            Some(TargetError::MissingBrewfile(_))
        ));
        assert!(!tmp.path().join(FILE_NAME).exists());
    }

    #[test]
    fn add_appends_line_once() {
        let tmp = tempfile::tempdir().unwrap();
        let brewfile = Brewfile::in_dir(tmp.path());
        brewfile.init().unwrap();

        assert_eq!(brewfile.add("jq").unwrap(), ResourceChange::Applied);
        assert_eq!(brewfile.add("jq").unwrap(), ResourceChange::AlreadyCorrect);
        brewfile.add("gh").unwrap();

        let content = std::fs::read_to_string(brewfile.path()).unwrap();
        assert_eq!(content, format!("{SCAFFOLD}brew \"jq\"\nbrew \"gh\"\n"));
    }

    #[test]
    fn add_fixes_missing_trailing_newline() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(FILE_NAME);
        std::fs::write(&path, "tap \"ublue-os/tap\"").unwrap();
        let entry = BrewfileEntryResource::new(&path, "bat");
        assert_eq!(entry.current_state().unwrap(), ResourceState::Missing);
        entry.apply().unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "tap \"ublue-os/tap\"\nbrew \"bat\"\n"
        );
        assert_eq!(entry.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn apply_runs_brew_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let brewfile = Brewfile::in_dir(tmp.path());
        brewfile.init().unwrap();
        let exec = MockExecutor::new().with_programs(&["brew"]);
        brewfile.apply(&exec).unwrap();
        assert_eq!(
            exec.calls(),
            vec![format!(
                "brew bundle install --file {}",
                brewfile.path().display()
            )]
        );
    }

    #[test]
    fn apply_without_file_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let exec = MockExecutor::new().with_programs(&["brew"]);
        assert!(Brewfile::in_dir(tmp.path()).apply(&exec).is_err());
        assert!(exec.calls().is_empty());
    }
}
