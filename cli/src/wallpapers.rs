//! Wallpaper casks published in the `ublue-os/tap` Homebrew tap.
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::exec::Executor;
use crate::resources::bundle::require;
use crate::resources::package::BREW_ENV;

/// Tap holding the wallpaper casks.
pub const TAP: &str = "ublue-os/tap";

/// Tap `ublue-os/tap` and list its casks whose name contains `wallpaper`,
/// sorted.
///
/// # Errors
///
/// Returns an error if `brew` is missing, tapping fails, or the tap's
/// `Casks` directory cannot be read.
pub fn casks(executor: &dyn Executor) -> Result<Vec<String>> {
    require(executor, "brew")?;
    executor.run_interactive("brew", &["tap", TAP], &BREW_ENV)?;
    let repo = executor
        .run("brew", &["--repository", TAP])
        .context("locating the tap repository")?;
    let casks_dir = Path::new(repo.stdout.trim()).join("Casks");
    let entries = std::fs::read_dir(&casks_dir)
        .with_context(|| format!("reading {}", casks_dir.display()))?;

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "rb"))
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .filter(|name| name.to_lowercase().contains("wallpaper"))
        .collect();
    names.sort();
    Ok(names)
}

/// `ublue-os/tap/<cask>` unless `cask` is already qualified.
///
/// ```
/// use bluefin_cli::wallpapers::qualify;
///
/// assert_eq!(qualify("bluefin-wallpapers"), "ublue-os/tap/bluefin-wallpapers");
/// assert_eq!(qualify("other/tap/walls"), "other/tap/walls");
/// ```
#[must_use]
pub fn qualify(cask: &str) -> String {
    if cask.contains('/') {
        cask.to_string()
    } else {
        format!("{TAP}/{cask}")
    }
}

/// Tap `ublue-os/tap` and `brew install --cask` every cask in `casks`.
///
/// # Errors
///
/// Returns an error if `casks` is empty, `brew` is missing, or brew fails.
pub fn install(executor: &dyn Executor, casks: &[String]) -> Result<()> {
    if casks.is_empty() {
        anyhow::bail!("no wallpaper casks selected");
    }
    require(executor, "brew")?;
    executor.run_interactive("brew", &["tap", TAP], &BREW_ENV)?;

    let qualified: Vec<String> = casks.iter().map(|c| qualify(c)).collect();
    let mut args = vec!["install", "--cask"];
    args.extend(qualified.iter().map(String::as_str));
    executor
        .run_interactive("brew", &args, &BREW_ENV)
        .context("installing wallpaper casks")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;

    #[test]
    fn casks_filters_tap_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let casks_dir = tmp.path().join("Casks");
        std::fs::create_dir_all(casks_dir.join("nested-wallpaper")).unwrap();
        for name in ["bluefin-wallpapers.rb", "aurora-wallpapers.rb", "framework-tool.rb", "wallpaper.txt"] {
            std::fs::write(casks_dir.join(name), "cask").unwrap();
        }
        let repo = format!("{}\n", tmp.path().display());
        let exec = MockExecutor::new()
            .with_programs(&["brew"])
            .with_responses(vec![(true, ""), (true, repo.as_str())]);

        assert_eq!(
            casks(&exec).unwrap(),
            vec!["aurora-wallpapers", "bluefin-wallpapers"]
        );
        assert_eq!(exec.calls(), vec!["brew tap ublue-os/tap", "brew --repository ublue-os/tap"]);
    }

    #[test]
    fn casks_requires_brew() {
        let exec = MockExecutor::new();
        assert!(casks(&exec).is_err());
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn install_qualifies_names() {
        let exec = MockExecutor::new().with_programs(&["brew"]);
        install(
            &exec,
            &["bluefin-wallpapers".to_string(), "me/tap/walls".to_string()],
        )
        .unwrap();
        assert_eq!(
            exec.calls()[1],
            "brew install --cask ublue-os/tap/bluefin-wallpapers me/tap/walls"
        );
    }

    #[test]
    fn install_nothing_is_error() {
        let exec = MockExecutor::new().with_programs(&["brew"]);
        assert!(install(&exec, &[]).is_err());
    }
}
