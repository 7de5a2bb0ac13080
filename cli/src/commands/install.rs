//! Command: install Homebrew bundles and wallpapers.
use std::io::Write;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::{InstallAction, InstallOpts};
use crate::config::bundles::{BUNDLES, Bundle};
use crate::tasks::bundles::{BundleSource, InstallBundle};
use crate::tasks::{self, Task};
use crate::ui::{Prompter, Theme};
use crate::wallpapers;

/// Run the install command.
///
/// # Errors
///
/// Returns an error for an unknown target or when an install fails.
pub fn run(
    setup: &CommandSetup,
    opts: &InstallOpts,
    prompter: &dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    match (&opts.action, &opts.target) {
        (Some(InstallAction::List), _) => list(&setup.theme, out),
        (Some(InstallAction::Wallpapers { casks }), _) => install_wallpapers(setup, casks, prompter),
        (None, Some(target)) => install(setup, target),
        (None, None) => menu(setup, prompter, out),
    }
}

/// Install `target`: a bundle name, a path to a Brewfile, or `all`.
///
/// # Errors
///
/// Returns an error for an unknown bundle or a missing Brewfile, or when
/// any bundle failed to install.
pub fn install(setup: &CommandSetup, target: &str) -> Result<()> {
    let run: Vec<Box<dyn Task>> = if target.trim().eq_ignore_ascii_case("all") {
        InstallBundle::all()
    } else {
        vec![Box::new(InstallBundle::new(BundleSource::parse(target)?))]
    };
    tasks::run_tasks_to_completion(&run, &setup.ctx, &setup.log)
}

/// Print every bundle with its description.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn list(theme: &Theme, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", theme.title("Available bundles"))?;
    let width = BUNDLES.iter().map(|b| b.name.len()).max().unwrap_or(0);
    for bundle in &BUNDLES {
        writeln!(
            out,
            "  {:width$}  {}",
            bundle.name,
            theme.faint(bundle.description)
        )?;
    }
    Ok(())
}

/// Bundles shown in the menu for this machine.
///
/// `full-desktop` is only offered on Linux with a GNOME session.
#[must_use]
pub fn menu_bundles(setup: &CommandSetup) -> Vec<&'static Bundle> {
    let gnome = setup.ctx.platform.is_gnome(setup.env().desktop.as_deref());
    BUNDLES
        .iter()
        .filter(|b| !b.needs_flathub || gnome)
        .collect()
}

/// Multi-select bundles and install the chosen ones.
///
/// # Errors
///
/// Returns an error if the prompt fails or any chosen bundle failed.
pub fn menu(setup: &CommandSetup, prompter: &dyn Prompter, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", setup.theme.title("Homebrew Bundles"))?;
    let offered = menu_bundles(setup);
    let items: Vec<String> = offered
        .iter()
        .map(|b| format!("{} - {}", b.name, b.description))
        .collect();
    let checked = vec![false; items.len()];
    let Some(selected) = prompter.multi_select("Select bundles to install", &items, &checked)? else {
        return Ok(());
    };
    if selected.is_empty() {
        setup.ctx.log.info("no bundles selected");
        return Ok(());
    }
    let run: Vec<Box<dyn Task>> = selected
        .iter()
        .filter_map(|&i| offered.get(i).copied())
        .map(|b| Box::new(InstallBundle::new(BundleSource::Named(b))) as Box<dyn Task>)
        .collect();
    tasks::run_tasks_to_completion(&run, &setup.ctx, &setup.log)
}

/// Install `casks`, or pick from the tap's wallpaper casks when empty.
///
/// # Errors
///
/// Returns an error if brew is missing, the tap cannot be listed, or the
/// install fails.
pub fn install_wallpapers(
    setup: &CommandSetup,
    casks: &[String],
    prompter: &dyn Prompter,
) -> Result<()> {
    let executor = setup.executor();
    let chosen = if casks.is_empty() {
        let available = wallpapers::casks(executor)?;
        if available.is_empty() {
            anyhow::bail!("no wallpaper casks found in {}", wallpapers::TAP);
        }
        let checked = vec![false; available.len()];
        let Some(selected) = prompter.multi_select("Select wallpapers", &available, &checked)? else {
            return Ok(());
        };
        selected
            .iter()
            .filter_map(|&i| available.get(i).cloned())
            .collect()
    } else {
        casks.to_vec()
    };

    wallpapers::install(executor, &chosen)?;
    setup.ctx.log.info(&format!("installed {} wallpaper cask(s)", chosen.len()));
    if setup.ctx.platform.is_macos() {
        setup
            .ctx
            .log
            .info("wallpapers are in ~/Library/Desktop Pictures");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::commands::test_helpers::{setup_in, setup_with};
    use crate::resources::test_helpers::MockExecutor;
    use crate::ui::prompt::MockPrompter;

    #[test]
    fn list_prints_every_bundle() {
        let mut out = Vec::new();
        list(&Theme::plain(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), BUNDLES.len() + 1);
        assert!(text.contains("  k8s               Kubernetes tools"));
    }

    #[test]
    fn install_unknown_bundle_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, exec) = setup_in(tmp.path());
        assert!(install(&setup, "games").is_err());
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn install_local_brewfile() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("Brewfile");
        std::fs::write(&file, "brew \"jq\"\n").unwrap();
        let exec = Arc::new(MockExecutor::new().with_programs(&["brew"]));
        let setup = setup_with(tmp.path(), &exec);
        install(&setup, &file.to_string_lossy()).unwrap();
        assert_eq!(exec.calls().len(), 1);
    }

    #[test]
    fn install_without_brew_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("Brewfile");
        std::fs::write(&file, "").unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        assert!(install(&setup, &file.to_string_lossy()).is_err());
    }

    #[test]
    fn menu_hides_desktop_bundle_off_gnome() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        let names: Vec<&str> = menu_bundles(&setup).iter().map(|b| b.name).collect();
        assert!(!names.contains(&"full-desktop"));
        assert_eq!(names.len(), BUNDLES.len() - 1);
    }

    #[test]
    fn menu_cancel_installs_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, exec) = setup_in(tmp.path());
        let mut prompter = MockPrompter::new();
        prompter.expect_multi_select().return_once(|_, _, _| Ok(None));
        menu(&setup, &prompter, &mut Vec::new()).unwrap();
        assert!(exec.calls().is_empty());
    }

    #[test]
    fn wallpapers_by_name_skip_picker() {
        let tmp = tempfile::tempdir().unwrap();
        let exec = Arc::new(MockExecutor::new().with_programs(&["brew"]));
        let setup = setup_with(tmp.path(), &exec);
        install_wallpapers(&setup, &["bluefin-wallpapers".to_string()], &MockPrompter::new())
            .unwrap();
        assert_eq!(
            exec.calls(),
            vec![
                "brew tap ublue-os/tap",
                "brew install --cask ublue-os/tap/bluefin-wallpapers"
            ]
        );
    }

    #[test]
    fn wallpapers_picker_installs_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let casks_dir = tmp.path().join("tap/Casks");
        std::fs::create_dir_all(&casks_dir).unwrap();
        std::fs::write(casks_dir.join("aurora-wallpapers.rb"), "").unwrap();
        std::fs::write(casks_dir.join("bluefin-wallpapers.rb"), "").unwrap();
        let repo = tmp.path().join("tap").display().to_string();
        let exec = Arc::new(
            MockExecutor::new()
                .with_programs(&["brew"])
                .with_responses(vec![(true, ""), (true, repo.as_str())]),
        );
        let setup = setup_with(tmp.path(), &exec);
        let mut prompter = MockPrompter::new();
        prompter
            .expect_multi_select()
            .return_once(|_, _, _| Ok(Some(vec![1])));

        install_wallpapers(&setup, &[], &prompter).unwrap();
        assert_eq!(
            exec.calls().last().unwrap(),
            "brew install --cask ublue-os/tap/bluefin-wallpapers"
        );
    }
}
