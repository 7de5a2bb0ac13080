//! Command: show, toggle and theme the message of the day.
use std::io::Write;

use anyhow::Result;

use super::CommandSetup;
use super::shell::toggle_shells;
use crate::cli::{MotdAction, MotdOpts, Switch};
use crate::config::motd::THEMES;
use crate::motd::{self, MotdTarget};
use crate::shell::integration::Block;
use crate::ui::Prompter;

/// Run the motd command.
///
/// # Errors
///
/// Returns an error for an unknown target or theme, or if any shell could
/// not be toggled.
pub fn run(
    setup: &CommandSetup,
    opts: &MotdOpts,
    prompter: &dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    match &opts.action {
        Some(MotdAction::Show) => show(setup, out),
        Some(MotdAction::Toggle { target, state }) => toggle(
            setup,
            target.as_deref().unwrap_or("all"),
            state.unwrap_or(Switch::On).enabled(),
        ),
        Some(MotdAction::Config { theme }) => config(setup, theme.as_deref(), prompter),
        None => menu(setup, prompter, out),
    }
}

/// Print the banner.
///
/// # Errors
///
/// Returns an error if the MOTD files cannot be set up or `out` fails.
pub fn show(setup: &CommandSetup, out: &mut dyn Write) -> Result<()> {
    let ctx = &setup.ctx;
    motd::show(&ctx.env, &ctx.platform, setup.executor(), &*ctx.log, out)
}

/// Add or remove the MOTD hook for `target` (`bash`, `zsh`, `fish` or `all`).
///
/// # Errors
///
/// Returns an error for an unknown target or when any shell failed.
pub fn toggle(setup: &CommandSetup, target: &str, enable: bool) -> Result<()> {
    let target: MotdTarget = target.parse()?;
    let failures = motd::toggle(setup.env(), target, enable, &*setup.ctx.log)?;
    if failures > 0 {
        anyhow::bail!("MOTD could not be updated for {failures} shell(s)");
    }
    Ok(())
}

/// Set the glow theme, picking from the known themes when `theme` is `None`.
///
/// # Errors
///
/// Returns an error for an unknown theme or an unwritable `motd.json`.
pub fn config(setup: &CommandSetup, theme: Option<&str>, prompter: &dyn Prompter) -> Result<()> {
    let chosen = match theme {
        Some(t) => t.to_string(),
        None => {
            let items: Vec<String> = THEMES.iter().map(ToString::to_string).collect();
            match prompter.select("Select MOTD theme", &items, 0)? {
                Some(i) => items.get(i).cloned().unwrap_or_default(),
                None => return Ok(()),
            }
        }
    };
    let saved = motd::set_theme(setup.env(), &chosen)?;
    setup.ctx.log.info(&format!("MOTD theme set to {saved}"));
    Ok(())
}

/// Interactive MOTD menu.
///
/// # Errors
///
/// Returns an error if a prompt or a chosen action fails.
pub fn menu(setup: &CommandSetup, prompter: &dyn Prompter, out: &mut dyn Write) -> Result<()> {
    let items = vec![
        "Show MOTD".to_string(),
        "Enable/Disable for shells".to_string(),
        "Change theme".to_string(),
        "Back".to_string(),
    ];
    loop {
        writeln!(out, "{}", setup.theme.title("Message of the Day"))?;
        match prompter.select("Choose an option", &items, 0)? {
            Some(0) => show(setup, out)?,
            Some(1) => {
                motd::setup(setup.env())?;
                toggle_shells(setup, prompter, Block::Motd, "Shells showing the MOTD")?;
            }
            Some(2) => config(setup, None, prompter)?,
            _ => return Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::commands::test_helpers::setup_in;
    use crate::config::motd::MotdConfig;
    use crate::shell::Shell;
    use crate::shell::integration;
    use crate::ui::prompt::MockPrompter;

    #[test]
    fn toggle_all_then_one_off() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        toggle(&setup, "all", true).unwrap();
        toggle(&setup, "zsh", false).unwrap();

        let status = integration::status(setup.env(), Block::Motd);
        assert!(status[&Shell::Bash]);
        assert!(!status[&Shell::Zsh]);
        assert!(status[&Shell::Fish]);
        assert!(motd::config_path(setup.env()).is_file());
    }

    #[test]
    fn toggle_unknown_target_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        let err = toggle(&setup, "tcsh", true).unwrap_err();
        assert!(err.to_string().contains("tcsh"));
        assert!(!tmp.path().join(".bashrc").exists());
    }

    #[test]
    fn toggle_reports_broken_rc_file() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        std::fs::write(
            tmp.path().join(".bashrc"),
            "# >>> bluefin-cli motd >>>\nunterminated\n",
        )
        .unwrap();
        assert!(toggle(&setup, "all", true).is_err());
        assert!(integration::status(setup.env(), Block::Motd)[&Shell::Fish]);
    }

    #[test]
    fn config_with_name_saves_theme() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        config(&setup, Some("dracula"), &MockPrompter::new()).unwrap();
        let cfg = MotdConfig::load(&motd::config_path(setup.env())).unwrap();
        assert_eq!(cfg.default_theme, "dracula");
    }

    #[test]
    fn config_unknown_theme_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        assert!(config(&setup, Some("neon"), &MockPrompter::new()).is_err());
    }

    #[test]
    fn config_picker_uses_selection() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        let mut prompter = MockPrompter::new();
        prompter
            .expect_select()
            .return_once(|_, items, _| Ok(items.iter().position(|t| t == "light")));
        config(&setup, None, &prompter).unwrap();
        let cfg = MotdConfig::load(&motd::config_path(setup.env())).unwrap();
        assert_eq!(cfg.default_theme, "light");
    }

    #[test]
    fn show_prints_plain_banner_without_glow() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        let mut out = Vec::new();
        show(&setup, &mut out).unwrap();
        assert!(!out.is_empty());
    }

    #[test]
    fn menu_back_exits() {
        let tmp = tempfile::tempdir().unwrap();
        let (setup, _exec) = setup_in(tmp.path());
        let mut prompter = MockPrompter::new();
        prompter.expect_select().return_once(|_, _, _| Ok(Some(3)));
        let mut out = Vec::new();
        menu(&setup, &prompter, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Message of the Day"));
    }
}
