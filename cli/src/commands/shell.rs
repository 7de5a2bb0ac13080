//! Command: enable or disable the shell integration and choose tools.
use std::io::Write;

use anyhow::Result;

use super::CommandSetup;
use super::init::apply_flags;
use crate::cli::{ShellAction, ShellConfigOpts, ShellOpts, Switch};
use crate::config::tool_config::ConfigStore;
use crate::config::tools::Tool;
use crate::shell::Shell;
use crate::shell::integration::{self, Block};
use crate::status::current_shell;
use crate::tasks::env_files::WriteEnvFiles;
use crate::tasks::tools::InstallShellTools;
use crate::tasks::{self, Task};
use crate::ui::Prompter;
use crate::ui::prompt::changed_selections;

/// Run the shell command.
///
/// # Errors
///
/// Returns an error for an unsupported shell, an unknown tool, or a failed
/// rc-file or config write.
pub fn run(
    setup: &CommandSetup,
    opts: &ShellOpts,
    prompter: &dyn Prompter,
    out: &mut dyn Write,
) -> Result<()> {
    match (&opts.action, &opts.shell) {
        (Some(ShellAction::Config(config)), _) => configure(setup, config, prompter),
        (None, Some(name)) => toggle(setup, name, opts.state.unwrap_or(Switch::On).enabled()),
        (None, None) => menu(setup, prompter, out),
    }
}

/// Add or remove the shell block for the shell called `name`.
///
/// # Errors
///
/// Returns an error for an unsupported shell (before touching any file) or
/// a malformed or unwritable rc file.
pub fn toggle(setup: &CommandSetup, name: &str, enable: bool) -> Result<()> {
    let log = &setup.ctx.log;
    let (shell, change) = integration::toggle_by_name(setup.env(), name, Block::Shell, enable)?;
    log.info(&format!(
        "shell integration {}",
        integration::describe(shell, enable, &change)
    ));
    if enable {
        log.info(&format!(
            "restart {shell} or run: source {}",
            shell.rc_path(&setup.env().home).display()
        ));
    }
    Ok(())
}

/// Save the enabled tool set, refresh env files and install what is new.
///
/// Without `--enable` / `--disable` the tool set is chosen interactively;
/// cancelling leaves everything untouched.
///
/// # Errors
///
/// Returns an error for an unknown tool, an unreadable or unwritable
/// config, or if a task fails.
pub fn configure(
    setup: &CommandSetup,
    opts: &ShellConfigOpts,
    prompter: &dyn Prompter,
) -> Result<()> {
    let ctx = &setup.ctx;
    let store = ConfigStore::resolve(setup.env());
    // Saved and exported for every shell, so keys resolve to global defaults.
    let mut cfg = store.load(None, &*ctx.log)?;

    if opts.tools.is_empty() {
        let items: Vec<String> = Tool::ALL
            .iter()
            .map(|t| {
                let desc = t.descriptor();
                format!("{} ({})", desc.key, desc.description)
            })
            .collect();
        let checked: Vec<bool> = Tool::ALL.iter().map(|t| cfg.is_enabled(*t)).collect();
        let Some(selected) = prompter.multi_select("Select tools to enable", &items, &checked)? else {
            return Ok(());
        };
        for (i, tool) in Tool::ALL.into_iter().enumerate() {
            cfg.set_enabled(tool, selected.contains(&i));
        }
    } else {
        apply_flags(&mut cfg, &opts.tools)?;
    }

    store.save(&cfg)?;
    ctx.log.info(&format!("saved {}", store.path().display()));

    let mut run: Vec<Box<dyn Task>> = vec![Box::new(WriteEnvFiles::new(cfg.clone()))];
    if !opts.no_install {
        run.push(Box::new(InstallShellTools::new(cfg)));
    }
    tasks::run_tasks_to_completion(&run, ctx, &setup.log)
}

/// Multi-select of shells with `block` present; toggles only the shells
/// whose state changed. Cancelling changes nothing.
///
/// # Errors
///
/// Returns an error if the prompt fails or an rc file cannot be updated.
pub fn toggle_shells(
    setup: &CommandSetup,
    prompter: &dyn Prompter,
    block: Block,
    prompt: &str,
) -> Result<()> {
    let status = integration::status(setup.env(), block);
    let items: Vec<String> = Shell::ALL.iter().map(|s| s.name().to_string()).collect();
    let before: Vec<bool> = Shell::ALL
        .iter()
        .map(|s| status.get(s).copied().unwrap_or(false))
        .collect();
    let Some(selected) = prompter.multi_select(prompt, &items, &before)? else {
        return Ok(());
    };
    for (i, enable) in changed_selections(&before, &selected) {
        let Some(shell) = Shell::ALL.get(i).copied() else {
            continue;
        };
        let change = integration::toggle(setup.env(), shell, block, enable)?;
        setup.ctx.log.info(&format!(
            "{} {}",
            block.name(),
            integration::describe(shell, enable, &change)
        ));
    }
    Ok(())
}

/// Interactive shell menu; returns when the user picks "Back" or cancels.
///
/// # Errors
///
/// Returns an error if a prompt fails or a chosen action fails.
pub fn menu(setup: &CommandSetup, prompter: &dyn Prompter, out: &mut dyn Write) -> Result<()> {
    let current = current_shell(setup.env(), setup.executor())
        .or_else(|| setup.env().default_shell())
        .unwrap_or(Shell::Bash);
    loop {
        let enabled = integration::status(setup.env(), Block::Shell)
            .get(&current)
            .copied()
            .unwrap_or(false);
        let verb = if enabled { "Disable" } else { "Enable" };
        let items = vec![
            format!("{verb} for current shell ({current})"),
            "Configure components".to_string(),
            "Enable/Disable for other shells".to_string(),
            "Back".to_string(),
        ];
        writeln!(out, "{}", setup.theme.title("Shell Configuration"))?;
        match prompter.select("Choose an option", &items, 0)? {
            Some(0) => {
                let change = integration::toggle(setup.env(), current, Block::Shell, !enabled)?;
                setup.ctx.log.info(&format!(
                    "shell integration {}",
                    integration::describe(current, !enabled, &change)
                ));
            }
            Some(1) => configure(setup, &ShellConfigOpts::default(), prompter)?,
            Some(2) => toggle_shells(setup, prompter, Block::Shell, "Shells with the integration")?,
            _ => return Ok(()),
        }
    }
}
