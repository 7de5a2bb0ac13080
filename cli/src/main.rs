//! `bluefin-cli` binary: parse arguments, set up logging, dispatch.
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use bluefin_cli::cli::{Cli, Command};
use bluefin_cli::commands::{self, CommandSetup};
use bluefin_cli::environment::Environment;
use bluefin_cli::logging::{ConsoleMode, init_subscriber};
use bluefin_cli::recipes::SHARE_DIR;
use bluefin_cli::ui::{DialoguerPrompter, Theme};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    let color = !args.no_color && !no_color_env;
    let mode = match args.command {
        Some(Command::Init(_) | Command::Completions(_)) => ConsoleMode::Quiet,
        _ if args.verbose => ConsoleMode::Verbose,
        _ => ConsoleMode::Normal,
    };
    let env = Environment::from_process();
    let log_file = env.as_ref().ok().map(|e| e.log_file(args.command_name()));
    init_subscriber(mode, color, log_file.as_deref());

    if let Err(e) = ctrlc::set_handler(|| {
        tracing::warn!("interrupted");
        std::process::exit(130);
    }) {
        tracing::debug!("cannot install Ctrl-C handler: {e}");
    }

    match dispatch(&args, env, Theme::new(color)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(args: &Cli, env: Result<Environment>, theme: Theme) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    let out: &mut dyn Write = &mut stdout;

    // Commands that need no environment.
    match &args.command {
        Some(Command::Version) => return commands::version::run(out),
        Some(Command::Completions(opts)) => {
            commands::completions::run(opts, out);
            return Ok(());
        }
        _ => {}
    }

    let setup = CommandSetup::init(env?, args.command_name(), theme);
    let prompter = DialoguerPrompter;
    let share = Path::new(SHARE_DIR);

    match &args.command {
        Some(Command::Init(opts)) => commands::init::run(&setup, opts, out),
        Some(Command::Shell(opts)) => commands::shell::run(&setup, opts, &prompter, out),
        Some(Command::Status) => commands::status::run(&setup, out),
        Some(Command::Motd(opts)) => commands::motd::run(&setup, opts, &prompter, out),
        Some(Command::Install(opts)) => commands::install::run(&setup, opts, &prompter, out),
        Some(Command::Starship(opts)) => commands::starship::run(&setup, opts, &prompter, out),
        Some(Command::Brewfile(opts)) => {
            commands::brewfile::run(&setup, opts, &std::env::current_dir()?)
        }
        Some(Command::Osscripts(opts)) => {
            commands::osscripts::run(&setup, opts, share, &prompter, out)
        }
        Some(Command::Menu) | None => commands::menu::run(&setup, &prompter, share, out),
        Some(Command::Version | Command::Completions(_)) => Ok(()),
    }
}
