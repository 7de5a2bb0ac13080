// Shared helpers for integration tests.
//
// Provides a temporary home directory, a scripted executor and a fluent
// builder so each integration test drives the command handlers against an
// isolated environment without touching the real rc files or brew.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;

use bluefin_cli::cli::{Cli, Command};
use bluefin_cli::commands::{self, CommandSetup};
use bluefin_cli::environment::Environment;
use bluefin_cli::exec::{ExecResult, Executor};
use bluefin_cli::logging::Logger;
use bluefin_cli::platform::{Os, Platform};
use bluefin_cli::ui::{Prompter, Theme};

/// Executor that records calls and reports a fixed set of programs on `PATH`.
#[derive(Debug, Default)]
pub struct StubExecutor {
    programs: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StubExecutor {
    fn record(&self, program: &str, args: &[&str]) {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line);
    }

    /// Every command run so far, as `program arg arg`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn ok() -> ExecResult {
    ExecResult {
        stdout: String::new(),
        stderr: String::new(),
        success: true,
        code: Some(0),
    }
}

impl Executor for StubExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.record(program, args);
        Ok(ok())
    }

    fn run_in(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.record(program, args);
        Ok(ok())
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.record(program, args);
        Ok(ok())
    }

    fn run_interactive(&self, program: &str, args: &[&str], _env: &[(&str, &str)]) -> Result<()> {
        self.record(program, args);
        Ok(())
    }

    fn run_with_stdin(&self, program: &str, args: &[&str], _input: &str) -> Result<()> {
        self.record(program, args);
        Ok(())
    }

    fn which(&self, program: &str) -> bool {
        self.programs.contains(program)
    }
}

/// Prompter for non-interactive paths: every question is cancelled.
#[derive(Debug, Default)]
pub struct CancelPrompter;

impl Prompter for CancelPrompter {
    fn select(&self, _prompt: &str, _items: &[String], _default: usize) -> Result<Option<usize>> {
        Ok(None)
    }

    fn multi_select(
        &self,
        _prompt: &str,
        _items: &[String],
        _checked: &[bool],
    ) -> Result<Option<Vec<usize>>> {
        Ok(None)
    }
}

/// An isolated home directory backed by a [`tempfile::TempDir`].
pub struct TestHome {
    /// Temporary directory used as `$HOME`.
    pub dir: tempfile::TempDir,
    /// Login shell reported through `$SHELL`.
    pub login_shell: Option<String>,
    /// Executor shared by every command run in this home.
    pub executor: Arc<StubExecutor>,
}

impl TestHome {
    /// Path to the home directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `path()` joined with `rel`.
    pub fn file(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Contents of `rel`, empty when missing.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.file(rel)).unwrap_or_default()
    }

    /// A plain-theme Linux setup for this home.
    pub fn setup(&self) -> CommandSetup {
        let mut env = Environment::with_home(self.path());
        env.shell.clone_from(&self.login_shell);
        CommandSetup::new(
            env,
            Platform::new(Os::Linux),
            Arc::new(Logger::with_log_file(None)),
            Arc::clone(&self.executor) as Arc<dyn Executor>,
            Theme::plain(),
        )
    }

    /// Parse `args` as a command line and run it, returning stdout.
    ///
    /// `brewfile` runs against the home directory.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("bluefin-cli").chain(args.iter().copied()))?;
        let setup = self.setup();
        let prompter = CancelPrompter;
        let mut out = Vec::new();
        match &cli.command {
            Some(Command::Init(opts)) => commands::init::run(&setup, opts, &mut out)?,
            Some(Command::Shell(opts)) => commands::shell::run(&setup, opts, &prompter, &mut out)?,
            Some(Command::Status) => commands::status::render(&setup, 60, &mut out)?,
            Some(Command::Motd(opts)) => commands::motd::run(&setup, opts, &prompter, &mut out)?,
            Some(Command::Install(opts)) => {
                commands::install::run(&setup, opts, &prompter, &mut out)?;
            }
            Some(Command::Brewfile(opts)) => commands::brewfile::run(&setup, opts, self.path())?,
            Some(Command::Version) => commands::version::run(&mut out)?,
            Some(Command::Completions(opts)) => commands::completions::run(opts, &mut out),
            other => anyhow::bail!("not driven by integration tests: {other:?}"),
        }
        Ok(String::from_utf8(out)?)
    }
}

/// Fluent builder for [`TestHome`].
pub struct TestHomeBuilder {
    home: TestHome,
    programs: HashSet<String>,
}

impl TestHomeBuilder {
    /// Begin building an empty home where nothing is installed.
    pub fn new() -> Self {
        Self {
            home: TestHome {
                dir: tempfile::tempdir().expect("create temp dir"),
                login_shell: None,
                executor: Arc::new(StubExecutor::default()),
            },
            programs: HashSet::new(),
        }
    }

    /// Report `program` as present on `PATH`.
    pub fn with_program(mut self, program: &str) -> Self {
        self.programs.insert(program.to_string());
        self
    }

    /// Set `$SHELL`.
    pub fn with_login_shell(mut self, path: &str) -> Self {
        self.home.login_shell = Some(path.to_string());
        self
    }

    /// Write `content` to `rel` under the home directory.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.home.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Finish building.
    pub fn build(mut self) -> TestHome {
        self.home.executor = Arc::new(StubExecutor {
            programs: self.programs,
            calls: Mutex::new(Vec::new()),
        });
        self.home
    }
}
