//! The `status` report: shell blocks, MOTD hooks, tools and Homebrew.
use crate::config::tool_config::ConfigStore;
use crate::config::tools::Tool;
use crate::environment::{Environment, shell_from_path};
use crate::exec::Executor;
use crate::shell::Shell;
use crate::shell::integration::{Block, BlockState, block_state};
use crate::tasks::Context;
use crate::ui::Theme;
use crate::ui::theme::pad;

/// Terminal width from which the report is laid out in two columns.
pub const TWO_COLUMN_MIN_WIDTH: usize = 80;

const LEFT_COLUMN: usize = 40;

/// Integration state of one installed shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellStatus {
    /// The shell.
    pub shell: Shell,
    /// Shell block in its rc file.
    pub shell_block: BlockState,
    /// MOTD block in its rc file.
    pub motd_block: BlockState,
    /// `$SHELL` points at it.
    pub is_default: bool,
    /// It is the parent process.
    pub is_current: bool,
}

/// One managed tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    /// The tool.
    pub tool: Tool,
    /// Binary found on `PATH`.
    pub installed: bool,
    /// Enabled in `shell.json` (or by default).
    pub enabled: bool,
}

/// Everything `status` prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Shells whose binary is on `PATH`.
    pub shells: Vec<ShellStatus>,
    /// Every managed tool in registry order.
    pub tools: Vec<ToolStatus>,
    /// First line of `brew --version`; `None` when brew is missing.
    pub homebrew: Option<String>,
}

impl StatusReport {
    /// Probe the system described by `ctx`.
    ///
    /// Never fails: an unreadable config falls back to defaults and a
    /// failing probe reads as "not present".
    #[must_use]
    pub fn gather(ctx: &Context) -> Self {
        let env = ctx.env.as_ref();
        let executor = ctx.executor.as_ref();
        let default_shell = env.default_shell();
        let current = current_shell(env, executor);

        let shells = Shell::ALL
            .into_iter()
            .filter(|shell| executor.which(shell.name()))
            .map(|shell| ShellStatus {
                shell,
                shell_block: block_state(env, shell, Block::Shell),
                motd_block: block_state(env, shell, Block::Motd),
                is_default: default_shell == Some(shell),
                is_current: current == Some(shell),
            })
            .collect();

        let config = ConfigStore::resolve(env).load_or_default(default_shell, &*ctx.log);
        let tools = Tool::ALL
            .into_iter()
            .map(|tool| ToolStatus {
                tool,
                installed: executor.which(tool.descriptor().binary),
                enabled: config.is_enabled(tool),
            })
            .collect();

        let homebrew = executor.which("brew").then(|| brew_version(executor));

        Self {
            shells,
            tools,
            homebrew,
        }
    }

    /// Render the report for a terminal `width` columns wide.
    #[must_use]
    pub fn render(&self, theme: &Theme, width: usize) -> String {
        let left = self.left_column(theme);
        let right = self.right_column(theme);

        let mut out = vec![theme.title("Bluefin CLI Status"), String::new()];
        if width >= TWO_COLUMN_MIN_WIDTH {
            let rows = left.len().max(right.len());
            for i in 0..rows {
                let l = left.get(i).map_or("", String::as_str);
                let r = right.get(i).map_or("", String::as_str);
                out.push(format!("{}{r}", pad(l, LEFT_COLUMN)).trim_end().to_string());
            }
        } else {
            out.extend(left);
            out.push(String::new());
            out.extend(right);
        }
        let mut text = out.join("\n");
        text.push('\n');
        text
    }

    fn left_column(&self, theme: &Theme) -> Vec<String> {
        let mut lines = vec![theme.label("Shell Experience:")];
        if self.shells.is_empty() {
            lines.push("  (no compatible shells found)".to_string());
        }
        for s in &self.shells {
            let marker = match (s.is_default, s.is_current) {
                (true, true) => theme.accent(" ★ (default, current)"),
                (true, false) => theme.accent(" ★ (default)"),
                (false, true) => theme.accent(" ● (current)"),
                (false, false) => String::new(),
            };
            lines.push(format!(
                "  {}{marker}",
                block_line(theme, s.shell_block, s.shell.name())
            ));
        }
        lines.push(String::new());
        lines.push(theme.label("Message of the Day:"));
        for s in &self.shells {
            lines.push(format!("  {}", block_line(theme, s.motd_block, s.shell.name())));
        }
        lines
    }

    fn right_column(&self, theme: &Theme) -> Vec<String> {
        let mut lines = vec![theme.label("Managed Tools:")];
        for t in &self.tools {
            let name = t.tool.descriptor().name;
            let suffix = if t.enabled {
                String::new()
            } else {
                theme.faint(" (disabled)")
            };
            lines.push(format!(
                "  {}{suffix}",
                theme.check(t.installed, name, "installed", "not installed")
            ));
        }
        lines.push(String::new());
        lines.push(theme.label("Package Manager:"));
        match &self.homebrew {
            Some(version) => {
                lines.push(format!("  {}", theme.check(true, "Homebrew", "installed", "")));
                if !version.is_empty() {
                    lines.push(format!("    {version}"));
                }
            }
            None => {
                lines.push(format!(
                    "  {}",
                    theme.check(false, "Homebrew", "", "not installed")
                ));
                lines.push("    Install from: https://brew.sh".to_string());
            }
        }
        lines
    }
}

fn block_line(theme: &Theme, state: BlockState, name: &str) -> String {
    match state {
        BlockState::Enabled => theme.check(true, name, "enabled", "disabled"),
        BlockState::Disabled => theme.check(false, name, "enabled", "disabled"),
        BlockState::Malformed => format!(
            "{} {name}: {}",
            theme.error("!"),
            theme.error("malformed block")
        ),
    }
}

/// The shell running this process, from `ps -p <ppid> -o comm=`.
#[must_use]
pub fn current_shell(env: &Environment, executor: &dyn Executor) -> Option<Shell> {
    let pid = env.parent_pid?.to_string();
    let out = executor
        .run_unchecked("ps", &["-p", &pid, "-o", "comm="])
        .ok()?;
    if !out.success {
        return None;
    }
    shell_from_path(&out.stdout)
}

fn brew_version(executor: &dyn Executor) -> String {
    executor
        .run_unchecked("brew", &["--version"])
        .ok()
        .filter(|r| r.success)
        .and_then(|r| r.stdout.lines().next().map(|l| l.trim().to_string()))
        .unwrap_or_default()
}
