//! Command-line interface definition.
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "bluefin-cli",
    about = "Shell tool integration, Homebrew bundles and MOTD for Bluefin",
    version
)]
pub struct Cli {
    /// Subcommand; the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable coloured output (also honours `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Name used for the log file of this run.
    #[must_use]
    pub fn command_name(&self) -> &'static str {
        self.command.as_ref().map_or("menu", Command::name)
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the shell initialisation script
    Init(InitOpts),
    /// Enable or disable the shell integration
    Shell(ShellOpts),
    /// Show integration, tool and Homebrew status
    Status,
    /// Message of the day
    Motd(MotdOpts),
    /// Install Homebrew bundles or wallpapers
    Install(InstallOpts),
    /// Install Starship and apply presets
    Starship(StarshipOpts),
    /// Manage a Brewfile in the current directory
    Brewfile(BrewfileOpts),
    /// Run OS-provided just recipes and scripts
    Osscripts(OsscriptsOpts),
    /// Open the interactive main menu
    Menu,
    /// Print shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name as typed.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Shell(_) => "shell",
            Self::Status => "status",
            Self::Motd(_) => "motd",
            Self::Install(_) => "install",
            Self::Starship(_) => "starship",
            Self::Brewfile(_) => "brewfile",
            Self::Osscripts(_) => "osscripts",
            Self::Menu => "menu",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// `on` or `off`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    /// Enable.
    On,
    /// Disable.
    Off,
}

impl Switch {
    /// Whether this switch enables.
    #[must_use]
    pub const fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Tool overrides shared by `init` and `shell config`.
#[derive(Args, Debug, Clone, Default)]
pub struct ToolFlags {
    /// Tools to enable (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "TOOL")]
    pub enable: Vec<String>,

    /// Tools to disable (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "TOOL")]
    pub disable: Vec<String>,
}

impl ToolFlags {
    /// No overrides given.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.enable.is_empty() && self.disable.is_empty()
    }
}

/// Options for the `init` subcommand.
#[derive(Args, Debug, Clone)]
pub struct InitOpts {
    /// bash, zsh or fish
    pub shell: String,

    /// Tool overrides for this script only.
    #[command(flatten)]
    pub tools: ToolFlags,

    /// Also print the MOTD hook
    #[arg(long)]
    pub motd: bool,
}

/// Options for the `shell` subcommand.
#[derive(Args, Debug, Clone)]
#[command(args_conflicts_with_subcommands = true)]
pub struct ShellOpts {
    /// Subcommand.
    #[command(subcommand)]
    pub action: Option<ShellAction>,

    /// bash, zsh or fish; the shell menu when omitted
    pub shell: Option<String>,

    /// Defaults to `on`
    #[arg(value_enum)]
    pub state: Option<Switch>,
}

/// `shell` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ShellAction {
    /// Choose which tools are enabled
    Config(ShellConfigOpts),
}

/// Options for `shell config`.
#[derive(Args, Debug, Clone, Default)]
pub struct ShellConfigOpts {
    /// Tools to change; a picker when empty.
    #[command(flatten)]
    pub tools: ToolFlags,

    /// Do not install newly enabled tools
    #[arg(long)]
    pub no_install: bool,
}

/// Options for the `motd` subcommand.
#[derive(Args, Debug, Clone)]
pub struct MotdOpts {
    /// Subcommand; the MOTD menu when omitted.
    #[command(subcommand)]
    pub action: Option<MotdAction>,
}

/// `motd` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum MotdAction {
    /// Print the message of the day
    Show,
    /// Add or remove the MOTD hook from rc files
    Toggle {
        /// bash, zsh, fish or all (default)
        target: Option<String>,
        /// Defaults to `on`
        #[arg(value_enum)]
        state: Option<Switch>,
    },
    /// Set the glow theme
    Config {
        /// Theme name; a picker when omitted
        theme: Option<String>,
    },
}

/// Options for the `install` subcommand.
#[derive(Args, Debug, Clone)]
#[command(args_conflicts_with_subcommands = true)]
pub struct InstallOpts {
    /// Subcommand.
    #[command(subcommand)]
    pub action: Option<InstallAction>,

    /// Bundle name, path to a Brewfile, or `all`; the bundle menu when omitted
    pub target: Option<String>,
}

/// `install` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum InstallAction {
    /// List available bundles
    List,
    /// Install wallpaper casks from ublue-os/tap
    Wallpapers {
        /// Casks to install; a picker when omitted
        casks: Vec<String>,
    },
}

/// Options for the `starship` subcommand.
#[derive(Args, Debug, Clone)]
pub struct StarshipOpts {
    /// Subcommand; install plus the preset picker when omitted.
    #[command(subcommand)]
    pub action: Option<StarshipAction>,
}

/// `starship` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum StarshipAction {
    /// Apply a preset to ~/.config/starship.toml
    Theme {
        /// Preset name; a picker when omitted
        name: Option<String>,
    },
    /// Install starship
    Install,
}

/// Options for the `brewfile` subcommand.
#[derive(Args, Debug, Clone)]
pub struct BrewfileOpts {
    /// Subcommand.
    #[command(subcommand)]
    pub action: BrewfileAction,
}

/// `brewfile` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum BrewfileAction {
    /// Create ./Brewfile
    Init,
    /// Install everything in ./Brewfile
    Apply,
    /// Add a formula to ./Brewfile
    Add {
        /// Formula name
        package: String,
    },
}

/// Options for the `osscripts` subcommand.
#[derive(Args, Debug, Clone)]
pub struct OsscriptsOpts {
    /// Print the recipes instead of opening a picker
    #[arg(long)]
    pub list: bool,
}

/// Options for the `completions` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_opens_menu() {
        let cli = Cli::parse_from(["bluefin-cli"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.command_name(), "menu");
    }

    #[test]
    fn parse_init_with_overrides() {
        let cli = Cli::parse_from([
            "bluefin-cli",
            "init",
            "zsh",
            "--enable",
            "atuin,carapace",
            "--disable",
            "eza",
            "--motd",
        ]);
        let Some(Command::Init(opts)) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(opts.shell, "zsh");
        assert_eq!(opts.tools.enable, vec!["atuin", "carapace"]);
        assert_eq!(opts.tools.disable, vec!["eza"]);
        assert!(opts.motd);
    }

    #[test]
    fn parse_shell_toggle() {
        let cli = Cli::parse_from(["bluefin-cli", "shell", "fish", "off"]);
        let Some(Command::Shell(opts)) = cli.command else {
            panic!("expected shell");
        };
        assert_eq!(opts.shell.as_deref(), Some("fish"));
        assert_eq!(opts.state, Some(Switch::Off));
        assert!(opts.action.is_none());
    }

    #[test]
    fn parse_shell_without_state() {
        let cli = Cli::parse_from(["bluefin-cli", "shell", "bash"]);
        let Some(Command::Shell(opts)) = cli.command else {
            panic!("expected shell");
        };
        assert_eq!(opts.state, None);
    }

    #[test]
    fn parse_shell_config() {
        let cli = Cli::parse_from(["bluefin-cli", "shell", "config", "--disable", "bat", "--no-install"]);
        let Some(Command::Shell(opts)) = cli.command else {
            panic!("expected shell");
        };
        let Some(ShellAction::Config(config)) = opts.action else {
            panic!("expected shell config");
        };
        assert_eq!(config.tools.disable, vec!["bat"]);
        assert!(config.no_install);
    }

    #[test]
    fn parse_motd_toggle() {
        let cli = Cli::parse_from(["bluefin-cli", "motd", "toggle", "zsh", "off"]);
        let Some(Command::Motd(opts)) = cli.command else {
            panic!("expected motd");
        };
        assert!(matches!(
            opts.action,
            Some(MotdAction::Toggle { target: Some(ref t), state: Some(Switch::Off) }) if t == "zsh"
        ));
    }

    #[test]
    fn parse_install_bundle_and_list() {
        let cli = Cli::parse_from(["bluefin-cli", "install", "k8s"]);
        let Some(Command::Install(opts)) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(opts.target.as_deref(), Some("k8s"));

        let cli = Cli::parse_from(["bluefin-cli", "install", "list"]);
        let Some(Command::Install(opts)) = cli.command else {
            panic!("expected install");
        };
        assert!(matches!(opts.action, Some(InstallAction::List)));
    }

    #[test]
    fn parse_install_wallpapers() {
        let cli = Cli::parse_from(["bluefin-cli", "install", "wallpapers", "a", "b"]);
        let Some(Command::Install(opts)) = cli.command else {
            panic!("expected install");
        };
        assert!(matches!(opts.action, Some(InstallAction::Wallpapers { ref casks }) if casks.len() == 2));
    }

    #[test]
    fn parse_brewfile_add() {
        let cli = Cli::parse_from(["bluefin-cli", "brewfile", "add", "jq"]);
        let Some(Command::Brewfile(opts)) = cli.command else {
            panic!("expected brewfile");
        };
        assert!(matches!(opts.action, BrewfileAction::Add { ref package } if package == "jq"));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["bluefin-cli", "status", "-v", "--no-color"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.command_name(), "status");
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["bluefin-cli", "completions", "fish"]);
        assert!(matches!(
            cli.command,
            Some(Command::Completions(CompletionsOpts { shell: clap_complete::Shell::Fish }))
        ));
    }
}
