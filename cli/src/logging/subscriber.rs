//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, strip_ansi};

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "bluefin::stage";

/// How much the console shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMode {
    /// Info to stdout, warnings and errors to stderr.
    Normal,
    /// Like [`Normal`](Self::Normal) plus debug messages.
    Verbose,
    /// Warnings and errors to stderr only; stdout is left for command output
    /// that a shell will evaluate (`init`, `completions`).
    Quiet,
}

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::Layer`] that appends all events to the persistent
/// log file with timestamps and ANSI codes stripped.
///
/// Always captures events at `DEBUG` level and above regardless of the
/// console mode.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Create the log file at `path` (truncating any previous run), write a
    /// run header, and return a layer appending to it.
    ///
    /// Returns `None` if the directory cannot be created or the file cannot
    /// be opened; logging to the file is best-effort.
    pub(super) fn new(path: &Path) -> Option<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        let version = option_env!("BLUEFIN_CLI_VERSION")
            .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!(
            "==========================================\n\
             bluefin-cli {version} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let ts = format_utc_time();

        let line = match (level, target) {
            (tracing::Level::INFO, STAGE_TARGET) => format!("[{ts}] ==> {msg}"),
            (tracing::Level::ERROR, _) => format!("[{ts}]     [error] {msg}"),
            (tracing::Level::WARN, _) => format!("[{ts}]     [warn] {msg}"),
            (tracing::Level::DEBUG, _) => format!("[{ts}]     [debug] {msg}"),
            _ => format!("[{ts}]     {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits bluefin-cli console
/// output: `==>` stage headers, indented info lines and tagged warnings.
struct ConsoleFormatter {
    color: bool,
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        let line = match level {
            tracing::Level::ERROR => format!("\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => format!("\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::INFO if target == STAGE_TARGET => {
                format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO => format!("  {msg}"),
            _ => format!("  \x1b[2m{msg}\x1b[0m"),
        };

        if self.color {
            writeln!(writer, "{line}")
        } else {
            writeln!(writer, "{}", strip_ansi(&line))
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Sets up a console layer in the requested [`ConsoleMode`] and, when
/// `log_file` is given, a file layer that writes all events (including
/// `debug`) to it.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(mode: ConsoleMode, color: bool, log_file: Option<&Path>) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_layer = match mode {
        ConsoleMode::Quiet => fmt::layer()
            .event_format(ConsoleFormatter { color })
            .with_writer(std::io::stderr)
            .with_filter(LevelFilter::WARN)
            .boxed(),
        ConsoleMode::Normal | ConsoleMode::Verbose => {
            let level = if mode == ConsoleMode::Verbose {
                LevelFilter::DEBUG
            } else {
                LevelFilter::INFO
            };
            let make_writer = std::io::stderr
                .with_max_level(tracing::Level::WARN)
                .and(std::io::stdout.with_min_level(tracing::Level::INFO));
            fmt::layer()
                .event_format(ConsoleFormatter { color })
                .with_writer(make_writer)
                .with_filter(level)
                .boxed()
        }
    };

    let file_layer = log_file
        .and_then(FileLayer::new)
        .map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
