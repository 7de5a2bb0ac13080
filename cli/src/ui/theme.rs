//! ANSI styling for command output.
use crate::logging::strip_ansi;

const RESET: &str = "\x1b[0m";

/// Presentation context passed to everything that renders text.
///
/// Built once in `main` from `--no-color` / `NO_COLOR`; a theme with colour
/// off returns its input unchanged.
///
/// # Examples
///
/// ```
/// use bluefin_cli::ui::Theme;
///
/// assert_eq!(Theme::plain().ok("enabled"), "enabled");
/// assert_eq!(Theme::new(true).ok("enabled"), "\x1b[32menabled\x1b[0m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Theme {
    /// A theme that emits ANSI colour when `color` is set.
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    /// No colour.
    #[must_use]
    pub const fn plain() -> Self {
        Self::new(false)
    }

    /// Whether colour codes are emitted.
    #[must_use]
    pub const fn color(&self) -> bool {
        self.color
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Bold underlined cyan heading.
    #[must_use]
    pub fn title(&self, text: &str) -> String {
        self.paint("1;4;36", text)
    }

    /// Section label.
    #[must_use]
    pub fn label(&self, text: &str) -> String {
        self.paint("1;34", text)
    }

    /// Something enabled or installed.
    #[must_use]
    pub fn ok(&self, text: &str) -> String {
        self.paint("32", text)
    }

    /// Something disabled or missing.
    #[must_use]
    pub fn faint(&self, text: &str) -> String {
        self.paint("90", text)
    }

    /// Markers such as the default shell.
    #[must_use]
    pub fn accent(&self, text: &str) -> String {
        self.paint("33", text)
    }

    /// Failures.
    #[must_use]
    pub fn error(&self, text: &str) -> String {
        self.paint("31", text)
    }

    /// `✓ <name>: <on>` or `✗ <name>: <off>`, styled by `state`.
    #[must_use]
    pub fn check(&self, state: bool, name: &str, on: &str, off: &str) -> String {
        if state {
            format!("{} {name}: {}", self.ok("✓"), self.ok(on))
        } else {
            format!("{} {name}: {}", self.faint("✗"), self.faint(off))
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Display width of `text` in columns, ignoring ANSI escapes.
///
/// Every `char` counts as one column.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

/// `text` padded with spaces to `width` visible columns.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(text));
    format!("{text}{}", " ".repeat(fill))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_is_identity() {
        let theme = Theme::plain();
        assert_eq!(theme.title("Status"), "Status");
        assert_eq!(theme.error("boom"), "boom");
    }

    #[test]
    fn check_line() {
        let theme = Theme::plain();
        assert_eq!(theme.check(true, "bash", "enabled", "disabled"), "✓ bash: enabled");
        assert_eq!(theme.check(false, "zsh", "enabled", "disabled"), "✗ zsh: disabled");
    }

    #[test]
    fn width_ignores_escapes() {
        let theme = Theme::new(true);
        let styled = theme.ok("✓ installed");
        assert_eq!(visible_width(&styled), 11);
        assert_eq!(visible_width(&pad(&styled, 15)), 15);
    }

    #[test]
    fn pad_never_truncates() {
        assert_eq!(pad("abcdef", 3), "abcdef");
    }
}
