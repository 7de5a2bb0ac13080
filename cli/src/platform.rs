//! Operating system detection.
use std::fmt;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux, including Bluefin and other Fedora Atomic images.
    Linux,
    /// macOS.
    MacOs,
    /// Anything else; treated like Linux for paths but gets no OS info.
    Other,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        let os = if cfg!(target_os = "linux") {
            Os::Linux
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            Os::Other
        };
        Self { os }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is Linux.
    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.os == Os::Linux
    }

    /// Whether this is macOS.
    #[must_use]
    pub fn is_macos(&self) -> bool {
        self.os == Os::MacOs
    }

    /// Whether a GNOME desktop session is running on Linux.
    ///
    /// `desktop` is the value of `XDG_CURRENT_DESKTOP`, which may be a
    /// colon-separated list such as `ubuntu:GNOME`.
    #[must_use]
    pub fn is_gnome(&self, desktop: Option<&str>) -> bool {
        self.is_linux()
            && desktop.is_some_and(|d| {
                d.split(':')
                    .any(|part| part.trim().eq_ignore_ascii_case("gnome"))
            })
    }
}
