//! Homebrew bundles published by Project Bluefin.

/// Where the bundle Brewfiles are published.
pub const BASE_URL: &str = "https://raw.githubusercontent.com/projectbluefin/common/main/system_files";

/// Default directory of bundle files under [`BASE_URL`].
const SHARED_PATH: &str = "shared/usr/share/ublue-os/homebrew";

/// A named, remotely hosted Brewfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundle {
    /// Name used on the command line.
    pub name: &'static str,
    /// Brewfile name.
    pub file: &'static str,
    /// Directory under [`BASE_URL`].
    pub path: &'static str,
    /// Menu description.
    pub description: &'static str,
    /// Whether the bundle installs flatpaks and needs the Flathub remote.
    pub needs_flathub: bool,
}

impl Bundle {
    /// Download URL of the Brewfile.
    ///
    /// # Examples
    ///
    /// ```
    /// use bluefin_cli::config::bundles;
    ///
    /// let cli = bundles::find("cli").unwrap();
    /// assert!(cli.url().ends_with("/shared/usr/share/ublue-os/homebrew/cli.Brewfile"));
    /// ```
    #[must_use]
    pub fn url(&self) -> String {
        format!("{BASE_URL}/{}/{}", self.path, self.file)
    }
}

/// Every bundle, in menu order.
pub static BUNDLES: [Bundle; 9] = [
    Bundle {
        name: "ai",
        file: "ai-tools.Brewfile",
        path: SHARED_PATH,
        description: "AI and LLM tools",
        needs_flathub: false,
    },
    Bundle {
        name: "artwork",
        file: "artwork.Brewfile",
        path: SHARED_PATH,
        description: "Wallpapers and artwork",
        needs_flathub: false,
    },
    Bundle {
        name: "cli",
        file: "cli.Brewfile",
        path: SHARED_PATH,
        description: "Command line essentials",
        needs_flathub: false,
    },
    Bundle {
        name: "cncf",
        file: "cncf.Brewfile",
        path: SHARED_PATH,
        description: "Cloud native tools",
        needs_flathub: false,
    },
    Bundle {
        name: "experimental-ide",
        file: "experimental-ide.Brewfile",
        path: SHARED_PATH,
        description: "Experimental IDEs",
        needs_flathub: false,
    },
    Bundle {
        name: "fonts",
        file: "fonts.Brewfile",
        path: SHARED_PATH,
        description: "Developer fonts",
        needs_flathub: false,
    },
    Bundle {
        name: "full-desktop",
        file: "full-desktop.Brewfile",
        path: "bluefin/usr/share/ublue-os/homebrew",
        description: "Full Bluefin desktop applications (GNOME)",
        needs_flathub: true,
    },
    Bundle {
        name: "ide",
        file: "ide.Brewfile",
        path: SHARED_PATH,
        description: "IDEs and editors",
        needs_flathub: false,
    },
    Bundle {
        name: "k8s",
        file: "k8s-tools.Brewfile",
        path: SHARED_PATH,
        description: "Kubernetes tools",
        needs_flathub: false,
    },
];

/// Look up a bundle by name (case-insensitive).
#[must_use]
pub fn find(name: &str) -> Option<&'static Bundle> {
    BUNDLES
        .iter()
        .find(|b| b.name.eq_ignore_ascii_case(name.trim()))
}

/// Comma-separated bundle names, for error messages.
#[must_use]
pub fn valid_names() -> String {
    BUNDLES.map(|b| b.name).join(", ")
}
