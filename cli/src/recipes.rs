//! OS-provided `just` recipes and helper scripts.
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::exec::Executor;
use crate::resources::bundle::require;

/// Directory whose `*/just/` subdirectories are scanned.
pub const SHARE_DIR: &str = "/usr/share";

/// Something runnable found under a `just` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipe {
    /// A recipe inside a justfile.
    Just {
        /// The justfile declaring it.
        file: PathBuf,
        /// Recipe name.
        name: String,
    },
    /// A shell script run with `bash`.
    Script {
        /// Script path.
        path: PathBuf,
        /// `<package>/<relative path>`.
        label: String,
    },
}

impl Recipe {
    /// Run with inherited stdio.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe exits non-zero.
    pub fn run(&self, executor: &dyn Executor) -> Result<()> {
        match self {
            Self::Just { file, name } => {
                let file = file.to_string_lossy();
                executor.run_interactive("just", &["-f", file.as_ref(), name], &[])
            }
            Self::Script { path, .. } => {
                let path = path.to_string_lossy();
                executor.run_interactive("bash", &[path.as_ref()], &[])
            }
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Just { name, .. } => write!(f, "📜 {name}"),
            Self::Script { label, .. } => write!(f, "🐚 {label}"),
        }
    }
}

/// Recipe names declared in a justfile.
///
/// A recipe line is unindented, contains `:`, and its first word is the
/// name. Comments, `:=` assignments, `default`, and names starting with `@`
/// or `_` are skipped.
///
/// ```
/// use bluefin_cli::recipes::parse_justfile;
///
/// let text = "set shell := [\"bash\"]\n\n# update\nupdate:\n    echo hi\n_private:\ntoggle-x arg:\n";
/// assert_eq!(parse_justfile(text), vec!["update", "toggle-x"]);
/// ```
#[must_use]
pub fn parse_justfile(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.starts_with([' ', '\t']))
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| line.contains(':') && !line.contains(":="))
        .filter_map(|line| line.split(':').next()?.split_whitespace().next())
        .filter(|name| *name != "default" && !name.starts_with(['@', '_']))
        .map(String::from)
        .collect()
}

/// Every recipe and script under `root/*/just/`, sorted by path.
///
/// Unreadable directories and files are ignored.
#[must_use]
pub fn discover(root: &Path) -> Vec<Recipe> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };
    let mut packages: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("just").is_dir())
        .collect();
    packages.sort();

    let mut recipes = Vec::new();
    for package in packages {
        let just_dir = package.join("just");
        let mut files = Vec::new();
        collect_files(&just_dir, &mut files);
        files.sort();
        let package_name = package
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        for file in files {
            let is_justfile = file.extension().is_some_and(|e| e == "just")
                || file
                    .file_name()
                    .is_some_and(|n| n == "justfile" || n == "Justfile");
            if is_justfile {
                let Ok(text) = std::fs::read_to_string(&file) else {
                    continue;
                };
                recipes.extend(parse_justfile(&text).into_iter().map(|name| Recipe::Just {
                    file: file.clone(),
                    name,
                }));
            } else if file.extension().is_some_and(|e| e == "sh") {
                let rel = file.strip_prefix(&just_dir).unwrap_or(&file);
                recipes.push(Recipe::Script {
                    label: format!("{package_name}/{}", rel.display()),
                    path: file,
                });
            }
        }
    }
    recipes
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    // `file_type` does not follow symlinks, so linked directories are not
    // descended into and a link cycle cannot recurse.
    for entry in entries.filter_map(std::result::Result::ok) {
        let Ok(kind) = entry.file_type() else {
            continue;
        };
        if kind.is_dir() {
            collect_files(&entry.path(), out);
        } else {
            out.push(entry.path());
        }
    }
}

/// [`discover`] after checking that `just` is installed.
///
/// # Errors
///
/// Returns an error if `just` is missing or nothing was found.
pub fn available(executor: &dyn Executor, root: &Path) -> Result<Vec<Recipe>> {
    require(executor, "just")?;
    let recipes = discover(root);
    if recipes.is_empty() {
        anyhow::bail!("no OS scripts found in {}/*/just/", root.display());
    }
    Ok(recipes)
}
