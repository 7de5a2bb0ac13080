//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Read `path` as UTF-8, treating a missing file as empty.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn read_or_empty(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// Write `content` to `path`, creating parent directories first.
///
/// This is a plain overwrite; a crash mid-write can leave a truncated file.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the file cannot be
/// written.
pub fn write_with_parents(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}
