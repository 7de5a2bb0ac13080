//! A managed, marker-delimited block inside a user-owned rc file.
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::helpers::fs::{read_or_empty, write_with_parents};
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::TargetError;

/// A block of lines between a begin and an end marker in a text file.
///
/// ```text
/// # >>> bluefin-cli shell >>>
/// eval "$(bluefin-cli init bash)"
/// # <<< bluefin-cli shell <<<
/// ```
///
/// [`apply`](Applicable::apply) appends the block when it is absent and
/// [`remove`](Applicable::remove) deletes every occurrence, begin through end
/// inclusive. Both are idempotent. Text outside the block is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcBlockResource {
    path: PathBuf,
    begin: String,
    end: String,
    body: Vec<String>,
}

/// Line ranges `[begin, end]` of complete blocks, or the index of a begin
/// marker with no end.
type Scan = Result<Vec<(usize, usize)>, usize>;

impl RcBlockResource {
    /// A block named `name` in `path` wrapping `body` (one or more lines).
    #[must_use]
    pub fn new(path: &Path, name: &str, body: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            begin: format!("# >>> bluefin-cli {name} >>>"),
            end: format!("# <<< bluefin-cli {name} <<<"),
            body: body.lines().map(String::from).collect(),
        }
    }

    /// Path of the rc file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The begin marker line.
    #[must_use]
    pub fn begin_marker(&self) -> &str {
        &self.begin
    }

    /// The end marker line.
    #[must_use]
    pub fn end_marker(&self) -> &str {
        &self.end
    }

    /// Whether the file holds a complete block, begin through end.
    ///
    /// A missing or unreadable file, or a begin marker without an end
    /// marker, counts as absent.
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self.current_state(), Ok(ResourceState::Correct))
    }

    /// The block as it is written, newline-terminated.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.begin);
        out.push('\n');
        for line in &self.body {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.end);
        out.push('\n');
        out
    }

    fn scan(&self, content: &str) -> Scan {
        let lines: Vec<&str> = content.lines().collect();
        let mut blocks = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            if lines.get(i).is_some_and(|l| l.trim() == self.begin) {
                let end = lines
                    .iter()
                    .enumerate()
                    .skip(i + 1)
                    .find(|(_, l)| l.trim() == self.end)
                    .map(|(j, _)| j)
                    .ok_or(i)?;
                blocks.push((i, end));
                i = end + 1;
            } else {
                i += 1;
            }
        }
        Ok(blocks)
    }

    fn malformed(&self) -> TargetError {
        TargetError::MalformedBlock {
            path: self.path.display().to_string(),
            marker: self.begin.clone(),
        }
    }
}

impl Applicable for RcBlockResource {
    fn description(&self) -> String {
        format!("{} in {}", self.begin, self.path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        let content = read_or_empty(&self.path)?;
        match self.scan(&content) {
            Err(_) => return Err(self.malformed().into()),
            Ok(blocks) if !blocks.is_empty() => return Ok(ResourceChange::AlreadyCorrect),
            Ok(_) => {}
        }

        let mut updated = content;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(&self.render());
        write_with_parents(&self.path, &updated)?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if !self.path.exists() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        let content = read_or_empty(&self.path)?;
        let blocks = self.scan(&content).map_err(|_| self.malformed())?;
        if blocks.is_empty() {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        // Kept lines are copied with their own line endings.
        let kept: Vec<&str> = content
            .split_inclusive('\n')
            .enumerate()
            .filter(|(i, _)| !blocks.iter().any(|&(b, e)| (b..=e).contains(i)))
            .map(|(_, line)| line)
            .collect();
        let eol = if kept.last().is_some_and(|l| l.ends_with("\r\n")) {
            "\r\n"
        } else {
            "\n"
        };
        let mut updated = kept.concat().trim_end_matches(['\r', '\n']).to_string();
        if !updated.is_empty() {
            updated.push_str(eol);
        }
        write_with_parents(&self.path, &updated)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for RcBlockResource {
    fn current_state(&self) -> Result<ResourceState> {
        let content = read_or_empty(&self.path)?;
        Ok(match self.scan(&content) {
            Err(line) => ResourceState::Invalid {
                reason: format!("begin marker on line {} has no end marker", line + 1),
            },
            Ok(blocks) if blocks.is_empty() => ResourceState::Missing,
            Ok(_) => ResourceState::Correct,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::fs;

    const DIRECTIVE: &str = r#"eval "$(bluefin-cli init bash)""#;

    fn block_in(dir: &tempfile::TempDir, rel: &str) -> RcBlockResource {
        RcBlockResource::new(&dir.path().join(rel), "shell", DIRECTIVE)
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    // -----------------------------------------------------------------------
    // apply
    // -----------------------------------------------------------------------

    #[test]
    fn apply_creates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        assert_eq!(block.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(
            fs::read_to_string(block.path()).unwrap(),
            "# >>> bluefin-cli shell >>>\neval \"$(bluefin-cli init bash)\"\n# <<< bluefin-cli shell <<<\n"
        );
    }

    #[test]
    fn apply_creates_nested_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".config/fish/config.fish");
        block.apply().unwrap();
        assert!(block.path().is_file());
    }

    #[test]
    fn apply_twice_leaves_one_block() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        fs::write(block.path(), "alias ll='ls -l'\n").unwrap();
        assert_eq!(block.apply().unwrap(), ResourceChange::Applied);
        let after_first = fs::read_to_string(block.path()).unwrap();
        assert_eq!(block.apply().unwrap(), ResourceChange::AlreadyCorrect);
        let after_second = fs::read_to_string(block.path()).unwrap();
        assert_eq!(after_first, after_second);
        assert_eq!(count(&after_second, block.begin_marker()), 1);
    }

    #[test]
    fn apply_does_not_double_newlines() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        fs::write(block.path(), "export A=1\n").unwrap();
        block.apply().unwrap();
        let content = fs::read_to_string(block.path()).unwrap();
        assert!(content.starts_with("export A=1\n# >>> bluefin-cli shell >>>\n"), "{content}");
    }

    #[test]
    fn apply_separates_unterminated_last_line() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        fs::write(block.path(), "export A=1").unwrap();
        block.apply().unwrap();
        let content = fs::read_to_string(block.path()).unwrap();
        assert!(content.starts_with("export A=1\n# >>>"), "{content}");
        assert!(content.ends_with("<<<\n"));
    }

    #[test]
    fn apply_rejects_unterminated_block_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        let original = "# >>> bluefin-cli shell >>>\neval stuff\n";
        fs::write(block.path(), original).unwrap();
        let err = block.apply().unwrap_err();
        assert!(err.to_string().contains("no matching end marker"), "{err}");
        assert_eq!(fs::read_to_string(block.path()).unwrap(), original);
    }

    // -----------------------------------------------------------------------
    // remove
    // -----------------------------------------------------------------------

    #[test]
    fn remove_without_file_does_not_create_it() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".zshrc");
        assert_eq!(block.remove().unwrap(), ResourceChange::AlreadyCorrect);
        assert!(!block.path().exists());
    }

    #[test]
    fn remove_without_block_is_byte_identical() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        let original = "export A=1\n\n\n# trailing blank lines kept\n\n";
        fs::write(block.path(), original).unwrap();
        assert_eq!(block.remove().unwrap(), ResourceChange::AlreadyCorrect);
        assert_eq!(fs::read_to_string(block.path()).unwrap(), original);
    }

    #[test]
    fn apply_then_remove_restores_content() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        let original = "export A=1\nalias g=git\n";
        fs::write(block.path(), original).unwrap();
        block.apply().unwrap();
        block.remove().unwrap();
        assert_eq!(fs::read_to_string(block.path()).unwrap(), original);
    }

    #[test]
    fn remove_keeps_content_on_both_sides() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        fs::write(
            block.path(),
            "before\n# >>> bluefin-cli shell >>>\nedited by hand\nsecond line\n# <<< bluefin-cli shell <<<\nafter\n",
        )
        .unwrap();
        assert_eq!(block.remove().unwrap(), ResourceChange::Applied);
        assert_eq!(fs::read_to_string(block.path()).unwrap(), "before\nafter\n");
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        let rendered = block.render();
        fs::write(block.path(), format!("{rendered}middle\n{rendered}")).unwrap();
        block.remove().unwrap();
        assert_eq!(fs::read_to_string(block.path()).unwrap(), "middle\n");
        assert_eq!(block.remove().unwrap(), ResourceChange::AlreadyCorrect);
    }

    #[test]
    fn remove_only_block_leaves_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        block.apply().unwrap();
        block.remove().unwrap();
        assert_eq!(fs::read_to_string(block.path()).unwrap(), "");
    }

    #[test]
    fn remove_normalises_trailing_newlines() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        fs::write(block.path(), format!("a\n\n\n{}", block.render())).unwrap();
        block.remove().unwrap();
        assert_eq!(fs::read_to_string(block.path()).unwrap(), "a\n");
    }

    #[test]
    fn apply_then_remove_keeps_crlf_line_endings() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        let original = "export A=1\r\nexport B=2\r\n";
        fs::write(block.path(), original).unwrap();
        block.apply().unwrap();
        assert_eq!(block.remove().unwrap(), ResourceChange::Applied);
        assert_eq!(fs::read_to_string(block.path()).unwrap(), original);
    }

    #[test]
    fn remove_keeps_crlf_around_block() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        fs::write(
            block.path(),
            format!("a\r\n{}b\r\n", block.render().replace('\n', "\r\n")),
        )
        .unwrap();
        block.remove().unwrap();
        assert_eq!(fs::read_to_string(block.path()).unwrap(), "a\r\nb\r\n");
    }

    #[test]
    fn unterminated_block_is_not_present() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        fs::write(block.path(), "# >>> bluefin-cli shell >>>\neval stuff\n").unwrap();
        assert!(!block.is_present());
    }

    #[test]
    fn remove_rejects_unterminated_block_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        let original = "a\n# >>> bluefin-cli shell >>>\nb\n";
        fs::write(block.path(), original).unwrap();
        assert!(block.remove().is_err());
        assert_eq!(fs::read_to_string(block.path()).unwrap(), original);
    }

    #[test]
    fn other_block_names_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let shell = block_in(&tmp, ".bashrc");
        let motd = RcBlockResource::new(shell.path(), "motd", "bluefin-cli motd show");
        shell.apply().unwrap();
        motd.apply().unwrap();
        shell.remove().unwrap();
        assert!(!shell.is_present());
        assert!(motd.is_present());
    }

    // -----------------------------------------------------------------------
    // state
    // -----------------------------------------------------------------------

    #[test]
    fn current_state_transitions() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        assert_eq!(block.current_state().unwrap(), ResourceState::Missing);
        block.apply().unwrap();
        assert_eq!(block.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn current_state_invalid_for_unterminated_block() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        fs::write(block.path(), "x\n# >>> bluefin-cli shell >>>\n").unwrap();
        assert!(matches!(
            block.current_state().unwrap(),
            ResourceState::Invalid { ref reason } if reason.contains("line 2")
        ));
    }

    #[test]
    fn markers_match_with_surrounding_whitespace() {
        let tmp = tempfile::tempdir().unwrap();
        let block = block_in(&tmp, ".bashrc");
        fs::write(
            block.path(),
            "  # >>> bluefin-cli shell >>>  \nx\n\t# <<< bluefin-cli shell <<<\n",
        )
        .unwrap();
        assert!(block.is_present());
        assert_eq!(block.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }

    #[test]
    fn multi_line_body_is_rendered_in_order() {
        let block = RcBlockResource::new(Path::new("/x"), "motd", "one\ntwo");
        assert_eq!(
            block.render(),
            "# >>> bluefin-cli motd >>>\none\ntwo\n# <<< bluefin-cli motd <<<\n"
        );
    }
}
