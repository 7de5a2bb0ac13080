//! Interactive prompts behind an injectable [`Prompter`] trait.
use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{MultiSelect, Select};

/// Terminal prompts used by the menus.
///
/// Every method returns `Ok(None)` when the user cancels (Esc or `q`), which
/// menus treat as "go back".
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Pick one of `items`, starting on `default`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be driven.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>>;

    /// Pick any subset of `items`; `checked` gives the initial selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be driven.
    fn multi_select(
        &self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Option<Vec<usize>>>;
}

/// [`Prompter`] on the controlling terminal via `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<Option<usize>> {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()?;
        Ok(choice)
    }

    fn multi_select(
        &self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Option<Vec<usize>>> {
        let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{prompt} (space to toggle, enter to confirm)"))
            .items(items)
            .defaults(checked)
            .interact_opt()?;
        Ok(chosen)
    }
}

/// Indices whose checked state differs between `before` and `after`,
/// paired with the new state.
///
/// `after` holds the selected indices returned by
/// [`Prompter::multi_select`].
///
/// ```
/// use bluefin_cli::ui::prompt::changed_selections;
///
/// // bash was on, zsh off, fish on; the user unticked fish and ticked zsh.
/// let changes = changed_selections(&[true, false, true], &[0, 1]);
/// assert_eq!(changes, vec![(1, true), (2, false)]);
/// ```
#[must_use]
pub fn changed_selections(before: &[bool], after: &[usize]) -> Vec<(usize, bool)> {
    before
        .iter()
        .enumerate()
        .filter_map(|(i, was)| {
            let now = after.contains(&i);
            (now != *was).then_some((i, now))
        })
        .collect()
}
