//! Terminal presentation: colour theme and interactive prompts.
//!
//! - [`theme`] — [`Theme`] presentation context and width helpers
//! - [`prompt`] — [`Prompter`] abstraction over `dialoguer`
pub mod prompt;
pub mod theme;

pub use prompt::{DialoguerPrompter, Prompter};
pub use theme::Theme;
