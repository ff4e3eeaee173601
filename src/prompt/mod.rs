//! Interactive questions
//!
//! Resolution, pre-flight checks and the port resolver only ever talk to a
//! [`Prompter`]; the terminal implementation is chosen at the edge.

mod scripted;
mod terminal;

pub use scripted::{ScriptedAnswer, ScriptedPrompter};
pub use terminal::TerminalPrompter;

use anyhow::Result;

pub trait Prompter {
    /// Yes/no question. A dismissed prompt counts as "no".
    fn ask_confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Pick one of `items`. `Ok(None)` means the user cancelled.
    fn ask_choice(&self, message: &str, items: &[String], default: Option<usize>)
        -> Result<Option<usize>>;
}
