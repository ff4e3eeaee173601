use super::Prompter;
use anyhow::{bail, Context, Result};
use dialoguer::{Confirm, Select};
use tracing::info;

/// Prompts on the controlling terminal.
///
/// Without a terminal on stdin, confirmations take their default and choices
/// take their default if they have one. A choice without a default fails
/// rather than guessing.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            interactive: atty::is(atty::Stream::Stdin),
        }
    }

    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask_confirm(&self, message: &str, default: bool) -> Result<bool> {
        if !self.interactive {
            info!("{} [non-interactive, answering {}]", message, if default { "yes" } else { "no" });
            return Ok(default);
        }

        let answer = Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact_opt()
            .context("Failed to read confirmation")?;
        Ok(answer.unwrap_or(false))
    }

    fn ask_choice(
        &self,
        message: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        if !self.interactive {
            return match default {
                Some(index) if index < items.len() => {
                    info!("{} [non-interactive, choosing {}]", message, items[index]);
                    Ok(Some(index))
                }
                _ => bail!("'{}' needs an answer, but no terminal is attached", message),
            };
        }

        let mut select = Select::new().with_prompt(message).items(items);
        if let Some(index) = default {
            select = select.default(index);
        }
        select.interact_opt().context("Failed to read selection")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_confirm_uses_default() {
        let prompter = TerminalPrompter::non_interactive();
        assert!(prompter.ask_confirm("Install?", true).unwrap());
        assert!(!prompter.ask_confirm("Install?", false).unwrap());
    }

    #[test]
    fn test_non_interactive_choice_with_default() {
        let prompter = TerminalPrompter::non_interactive();
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(prompter.ask_choice("Pick", &items, Some(1)).unwrap(), Some(1));
    }

    #[test]
    fn test_non_interactive_choice_without_default_fails() {
        let prompter = TerminalPrompter::non_interactive();
        let items = vec!["dev".to_string(), "start".to_string()];
        assert!(prompter.ask_choice("Pick", &items, None).is_err());
        assert!(prompter.ask_choice("Pick", &items, Some(5)).is_err());
    }
}
