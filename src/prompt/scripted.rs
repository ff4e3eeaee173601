use super::Prompter;
use anyhow::{anyhow, bail, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A canned answer for [`ScriptedPrompter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    Confirm(bool),
    Choice(Option<usize>),
    Fail(String),
}

/// Replays queued answers in order and records every question asked.
///
/// Asking a question with an empty queue, or a confirm when a choice was
/// queued, is an error.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<ScriptedAnswer>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn with_answers(answers: impl IntoIterator<Item = ScriptedAnswer>) -> Self {
        let prompter = Self::new();
        prompter.add_answers(answers);
        prompter
    }

    pub fn add_answers(&self, answers: impl IntoIterator<Item = ScriptedAnswer>) {
        self.answers.lock().unwrap().extend(answers);
    }

    /// Questions asked so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next_answer(&self, message: &str) -> Result<ScriptedAnswer> {
        self.asked.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("unexpected prompt: {}", message))
    }
}

impl Default for ScriptedPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_confirm(&self, message: &str, _default: bool) -> Result<bool> {
        match self.next_answer(message)? {
            ScriptedAnswer::Confirm(answer) => Ok(answer),
            ScriptedAnswer::Fail(reason) => bail!(reason),
            other => bail!("expected a confirm answer for '{}', got {:?}", message, other),
        }
    }

    fn ask_choice(
        &self,
        message: &str,
        items: &[String],
        _default: Option<usize>,
    ) -> Result<Option<usize>> {
        match self.next_answer(message)? {
            ScriptedAnswer::Choice(Some(index)) if index >= items.len() => {
                bail!("choice {} out of range for '{}'", index, message)
            }
            ScriptedAnswer::Choice(answer) => Ok(answer),
            ScriptedAnswer::Fail(reason) => bail!(reason),
            other => bail!("expected a choice answer for '{}', got {:?}", message, other),
        }
    }
}
