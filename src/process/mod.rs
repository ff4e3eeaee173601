//! Child process execution
//!
//! Installing dependencies, freeing ports and launching the resolved command
//! all go through a [`ProcessRunner`], so every decision above it can be tested
//! without spawning anything.

mod recording;
mod system;

pub use recording::RecordingProcessRunner;
pub use system::SystemProcessRunner;

use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

/// A fully described child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    /// Resolve the program against `<cwd>/node_modules/.bin` first
    pub prefer_local: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            cwd: None,
            env: Vec::new(),
            prefer_local: false,
        }
    }

    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn prefer_local(mut self) -> Self {
        self.prefer_local = true;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

pub trait ProcessRunner {
    /// Runs to completion with inherited standard streams and returns the exit
    /// code. `Err` means the process could not be started.
    fn run(&self, invocation: &Invocation) -> Result<i32>;

    /// Runs to completion and returns captured stdout. A non-zero exit is an
    /// error.
    fn capture(&self, program: &str, args: &[String]) -> Result<String>;
}
