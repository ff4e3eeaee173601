use super::{Invocation, ProcessRunner};
use anyhow::{anyhow, bail, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Records every invocation instead of spawning it.
///
/// `run` answers with queued exit codes (0 once the queue is empty);
/// `capture` answers with queued stdout per program and fails for programs
/// with nothing queued, like a command that found nothing.
pub struct RecordingProcessRunner {
    invocations: Mutex<Vec<Invocation>>,
    exit_codes: Mutex<VecDeque<Result<i32, String>>>,
    outputs: Mutex<HashMap<String, VecDeque<String>>>,
    captures: Mutex<Vec<(String, Vec<String>)>>,
}

impl RecordingProcessRunner {
    pub fn new() -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            exit_codes: Mutex::new(VecDeque::new()),
            outputs: Mutex::new(HashMap::new()),
            captures: Mutex::new(Vec::new()),
        }
    }

    pub fn push_exit_code(&self, code: i32) {
        self.exit_codes.lock().unwrap().push_back(Ok(code));
    }

    pub fn push_spawn_error(&self, message: impl Into<String>) {
        self.exit_codes.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn add_output(&self, program: impl Into<String>, stdout: impl Into<String>) {
        self.outputs
            .lock()
            .unwrap()
            .entry(program.into())
            .or_default()
            .push_back(stdout.into());
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Command lines passed to `run`, rendered as strings
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(|inv| inv.to_string())
            .collect()
    }

    /// `(program, args)` pairs passed to `capture`
    pub fn captures(&self) -> Vec<(String, Vec<String>)> {
        self.captures.lock().unwrap().clone()
    }
}

impl Default for RecordingProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for RecordingProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        self.invocations.lock().unwrap().push(invocation.clone());
        match self.exit_codes.lock().unwrap().pop_front() {
            Some(Ok(code)) => Ok(code),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(0),
        }
    }

    fn capture(&self, program: &str, args: &[String]) -> Result<String> {
        self.captures
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        match self
            .outputs
            .lock()
            .unwrap()
            .get_mut(program)
            .and_then(|queue| queue.pop_front())
        {
            Some(stdout) => Ok(stdout),
            None => bail!("{} exited with status 1", program),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_runs_with_queued_codes() {
        let runner = RecordingProcessRunner::new();
        runner.push_exit_code(2);

        let inv = Invocation::new("npm", vec!["install".into()]);
        assert_eq!(runner.run(&inv).unwrap(), 2);
        assert_eq!(runner.run(&inv).unwrap(), 0);
        assert_eq!(runner.command_lines(), vec!["npm install", "npm install"]);
    }

    #[test]
    fn test_spawn_error() {
        let runner = RecordingProcessRunner::new();
        runner.push_spawn_error("not found");
        assert!(runner.run(&Invocation::new("bun", vec![])).is_err());
    }

    #[test]
    fn test_capture_outputs() {
        let runner = RecordingProcessRunner::new();
        runner.add_output("lsof", "1234\n");

        assert_eq!(runner.capture("lsof", &["-ti".into()]).unwrap(), "1234\n");
        assert!(runner.capture("lsof", &["-ti".into()]).is_err());
        assert_eq!(runner.captures().len(), 2);
    }
}
