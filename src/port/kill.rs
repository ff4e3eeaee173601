use crate::process::{Invocation, ProcessRunner};
use regex::Regex;
use tracing::{debug, warn};

/// Process discovery flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillOutcome {
    Killed(u32),
    NotFound,
    Failed(String),
}

/// Finds and force-terminates whatever holds a port.
pub struct PortKiller<'a> {
    runner: &'a dyn ProcessRunner,
    platform: Platform,
}

impl<'a> PortKiller<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self::for_platform(runner, Platform::current())
    }

    pub fn for_platform(runner: &'a dyn ProcessRunner, platform: Platform) -> Self {
        Self { runner, platform }
    }

    /// Process id listening on `port`, if any. Clients connected to it are
    /// never returned.
    pub fn find_pid(&self, port: u16) -> Option<u32> {
        let result = match self.platform {
            Platform::Unix => self
                .runner
                .capture("lsof", &lsof_args(port))
                .map(|out| parse_lsof(&out)),
            Platform::Windows => self
                .runner
                .capture("netstat", &["-ano".to_string()])
                .map(|out| parse_netstat(&out, port)),
        };

        match result {
            Ok(pid) => pid,
            Err(e) => {
                // lsof exits non-zero when nothing matches
                debug!("Process lookup for port {} failed: {:#}", port, e);
                None
            }
        }
    }

    pub fn attempt_free_port(&self, port: u16) -> KillOutcome {
        let Some(pid) = self.find_pid(port) else {
            return KillOutcome::NotFound;
        };

        let invocation = match self.platform {
            Platform::Unix => Invocation::new("kill", vec!["-9".to_string(), pid.to_string()]),
            Platform::Windows => Invocation::new(
                "taskkill",
                vec!["/F".to_string(), "/PID".to_string(), pid.to_string()],
            ),
        };

        match self.runner.run(&invocation) {
            Ok(0) => KillOutcome::Killed(pid),
            Ok(code) => {
                warn!("{} exited with status {}", invocation.program, code);
                KillOutcome::Failed(format!("{} exited with status {}", invocation.program, code))
            }
            Err(e) => {
                warn!("Failed to kill process {}: {:#}", pid, e);
                KillOutcome::Failed(format!("{:#}", e))
            }
        }
    }
}

fn lsof_args(port: u16) -> Vec<String> {
    vec![
        "-ti".to_string(),
        format!("tcp:{}", port),
        "-sTCP:LISTEN".to_string(),
    ]
}

fn parse_lsof(output: &str) -> Option<u32> {
    output
        .lines()
        .map(str::trim)
        .find_map(|line| line.parse::<u32>().ok())
}

fn parse_netstat(output: &str, port: u16) -> Option<u32> {
    // local address column only, listening sockets only
    let pattern = Regex::new(&format!(r"^\s*TCP\s+\S+:{}\s+\S+\s+LISTENING\s", port)).ok()?;
    output
        .lines()
        .filter(|line| pattern.is_match(line))
        .find_map(|line| {
            line.split_whitespace()
                .last()
                .and_then(|token| token.parse::<u32>().ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RecordingProcessRunner;

    const NETSTAT: &str = "\
Active Connections

  Proto  Local Address          Foreign Address        State           PID
  TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       912
  TCP    0.0.0.0:30000          0.0.0.0:0              LISTENING       77
  TCP    127.0.0.1:51000        127.0.0.1:3000         ESTABLISHED     1111
  TCP    0.0.0.0:3000           0.0.0.0:0              LISTENING       4242
  TCP    127.0.0.1:3000         127.0.0.1:51000        ESTABLISHED     4242
  TCP    [::]:5173              [::]:0                 LISTENING       5150
";

    #[test]
    fn test_parse_lsof_takes_first_pid() {
        assert_eq!(parse_lsof("4242\n5151\n"), Some(4242));
        assert_eq!(parse_lsof(""), None);
    }

    #[test]
    fn test_parse_netstat_matches_listening_port() {
        assert_eq!(parse_netstat(NETSTAT, 3000), Some(4242));
        assert_eq!(parse_netstat(NETSTAT, 135), Some(912));
        assert_eq!(parse_netstat(NETSTAT, 5173), Some(5150));
        assert_eq!(parse_netstat(NETSTAT, 51000), None);
        assert_eq!(parse_netstat(NETSTAT, 8080), None);
    }

    #[test]
    fn test_unix_kill() {
        let runner = RecordingProcessRunner::new();
        runner.add_output("lsof", "4242\n");

        let killer = PortKiller::for_platform(&runner, Platform::Unix);
        assert_eq!(killer.attempt_free_port(3000), KillOutcome::Killed(4242));
        assert_eq!(
            runner.captures(),
            vec![(
                "lsof".to_string(),
                vec![
                    "-ti".to_string(),
                    "tcp:3000".to_string(),
                    "-sTCP:LISTEN".to_string()
                ]
            )]
        );
        assert_eq!(runner.command_lines(), vec!["kill -9 4242"]);
    }

    #[test]
    fn test_windows_kill() {
        let runner = RecordingProcessRunner::new();
        runner.add_output("netstat", NETSTAT);

        let killer = PortKiller::for_platform(&runner, Platform::Windows);
        assert_eq!(killer.attempt_free_port(3000), KillOutcome::Killed(4242));
        assert_eq!(runner.command_lines(), vec!["taskkill /F /PID 4242"]);
    }

    #[test]
    fn test_no_process_found() {
        let runner = RecordingProcessRunner::new();
        let killer = PortKiller::for_platform(&runner, Platform::Unix);

        assert_eq!(killer.attempt_free_port(3000), KillOutcome::NotFound);
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_kill_failure() {
        let runner = RecordingProcessRunner::new();
        runner.add_output("lsof", "4242\n");
        runner.push_exit_code(1);

        let killer = PortKiller::for_platform(&runner, Platform::Unix);
        assert!(matches!(killer.attempt_free_port(3000), KillOutcome::Failed(_)));
    }
}
