use super::kill::{KillOutcome, PortKiller};
use super::probe::PortProbe;
use crate::process::ProcessRunner;
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::prompt::Prompter;
use anyhow::{anyhow, Result};
use tracing::{debug, warn};

const USE_ALTERNATIVE: usize = 0;
const KILL_PROCESS: usize = 1;

/// Settles port conflicts before launch.
pub struct PortResolver<'a> {
    probe: &'a dyn PortProbe,
    prompter: &'a dyn Prompter,
    killer: PortKiller<'a>,
    progress: &'a dyn ProgressHandler,
}

impl<'a> PortResolver<'a> {
    pub fn new(
        probe: &'a dyn PortProbe,
        prompter: &'a dyn Prompter,
        runner: &'a dyn ProcessRunner,
        progress: &'a dyn ProgressHandler,
    ) -> Self {
        Self::with_killer(probe, prompter, PortKiller::new(runner), progress)
    }

    pub fn with_killer(
        probe: &'a dyn PortProbe,
        prompter: &'a dyn Prompter,
        killer: PortKiller<'a>,
        progress: &'a dyn ProgressHandler,
    ) -> Self {
        Self {
            probe,
            prompter,
            killer,
            progress,
        }
    }

    /// Port to launch on. Never fails: any error keeps `desired`.
    pub fn ensure_available(&self, desired: u16) -> u16 {
        match self.resolve(desired) {
            Ok(port) => port,
            Err(e) => {
                warn!("Error checking port availability: {:#}", e);
                desired
            }
        }
    }

    fn resolve(&self, desired: u16) -> Result<u16> {
        let alternative = self.probe.available_from(desired)?;
        if alternative == desired {
            debug!("Port {} is available", desired);
            return Ok(desired);
        }

        self.progress
            .on_progress(&ProgressEvent::PortInUse { port: desired });

        let choices = vec![
            format!("Use port {} instead", alternative),
            "Try to kill the process using the port".to_string(),
            "Continue anyway (may fail)".to_string(),
        ];
        let choice = self
            .prompter
            .ask_choice("What would you like to do?", &choices, Some(USE_ALTERNATIVE))
            .map_err(|e| anyhow!("Port prompt failed: {:#}", e))?;

        match choice {
            Some(USE_ALTERNATIVE) => {
                self.progress
                    .on_progress(&ProgressEvent::PortSwitched { port: alternative });
                Ok(alternative)
            }
            Some(KILL_PROCESS) => self.kill_and_recheck(desired, alternative),
            _ => {
                debug!("Continuing with busy port {}", desired);
                Ok(desired)
            }
        }
    }

    fn kill_and_recheck(&self, desired: u16, alternative: u16) -> Result<u16> {
        match self.killer.attempt_free_port(desired) {
            KillOutcome::Killed(pid) => {
                self.progress
                    .on_progress(&ProgressEvent::KillingProcess { pid });
            }
            KillOutcome::NotFound => {
                self.progress
                    .on_progress(&ProgressEvent::NoProcessOnPort { port: desired });
            }
            KillOutcome::Failed(message) => {
                debug!("Kill attempt failed: {}", message);
            }
        }

        if self.probe.available_from(desired)? == desired {
            self.progress
                .on_progress(&ProgressEvent::PortFreed { port: desired });
            Ok(desired)
        } else {
            self.progress
                .on_progress(&ProgressEvent::PortStillBusy { alternative });
            Ok(alternative)
        }
    }
}
