//! Console progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::debug;

/// Prints one human-readable line per event on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleHandler;

impl ConsoleHandler {
    pub fn render(event: &ProgressEvent) -> String {
        match event {
            ProgressEvent::PreflightStarted => "Running pre-flight checks...".to_string(),
            ProgressEvent::PreflightPassed => "All pre-flight checks passed!".to_string(),
            ProgressEvent::DependenciesMissing { empty_dir, .. } => {
                if *empty_dir {
                    "node_modules exists but is empty.".to_string()
                } else {
                    "node_modules is missing.".to_string()
                }
            }
            ProgressEvent::InstallStarted { manager } => {
                format!("Installing dependencies with {}...", manager)
            }
            ProgressEvent::InstallSucceeded => "Dependencies installed successfully!".to_string(),
            ProgressEvent::EnvFileMissing { example } => {
                format!("No .env file found, but {} exists.", example)
            }
            ProgressEvent::EnvFileCreated { example } => format!(
                "Created .env from {}. Remember to update it with your actual values!",
                example
            ),
            ProgressEvent::PortInUse { port } => format!("Port {} is already in use.", port),
            ProgressEvent::PortSwitched { port } => format!("Using port {} instead.", port),
            ProgressEvent::PortFreed { port } => format!("Port {} is now available.", port),
            ProgressEvent::PortStillBusy { alternative } => format!(
                "Port still in use. Using port {} instead.",
                alternative
            ),
            ProgressEvent::KillingProcess { pid } => format!("Killing process {}...", pid),
            ProgressEvent::NoProcessOnPort { port } => {
                format!("No process found using port {}.", port)
            }
            ProgressEvent::Building { manager } => format!("Building with {}...", manager),
            ProgressEvent::Launching { target } => format!("Launching {}...", target),
            ProgressEvent::Running { command } => format!("> {}", command),
        }
    }
}

impl ProgressHandler for ConsoleHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        debug!(?event, "progress");
        println!("{}", Self::render(event));
    }
}
