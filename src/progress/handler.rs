//! Progress handler trait and events

use std::sync::Mutex;

/// Events emitted while preparing and launching a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    PreflightStarted,
    PreflightPassed,

    DependenciesMissing { manager: String, empty_dir: bool },
    InstallStarted { manager: String },
    InstallSucceeded,

    EnvFileMissing { example: String },
    EnvFileCreated { example: String },

    PortInUse { port: u16 },
    PortSwitched { port: u16 },
    PortFreed { port: u16 },
    PortStillBusy { alternative: u16 },
    KillingProcess { pid: u32 },
    NoProcessOnPort { port: u16 },

    Building { manager: String },
    Launching { target: String },
    Running { command: String },
}

/// Receives progress events
pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

/// Keeps every event, for assertions
#[derive(Debug, Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressHandler for RecordingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
