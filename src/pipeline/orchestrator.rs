use super::context::PreflightContext;
use super::phase_trait::PreflightPhase;
use super::phases::{DependenciesPhase, EnvFilePhase, PortPhase};
use crate::progress::ProgressEvent;
use std::time::Instant;
use tracing::{debug, error, info};

/// What the pre-flight checks decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineResult {
    pub should_continue: bool,
    pub modified_port: Option<u16>,
}

impl PipelineResult {
    pub fn proceed(modified_port: Option<u16>) -> Self {
        Self {
            should_continue: true,
            modified_port,
        }
    }

    pub fn abort() -> Self {
        Self {
            should_continue: false,
            modified_port: None,
        }
    }
}

/// Runs pre-flight phases strictly in order
pub struct Pipeline {
    phases: Vec<Box<dyn PreflightPhase>>,
    announce: bool,
}

impl Pipeline {
    /// Dependencies, env file, then port
    pub fn full() -> Self {
        Self {
            phases: vec![
                Box::new(DependenciesPhase),
                Box::new(EnvFilePhase),
                Box::new(PortPhase),
            ],
            announce: true,
        }
    }

    /// Dependencies and env file only, for runs a monorepo tool takes over
    pub fn minimal() -> Self {
        Self {
            phases: vec![Box::new(DependenciesPhase), Box::new(EnvFilePhase)],
            announce: false,
        }
    }

    pub fn phase_names(&self) -> Vec<&'static str> {
        self.phases.iter().map(|phase| phase.name()).collect()
    }

    pub fn run(&self, context: &mut PreflightContext<'_>) -> PipelineResult {
        let start = Instant::now();
        let progress = context.services.progress;
        info!("Starting pre-flight checks for: {}", context.root().display());

        if self.announce {
            progress.on_progress(&ProgressEvent::PreflightStarted);
        }

        for phase in &self.phases {
            info!("Phase: {}", phase.name());

            if let Err(e) = phase.execute(context) {
                error!("Pre-flight check failed in {}: {:#}", phase.name(), e);
                return PipelineResult::abort();
            }

            debug!("Phase {} complete", phase.name());
        }

        if self.announce {
            progress.on_progress(&ProgressEvent::PreflightPassed);
        }
        info!("Pre-flight checks complete in {:?}", start.elapsed());

        PipelineResult::proceed(context.modified_port)
    }
}
