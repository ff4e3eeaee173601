//! Turborepo orchestrator (Vercel)

use super::{MonorepoOrchestrator, MonorepoTool};

pub struct TurborepoOrchestrator;

impl MonorepoOrchestrator for TurborepoOrchestrator {
    fn id(&self) -> MonorepoTool {
        MonorepoTool::Turbo
    }

    fn config_files(&self) -> &[&str] {
        &["turbo.json"]
    }

    fn run_command(&self, script: &str) -> String {
        format!("turbo run {}", script)
    }
}
