//! Nx orchestrator (Nrwl)

use super::{MonorepoOrchestrator, MonorepoTool};

pub struct NxOrchestrator;

impl MonorepoOrchestrator for NxOrchestrator {
    fn id(&self) -> MonorepoTool {
        MonorepoTool::Nx
    }

    fn config_files(&self) -> &[&str] {
        &["nx.json"]
    }

    fn run_command(&self, script: &str) -> String {
        format!("nx run {}", script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command() {
        assert_eq!(NxOrchestrator.run_command("start"), "nx run start");
    }
}
