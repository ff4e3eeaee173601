//! Monorepo orchestrator definitions
//!
//! Orchestrators run tasks across every package of a workspace. When one is
//! present at the project root, the launcher hands the requested script to it
//! instead of running the script in the root package.

use crate::fs::FileSystem;
use std::path::Path;
use tracing::debug;

/// Monorepo orchestrator trait
pub trait MonorepoOrchestrator: Send + Sync {
    fn id(&self) -> MonorepoTool;

    /// Configuration files that indicate this orchestrator is in use
    fn config_files(&self) -> &[&str];

    /// Literal command that runs `script` across the workspace
    fn run_command(&self, script: &str) -> String;
}

crate::define_id_enum! {
    /// Monorepo tool detected from a marker file at the project root
    MonorepoTool {
        Turbo => "turbo" : "Turborepo" | "turborepo",
        Nx => "nx" : "Nx",
    }
}

pub mod nx;
pub mod turborepo;

pub use nx::NxOrchestrator;
pub use turborepo::TurborepoOrchestrator;

/// Orchestrators in detection order
static ORCHESTRATORS: &[&dyn MonorepoOrchestrator] = &[&TurborepoOrchestrator, &NxOrchestrator];

impl MonorepoTool {
    pub fn orchestrator(&self) -> &'static dyn MonorepoOrchestrator {
        match self {
            MonorepoTool::Turbo => &TurborepoOrchestrator,
            MonorepoTool::Nx => &NxOrchestrator,
        }
    }

    /// Looks for orchestrator marker files at `root`
    pub fn detect<F: FileSystem + ?Sized>(fs: &F, root: &Path) -> Option<Self> {
        for orchestrator in ORCHESTRATORS {
            if let Some(marker) = orchestrator
                .config_files()
                .iter()
                .find(|file| fs.is_file(&root.join(file)))
            {
                debug!("Found {}, delegating to {}", marker, orchestrator.id());
                return Some(orchestrator.id());
            }
        }
        None
    }
}
