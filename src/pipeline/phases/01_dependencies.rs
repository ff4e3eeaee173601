use crate::pipeline::context::PreflightContext;
use crate::pipeline::phase_trait::PreflightPhase;
use crate::process::Invocation;
use crate::progress::ProgressEvent;
use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

pub const DEPENDENCY_DIR: &str = "node_modules";

/// Offers `<manager> install` when `node_modules` is missing or empty
pub struct DependenciesPhase;

impl PreflightPhase for DependenciesPhase {
    fn name(&self) -> &'static str {
        "DependenciesPhase"
    }

    fn execute(&self, context: &mut PreflightContext<'_>) -> Result<()> {
        if !context.has_manifest {
            debug!("No manifest, skipping dependency check");
            return Ok(());
        }

        let services = context.services;
        let store = context.root().join(DEPENDENCY_DIR);

        let empty_dir = if services.fs.is_dir(&store) {
            if !services.fs.is_empty_dir(&store)? {
                debug!("{} is populated", store.display());
                return Ok(());
            }
            true
        } else {
            false
        };

        let manager = context.manager;
        services.progress.on_progress(&ProgressEvent::DependenciesMissing {
            manager: manager.to_string(),
            empty_dir,
        });

        let install = services
            .prompter
            .ask_confirm(&format!("Would you like to run '{} install'?", manager), true)?;
        if !install {
            warn!("Skipping dependency installation. The app may not start correctly.");
            return Ok(());
        }

        services.progress.on_progress(&ProgressEvent::InstallStarted {
            manager: manager.to_string(),
        });

        let invocation =
            Invocation::new(manager.program(), manager.install_args()).in_dir(context.root());
        let code = services
            .runner
            .run(&invocation)
            .with_context(|| format!("Failed to run {}", invocation))?;
        if code != 0 {
            bail!("Failed to install dependencies: {} exited with status {}", invocation, code);
        }

        services.progress.on_progress(&ProgressEvent::InstallSucceeded);
        Ok(())
    }
}
