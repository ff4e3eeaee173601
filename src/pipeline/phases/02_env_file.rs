use crate::pipeline::context::PreflightContext;
use crate::pipeline::phase_trait::PreflightPhase;
use crate::progress::ProgressEvent;
use anyhow::Result;
use tracing::{debug, warn};

pub const ENV_FILE: &str = ".env";

/// Example files, checked in this order
pub const ENV_EXAMPLES: &[&str] = &[".env.example", ".env.template", "env.example"];

/// Offers to create `.env` from an example file
pub struct EnvFilePhase;

impl PreflightPhase for EnvFilePhase {
    fn name(&self) -> &'static str {
        "EnvFilePhase"
    }

    fn execute(&self, context: &mut PreflightContext<'_>) -> Result<()> {
        let services = context.services;
        let env_path = context.root().join(ENV_FILE);
        if services.fs.exists(&env_path) {
            debug!("{} present", env_path.display());
            return Ok(());
        }

        let Some(example) = ENV_EXAMPLES
            .iter()
            .copied()
            .find(|name| services.fs.is_file(&context.root().join(name)))
        else {
            return Ok(());
        };

        services.progress.on_progress(&ProgressEvent::EnvFileMissing {
            example: example.to_string(),
        });

        let create = services
            .prompter
            .ask_confirm(&format!("Create .env from {}?", example), true)?;
        if !create {
            warn!("Skipping .env creation. The app may require environment variables.");
            return Ok(());
        }

        match services.fs.copy(&context.root().join(example), &env_path) {
            Ok(()) => services.progress.on_progress(&ProgressEvent::EnvFileCreated {
                example: example.to_string(),
            }),
            Err(e) => warn!("Failed to create .env: {:#}", e),
        }
        Ok(())
    }
}
