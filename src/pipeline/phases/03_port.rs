use crate::pipeline::context::PreflightContext;
use crate::pipeline::phase_trait::PreflightPhase;
use crate::port::{extract_port, PortResolver};
use anyhow::Result;
use tracing::debug;

/// Resolves a conflict on the port the script names
pub struct PortPhase;

impl PreflightPhase for PortPhase {
    fn name(&self) -> &'static str {
        "PortPhase"
    }

    fn execute(&self, context: &mut PreflightContext<'_>) -> Result<()> {
        let Some(desired) = context.script.as_deref().and_then(extract_port) else {
            debug!("No port found in script, skipping port check");
            return Ok(());
        };

        let services = context.services;
        let resolver = PortResolver::new(
            services.probe,
            services.prompter,
            services.runner,
            services.progress,
        );
        let port = resolver.ensure_available(desired);
        if port != desired {
            debug!("Port changed from {} to {}", desired, port);
            context.modified_port = Some(port);
        }
        Ok(())
    }
}
