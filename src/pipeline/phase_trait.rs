use super::context::PreflightContext;
use anyhow::Result;

/// One pre-flight check. An `Err` aborts the remaining checks and the run.
pub trait PreflightPhase {
    fn name(&self) -> &'static str;

    fn execute(&self, context: &mut PreflightContext<'_>) -> Result<()>;
}
