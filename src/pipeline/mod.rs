//! Pre-flight checks
//!
//! Before a target launches, the pipeline makes sure dependencies are
//! installed, offers to create `.env` from an example file, and settles port
//! conflicts for the port the command names. Phases run in a fixed order and
//! the first error aborts the run.

pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;

pub use context::{PreflightContext, Services};
pub use orchestrator::{Pipeline, PipelineResult};
pub use phase_trait::PreflightPhase;
