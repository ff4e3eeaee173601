//! Command resolution: which script or command a run mode launches.

mod resolver;
mod target;

pub use resolver::{matching_scripts, resolve, resolve_interactive, Resolution};
pub use target::{Origin, ResolvedTarget, TargetKind};
