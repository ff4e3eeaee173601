//! Project stack detection: run modes, package managers, monorepo
//! orchestrators and framework heuristics.
//!
//! Every identifier is a closed enum defined with [`define_id_enum!`], so the
//! detection order of each table is explicit in code and testable.

#[macro_use]
pub mod id_enum_macro;

pub mod framework;
pub mod framework_id;
pub mod mode;
pub mod orchestrator;
pub mod package_manager;

pub use framework::{detect_framework, framework_command, FrameworkEntry, FrameworkMatch};
pub use framework_id::FrameworkId;
pub use mode::RunMode;
pub use orchestrator::{MonorepoOrchestrator, MonorepoTool};
pub use package_manager::PackageManager;
