pub mod commands;
pub mod forward;
pub mod handlers;

pub use commands::CliArgs;
pub use forward::{parse_args, partition, Partition};
pub use handlers::{handle_run, launch, plan, LaunchOutcome, LaunchPlan, LaunchRequest};
