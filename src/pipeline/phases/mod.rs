// Pre-flight phases, in the order the full pipeline runs them

#[path = "01_dependencies.rs"]
pub mod dependencies;
#[path = "02_env_file.rs"]
pub mod env_file;
#[path = "03_port.rs"]
pub mod port;

pub use dependencies::DependenciesPhase;
pub use env_file::EnvFilePhase;
pub use port::PortPhase;
