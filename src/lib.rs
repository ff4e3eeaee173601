//! unirun - universal development launcher for JavaScript projects
//!
//! Given a project directory, unirun works out which package manager governs
//! it and which script or command to run for the requested mode, runs
//! pre-flight checks, then launches the command.
//!
//! # Flow
//!
//! 1. [`manifest`], [`config`] and [`stack`] read the project: `package.json`,
//!    an optional `.unirunrc`, lockfiles and monorepo markers.
//! 2. [`resolve`] picks the target: user config, then monorepo delegation,
//!    then manifest scripts, then framework conventions.
//! 3. [`pipeline`] offers to install dependencies, create `.env` and settle a
//!    port conflict (see [`port`]).
//! 4. [`exec`] runs the optional build target, then the main target.
//!
//! Every side effect goes through a capability trait ([`fs::FileSystem`],
//! [`prompt::Prompter`], [`process::ProcessRunner`], [`port::PortProbe`]) so the
//! whole flow runs against fakes in tests.
//!
//! ```no_run
//! use unirun::cli::{launch, LaunchRequest};
//! use unirun::fs::RealFileSystem;
//! use unirun::pipeline::Services;
//! use unirun::port::TcpPortProbe;
//! use unirun::process::SystemProcessRunner;
//! use unirun::progress::ConsoleHandler;
//! use unirun::prompt::TerminalPrompter;
//! use unirun::stack::RunMode;
//!
//! let services = Services {
//!     fs: &RealFileSystem::new(),
//!     prompter: &TerminalPrompter::new(),
//!     runner: &SystemProcessRunner::new(),
//!     probe: &TcpPortProbe::new(),
//!     progress: &ConsoleHandler,
//! };
//! launch(&LaunchRequest::new("/path/to/app", RunMode::Dev), services)?;
//! # Ok::<(), unirun::LaunchError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod fs;
pub mod manifest;
pub mod pipeline;
pub mod port;
pub mod process;
pub mod progress;
pub mod prompt;
pub mod resolve;
pub mod stack;
pub mod util;

pub use config::{ConfigError, UserConfig};
pub use error::LaunchError;
pub use manifest::ManifestView;
pub use pipeline::{Pipeline, PipelineResult};
pub use resolve::{resolve, resolve_interactive, Resolution, ResolvedTarget};
pub use stack::{MonorepoTool, PackageManager, RunMode};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
