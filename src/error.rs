use crate::stack::RunMode;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can end a launch early
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No package.json found in {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Failed to parse {}: {message}", .path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("No suitable {mode} script or framework command found")]
    NoTarget { mode: RunMode },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Pre-flight checks failed")]
    PreflightAborted,

    #[error("Command is empty")]
    EmptyCommand,

    #[error("Failed to start {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("{program} exited with status {code}")]
    ChildFailed { program: String, code: i32 },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Invalid project directory {}: {source}", .path.display())]
    ProjectDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Cancelled => 0,
            _ => 1,
        }
    }

    /// The child already reported on its own stderr; nothing to add
    pub fn is_silent(&self) -> bool {
        matches!(self, LaunchError::ChildFailed { .. })
    }
}
