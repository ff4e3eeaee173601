//! Pre-flight context and the capabilities it runs against

use std::path::{Path, PathBuf};

use crate::fs::FileSystem;
use crate::port::PortProbe;
use crate::process::ProcessRunner;
use crate::progress::ProgressHandler;
use crate::prompt::Prompter;
use crate::stack::PackageManager;

/// Every side-effecting capability a launch needs
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub fs: &'a dyn FileSystem,
    pub prompter: &'a dyn Prompter,
    pub runner: &'a dyn ProcessRunner,
    pub probe: &'a dyn PortProbe,
    pub progress: &'a dyn ProgressHandler,
}

/// State threaded through the pre-flight phases
pub struct PreflightContext<'a> {
    /// Project root
    pub root: PathBuf,

    /// Manager used for `install`, fixed for the whole run
    pub manager: PackageManager,

    /// Whether the project has a `package.json`
    pub has_manifest: bool,

    /// Text of the command about to run, scanned for a port
    pub script: Option<String>,

    pub services: Services<'a>,

    /// Port chosen by the port phase when it differs from the script's
    pub modified_port: Option<u16>,
}

impl<'a> PreflightContext<'a> {
    pub fn new(root: impl Into<PathBuf>, manager: PackageManager, services: Services<'a>) -> Self {
        Self {
            root: root.into(),
            manager,
            has_manifest: true,
            script: None,
            services,
            modified_port: None,
        }
    }

    pub fn with_script(mut self, script: Option<impl Into<String>>) -> Self {
        self.script = script.map(Into::into);
        self
    }

    pub fn without_manifest(mut self) -> Self {
        self.has_manifest = false;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
