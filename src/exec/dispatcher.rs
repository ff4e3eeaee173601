use crate::error::LaunchError;
use crate::process::{Invocation, ProcessRunner};
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::resolve::{ResolvedTarget, TargetKind};
use crate::stack::PackageManager;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Launches resolved targets through the chosen package manager
pub struct Dispatcher<'a> {
    manager: PackageManager,
    root: PathBuf,
    runner: &'a dyn ProcessRunner,
    progress: &'a dyn ProgressHandler,
    env: Vec<(String, String)>,
    port: Option<u16>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        manager: PackageManager,
        root: impl Into<PathBuf>,
        runner: &'a dyn ProcessRunner,
        progress: &'a dyn ProgressHandler,
    ) -> Self {
        Self {
            manager,
            root: root.into(),
            runner,
            progress,
            env: Vec::new(),
            port: None,
        }
    }

    /// Extra environment for every child
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Serve on `port`: sets `PORT` and replaces any port flag with `--port <port>`.
    ///
    /// Only tokens unirun controls are rewritten. A script's own body stays
    /// as written in `package.json`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self.with_env("PORT", port.to_string())
    }

    /// Child process for `target`, without running it.
    pub fn invocation(
        &self,
        target: &ResolvedTarget,
        extra_args: &[String],
    ) -> Result<Invocation, LaunchError> {
        let invocation = match target.kind() {
            TargetKind::Script => {
                let forwarded = match self.port {
                    Some(port) => with_port_override(extra_args, port),
                    None => extra_args.to_vec(),
                };
                Invocation::new(
                    self.manager.program(),
                    self.manager.run_args(target.value(), &forwarded),
                )
            }
            TargetKind::Command => {
                let mut parts = target.value().split_whitespace().map(str::to_string);
                let program = parts.next().ok_or(LaunchError::EmptyCommand)?;
                let mut args: Vec<String> = parts.collect();
                args.extend(extra_args.iter().cloned());
                if let Some(port) = self.port {
                    args = with_port_override(&args, port);
                }
                Invocation::new(program, args).prefer_local()
            }
        };

        let invocation = self
            .env
            .iter()
            .fold(invocation.in_dir(&self.root), |inv, (key, value)| {
                inv.with_env(key.clone(), value.clone())
            });
        Ok(invocation)
    }

    /// Runs `target` to completion. A non-zero exit is an error.
    pub fn run(&self, target: &ResolvedTarget, extra_args: &[String]) -> Result<(), LaunchError> {
        let invocation = self.invocation(target, extra_args)?;
        self.progress.on_progress(&ProgressEvent::Running {
            command: invocation.to_string(),
        });

        let code = self
            .runner
            .run(&invocation)
            .map_err(|e| LaunchError::Spawn {
                program: invocation.program.clone(),
                message: format!("{:#}", e),
            })?;

        debug!("{} exited with {}", invocation.program, code);
        if code != 0 {
            return Err(LaunchError::ChildFailed {
                program: invocation.program,
                code,
            });
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// `args` with `--port <port>` in place of any existing port flag.
pub fn with_port_override(args: &[String], port: u16) -> Vec<String> {
    let mut rewritten = Vec::with_capacity(args.len() + 2);
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--port" | "-p" => {
                // value follows as its own argument
                iter.next();
            }
            a if a.starts_with("--port=") || a.starts_with("-p=") => {}
            _ => rewritten.push(arg.clone()),
        }
    }

    rewritten.push("--port".to_string());
    rewritten.push(port.to_string());
    rewritten
}
