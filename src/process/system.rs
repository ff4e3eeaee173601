use super::{Invocation, ProcessRunner};
use anyhow::{bail, Context, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Spawns real processes with `std::process`
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// `PATH` with `<dir>/node_modules/.bin` in front
fn local_bin_path(dir: &Path) -> Result<OsString> {
    let local_bin = dir.join("node_modules").join(".bin");
    let mut paths = vec![local_bin];
    if let Some(existing) = env::var_os("PATH") {
        paths.extend(env::split_paths(&existing));
    }
    env::join_paths(paths).context("Failed to build PATH")
}

const DEFAULT_PATHEXT: &str = ".COM;.EXE;.BAT;.CMD";

/// Extensions tried for a bare program name, from a `PATHEXT` value
fn path_extensions(pathext: Option<&OsStr>) -> Vec<String> {
    pathext
        .and_then(OsStr::to_str)
        .unwrap_or(DEFAULT_PATHEXT)
        .split(';')
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}

/// First `<dir>/<program><ext>` that exists. Names with a directory or an
/// extension of their own are left to the OS.
fn find_program(program: &str, dirs: &[PathBuf], extensions: &[String]) -> Option<PathBuf> {
    let name = Path::new(program);
    if name.extension().is_some() || name.components().count() != 1 {
        return None;
    }
    dirs.iter().find_map(|dir| {
        extensions
            .iter()
            .map(|ext| dir.join(format!("{}{}", program, ext)))
            .find(|candidate| candidate.is_file())
    })
}

/// What to hand `Command::new`. On Windows `npm`, `yarn`, `pnpm` and local
/// binaries are `.cmd` shims that a bare name never reaches.
fn spawn_target(program: &str, search_path: Option<&OsStr>) -> OsString {
    if !cfg!(windows) {
        return program.into();
    }
    let dirs: Vec<PathBuf> = search_path.map(|path| env::split_paths(path)).into_iter().flatten().collect();
    let extensions = path_extensions(env::var_os("PATHEXT").as_deref());
    match find_program(program, &dirs, &extensions) {
        Some(found) => {
            debug!("Resolved {} to {}", program, found.display());
            found.into_os_string()
        }
        None => program.into(),
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        debug!("Spawning: {}", invocation);

        let local_path = if invocation.prefer_local {
            let base = match &invocation.cwd {
                Some(cwd) => cwd.clone(),
                None => env::current_dir().context("Failed to read current directory")?,
            };
            Some(local_bin_path(&base)?)
        } else {
            None
        };
        let search_path = local_path.clone().or_else(|| env::var_os("PATH"));

        let mut command = Command::new(spawn_target(&invocation.program, search_path.as_deref()));
        command
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &invocation.env {
            command.env(key, value);
        }
        if let Some(path) = local_path {
            command.env("PATH", path);
        }

        let status = command
            .status()
            .with_context(|| format!("Failed to spawn {}", invocation.program))?;

        match status.code() {
            Some(code) => Ok(code),
            None => {
                debug!("{} was terminated by a signal", invocation.program);
                Ok(1)
            }
        }
    }

    fn capture(&self, program: &str, args: &[String]) -> Result<String> {
        debug!("Capturing: {} {}", program, args.join(" "));

        let output = Command::new(spawn_target(program, env::var_os("PATH").as_deref()))
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to spawn {}", program))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
