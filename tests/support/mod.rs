use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn unirun_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_unirun"))
}

/// Project directory with `package.json` and a populated `node_modules`
#[allow(dead_code)]
pub fn create_project(package_json: &str) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("package.json"), package_json).expect("Failed to write package.json");
    fs::create_dir_all(dir.path().join("node_modules/.bin")).expect("Failed to create node_modules");
    dir
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Installs an executable shell script as `node_modules/.bin/<name>`
#[cfg(unix)]
#[allow(dead_code)]
pub fn install_local_bin(dir: &Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("node_modules/.bin").join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", script)).expect("Failed to write script");
    let mut perms = fs::metadata(&path).expect("Failed to stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to chmod script");
}

/// Runs unirun in `dir` with no terminal attached
#[allow(dead_code)]
pub fn run_unirun(dir: &Path, args: &[&str]) -> Output {
    Command::new(unirun_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("UNIRUN_LOG_LEVEL")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute unirun")
}

#[allow(dead_code)]
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[allow(dead_code)]
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
