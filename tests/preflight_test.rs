//! Pre-flight pipeline against a real project directory

use std::fs;
use tempfile::TempDir;
use unirun::fs::RealFileSystem;
use unirun::pipeline::{Pipeline, PipelineResult, PreflightContext, Services};
use unirun::port::ScriptedPortProbe;
use unirun::process::RecordingProcessRunner;
use unirun::progress::NoOpHandler;
use unirun::prompt::{ScriptedAnswer, ScriptedPrompter};
use unirun::stack::PackageManager;

struct Harness {
    dir: TempDir,
    fs: RealFileSystem,
    prompter: ScriptedPrompter,
    runner: RecordingProcessRunner,
    probe: ScriptedPortProbe,
}

impl Harness {
    fn new(probe: ScriptedPortProbe) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        Self {
            dir,
            fs: RealFileSystem::new(),
            prompter: ScriptedPrompter::new(),
            runner: RecordingProcessRunner::new(),
            probe,
        }
    }

    fn services(&self) -> Services<'_> {
        Services {
            fs: &self.fs,
            prompter: &self.prompter,
            runner: &self.runner,
            probe: &self.probe,
            progress: &NoOpHandler,
        }
    }

    fn run(&self, manager: PackageManager, script: &str) -> PipelineResult {
        let mut context = PreflightContext::new(self.dir.path(), manager, self.services())
            .with_script(Some(script));
        Pipeline::full().run(&mut context)
    }
}

#[test]
fn test_fresh_checkout() {
    let harness = Harness::new(ScriptedPortProbe::with_answers([Ok(5174)]));
    fs::write(harness.dir.path().join(".env.example"), "SECRET=\n").unwrap();
    harness.prompter.add_answers([
        ScriptedAnswer::Confirm(true),
        ScriptedAnswer::Confirm(true),
        ScriptedAnswer::Choice(Some(0)),
    ]);

    let result = harness.run(PackageManager::Bun, "vite --port 5173");

    assert_eq!(result, PipelineResult::proceed(Some(5174)));
    assert_eq!(harness.runner.command_lines(), vec!["bun install"]);
    assert_eq!(
        fs::read_to_string(harness.dir.path().join(".env")).unwrap(),
        "SECRET=\n"
    );
    assert_eq!(harness.prompter.remaining_answers(), 0);
}

#[test]
fn test_ready_project_asks_nothing() {
    let harness = Harness::new(ScriptedPortProbe::new());
    fs::create_dir_all(harness.dir.path().join("node_modules/react")).unwrap();
    fs::write(harness.dir.path().join(".env"), "A=1\n").unwrap();
    fs::write(harness.dir.path().join(".env.example"), "A=\n").unwrap();

    let result = harness.run(PackageManager::Npm, "PORT=3000 node server.js");

    assert_eq!(result, PipelineResult::proceed(None));
    assert!(harness.prompter.asked().is_empty());
    assert_eq!(harness.probe.probed(), vec![3000]);
}

#[test]
fn test_existing_env_is_never_overwritten() {
    let harness = Harness::new(ScriptedPortProbe::new());
    fs::create_dir_all(harness.dir.path().join("node_modules/react")).unwrap();
    fs::write(harness.dir.path().join(".env"), "KEEP=1\n").unwrap();
    fs::write(harness.dir.path().join(".env.template"), "KEEP=\n").unwrap();

    harness.run(PackageManager::Npm, "node server.js");

    assert_eq!(
        fs::read_to_string(harness.dir.path().join(".env")).unwrap(),
        "KEEP=1\n"
    );
}

#[test]
fn test_install_failure_aborts_before_port_check() {
    let harness = Harness::new(ScriptedPortProbe::new());
    harness.prompter.add_answers([ScriptedAnswer::Confirm(true)]);
    harness.runner.push_exit_code(1);

    let result = harness.run(PackageManager::Yarn, "next dev -p 3000");

    assert_eq!(result, PipelineResult::abort());
    assert!(harness.probe.probed().is_empty());
}

#[test]
fn test_busy_port_continue_anyway() {
    let harness = Harness::new(ScriptedPortProbe::with_answers([Ok(8081)]));
    fs::create_dir_all(harness.dir.path().join("node_modules/react")).unwrap();
    harness.prompter.add_answers([ScriptedAnswer::Choice(Some(2))]);

    let result = harness.run(PackageManager::Npm, "http-server --port 8080");

    assert_eq!(result, PipelineResult::proceed(None));
}
