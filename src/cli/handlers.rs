//! The launch flow behind the `unirun` command

use super::commands::CliArgs;
use crate::config::UserConfig;
use crate::error::LaunchError;
use crate::exec::Dispatcher;
use crate::fs::RealFileSystem;
use crate::manifest::ManifestView;
use crate::pipeline::{Pipeline, PreflightContext, Services};
use crate::port::TcpPortProbe;
use crate::process::SystemProcessRunner;
use crate::progress::{ConsoleHandler, ProgressEvent};
use crate::prompt::TerminalPrompter;
use crate::resolve::{resolve_interactive, Origin, ResolvedTarget};
use crate::stack::{MonorepoTool, PackageManager, RunMode};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};

/// What the user asked for, independent of how it was spelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub root: PathBuf,
    pub mode: RunMode,
    pub script: Option<String>,
    pub build: bool,
    pub dry_run: bool,
    pub extra_args: Vec<String>,
}

impl LaunchRequest {
    pub fn new(root: impl Into<PathBuf>, mode: RunMode) -> Self {
        Self {
            root: root.into(),
            mode,
            script: None,
            build: false,
            dry_run: false,
            extra_args: Vec::new(),
        }
    }

    /// Builds a request from parsed arguments, resolving the project directory.
    pub fn from_args(args: &CliArgs) -> Result<Self, LaunchError> {
        let requested = match &args.cwd {
            Some(dir) => dir.clone(),
            None => env::current_dir().map_err(|source| LaunchError::ProjectDir {
                path: PathBuf::from("."),
                source,
            })?,
        };
        let root = requested
            .canonicalize()
            .map_err(|source| LaunchError::ProjectDir {
                path: requested.clone(),
                source,
            })?;

        Ok(Self {
            root,
            mode: args.mode(),
            script: args.script.clone(),
            build: args.build,
            dry_run: args.dry_run,
            extra_args: args.extra_args.clone(),
        })
    }
}

/// Everything decided before anything runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub manager: PackageManager,
    pub monorepo: Option<MonorepoTool>,
    pub build: Option<ResolvedTarget>,
    pub main: ResolvedTarget,
    /// Text the main target executes, scanned for a port
    pub main_body: Option<String>,
    pub extra_args: Vec<String>,
}

impl LaunchPlan {
    /// Human-readable summary for `--dry-run`
    pub fn describe(&self) -> Vec<String> {
        let mut lines = vec![format!("Package manager: {}", self.manager)];
        if let Some(tool) = self.monorepo {
            lines.push(format!("Monorepo: {}", tool.display_name()));
        }
        if let Some(build) = &self.build {
            lines.push(format!("Build: {} (from {})", build, build.origin()));
        }
        lines.push(format!("Run: {} (from {})", self.main, self.main.origin()));
        if !self.extra_args.is_empty() {
            lines.push(format!("Arguments: {}", self.extra_args.join(" ")));
        }
        lines
    }
}

/// Result of a successful launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// `--dry-run`: the plan, nothing executed
    Planned(LaunchPlan),
    Completed,
}

/// Reads the project and resolves the targets to run.
pub fn plan(request: &LaunchRequest, services: Services<'_>) -> Result<LaunchPlan, LaunchError> {
    let root = &request.root;
    let manifest = ManifestView::load(services.fs, root)?;
    let config = UserConfig::load(services.fs, root);
    let manager = PackageManager::detect(services.fs, root, Some(&manifest));
    let monorepo = MonorepoTool::detect(services.fs, root);
    info!(
        "Project {}: manager={}, monorepo={:?}",
        root.display(),
        manager,
        monorepo
    );

    let main = match &request.script {
        Some(script) => ResolvedTarget::script(script.clone(), Origin::CommandLine),
        None => resolve_interactive(
            request.mode,
            &manifest,
            config.as_ref(),
            monorepo,
            services.prompter,
        )?,
    };

    let build = if request.build {
        Some(resolve_interactive(
            RunMode::Build,
            &manifest,
            config.as_ref(),
            monorepo,
            services.prompter,
        )?)
    } else {
        None
    };

    let main_body = main.body(&manifest).map(str::to_string);
    debug!("Main target {} body: {:?}", main, main_body);

    Ok(LaunchPlan {
        manager,
        monorepo,
        build,
        main,
        main_body,
        extra_args: request.extra_args.clone(),
    })
}

/// Plans, checks and runs the request.
pub fn launch(request: &LaunchRequest, services: Services<'_>) -> Result<LaunchOutcome, LaunchError> {
    let plan = plan(request, services)?;
    if request.dry_run {
        return Ok(LaunchOutcome::Planned(plan));
    }

    let (pipeline, script) = if plan.main.is_delegated() {
        (Pipeline::minimal(), None)
    } else {
        (Pipeline::full(), plan.main_body.clone())
    };
    let mut context =
        PreflightContext::new(&request.root, plan.manager, services).with_script(script);
    let result = pipeline.run(&mut context);
    if !result.should_continue {
        return Err(LaunchError::PreflightAborted);
    }

    let dispatcher = Dispatcher::new(plan.manager, &request.root, services.runner, services.progress);

    if let Some(build) = &plan.build {
        services.progress.on_progress(&ProgressEvent::Building {
            manager: plan.manager.to_string(),
        });
        dispatcher.run(build, &[])?;
    }

    let dispatcher = match result.modified_port {
        Some(port) => dispatcher.with_port(port),
        None => dispatcher,
    };

    services.progress.on_progress(&ProgressEvent::Launching {
        target: plan.main.value().to_string(),
    });
    dispatcher.run(&plan.main, &plan.extra_args)?;

    Ok(LaunchOutcome::Completed)
}

/// Runs the command against the real system and returns the exit status.
pub fn handle_run(args: &CliArgs) -> i32 {
    let fs = RealFileSystem::new();
    let prompter = TerminalPrompter::new();
    let runner = SystemProcessRunner::new();
    let probe = TcpPortProbe::new();
    let progress = ConsoleHandler;
    let services = Services {
        fs: &fs,
        prompter: &prompter,
        runner: &runner,
        probe: &probe,
        progress: &progress,
    };

    let outcome = LaunchRequest::from_args(args).and_then(|request| launch(&request, services));
    match outcome {
        Ok(LaunchOutcome::Planned(plan)) => {
            for line in plan.describe() {
                println!("{}", line);
            }
            0
        }
        Ok(LaunchOutcome::Completed) => 0,
        Err(LaunchError::Cancelled) => {
            println!("Operation cancelled.");
            LaunchError::Cancelled.exit_code()
        }
        Err(e) => {
            if !e.is_silent() {
                eprintln!("Error: {}", e);
            }
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::context::testing::Fakes;
    use crate::port::ScriptedPortProbe;
    use crate::prompt::ScriptedAnswer;
    use crate::stack::FrameworkId;

    fn request(mode: RunMode) -> LaunchRequest {
        LaunchRequest::new("/project", mode)
    }

    fn project(package_json: &str) -> Fakes {
        let fakes = Fakes::installed();
        fakes.fs.add_file("/project/package.json", package_json);
        fakes
    }

    #[test]
    fn test_plan_dev_script() {
        let fakes = project(r#"{"scripts": {"dev": "vite", "build": "vite build"}}"#);
        fakes.fs.add_file("/project/pnpm-lock.yaml", "");

        let plan = plan(&request(RunMode::Dev), fakes.services()).unwrap();

        assert_eq!(plan.manager, PackageManager::Pnpm);
        assert_eq!(plan.main, ResolvedTarget::script("dev", Origin::Manifest));
        assert_eq!(plan.main_body.as_deref(), Some("vite"));
        assert_eq!(plan.build, None);
    }

    #[test]
    fn test_plan_missing_manifest() {
        let fakes = Fakes::new();
        let err = plan(&request(RunMode::Dev), fakes.services()).unwrap_err();
        assert!(matches!(err, LaunchError::ManifestNotFound(_)));
    }

    #[test]
    fn test_plan_build_not_found_aborts() {
        let fakes = project(r#"{"scripts": {"dev": "vite"}}"#);
        let mut req = request(RunMode::Dev);
        req.build = true;

        let err = plan(&req, fakes.services()).unwrap_err();
        assert!(matches!(err, LaunchError::NoTarget { mode: RunMode::Build }));
    }

    #[test]
    fn test_plan_explicit_script() {
        let fakes = project(r#"{"scripts": {"dev": "vite", "storybook": "storybook dev -p 6006"}}"#);
        let mut req = request(RunMode::Dev);
        req.script = Some("storybook".to_string());

        let plan = plan(&req, fakes.services()).unwrap();
        assert_eq!(plan.main.origin(), Origin::CommandLine);
        assert_eq!(plan.main_body.as_deref(), Some("storybook dev -p 6006"));
    }

    #[test]
    fn test_dry_run_runs_nothing() {
        let fakes = project(r#"{"scripts": {"dev": "vite --port 5173"}}"#);
        let mut req = request(RunMode::Dev);
        req.dry_run = true;

        let outcome = launch(&req, fakes.services()).unwrap();

        assert!(matches!(outcome, LaunchOutcome::Planned(_)));
        assert!(fakes.runner.invocations().is_empty());
        assert!(fakes.probe.probed().is_empty());
    }

    #[test]
    fn test_build_then_main() {
        let fakes = project(r#"{"scripts": {"start": "node server.js", "build": "tsc"}}"#);
        fakes.fs.add_file("/project/yarn.lock", "");
        let mut req = request(RunMode::Prod);
        req.build = true;
        req.extra_args = vec!["--inspect".to_string()];

        launch(&req, fakes.services()).unwrap();

        assert_eq!(
            fakes.runner.command_lines(),
            vec!["yarn run build", "yarn run start -- --inspect"]
        );
    }

    #[test]
    fn test_failed_build_stops_launch() {
        let fakes = project(r#"{"scripts": {"start": "node .", "build": "tsc"}}"#);
        fakes.runner.push_exit_code(2);
        let mut req = request(RunMode::Prod);
        req.build = true;

        let err = launch(&req, fakes.services()).unwrap_err();

        assert!(matches!(err, LaunchError::ChildFailed { code: 2, .. }));
        assert_eq!(fakes.runner.command_lines(), vec!["npm run build"]);
    }

    #[test]
    fn test_port_override_is_injected() {
        let fakes = project(r#"{"scripts": {"dev": "node server.js --port 3000"}}"#)
            .with_probe(ScriptedPortProbe::with_answers([Ok(3001)]));
        fakes.answer([ScriptedAnswer::Choice(Some(0))]);

        launch(&request(RunMode::Dev), fakes.services()).unwrap();

        let invocations = fakes.runner.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].to_string(), "npm run dev -- --port 3001");
        assert_eq!(
            invocations[0].env,
            vec![("PORT".to_string(), "3001".to_string())]
        );
    }

    #[test]
    fn test_framework_command_launch() {
        let fakes = project(r#"{"dependencies": {"next": "13.0.0"}}"#);

        launch(&request(RunMode::Dev), fakes.services()).unwrap();

        let invocation = &fakes.runner.invocations()[0];
        assert_eq!(invocation.to_string(), "next dev");
        assert!(invocation.prefer_local);
        assert!(fakes.progress.events().contains(&ProgressEvent::Launching {
            target: "next dev".to_string()
        }));
    }

    #[test]
    fn test_monorepo_skips_port_check() {
        let fakes = project(r#"{"scripts": {"dev": "turbo dev --port 3000"}}"#);
        fakes.fs.add_file("/project/turbo.json", "{}");

        launch(&request(RunMode::Dev), fakes.services()).unwrap();

        assert!(fakes.probe.probed().is_empty());
        assert_eq!(fakes.runner.command_lines(), vec!["turbo run dev"]);
    }

    #[test]
    fn test_preflight_abort() {
        let fakes = Fakes::new();
        fakes.fs.add_file("/project/package.json", r#"{"scripts": {"dev": "vite"}}"#);
        fakes.answer([ScriptedAnswer::Confirm(true)]);
        fakes.runner.push_exit_code(1);

        let err = launch(&request(RunMode::Dev), fakes.services()).unwrap_err();

        assert!(matches!(err, LaunchError::PreflightAborted));
        assert_eq!(fakes.runner.command_lines(), vec!["npm install"]);
    }

    #[test]
    fn test_ambiguous_cancel_is_clean() {
        let fakes = project(r#"{"scripts": {"serve": "a", "watch": "b"}}"#);
        fakes.answer([ScriptedAnswer::Choice(None)]);

        let err = launch(&request(RunMode::Dev), fakes.services()).unwrap_err();

        assert!(matches!(err, LaunchError::Cancelled));
        assert_eq!(err.exit_code(), 0);
        assert!(fakes.runner.invocations().is_empty());
    }

    #[test]
    fn test_describe_plan() {
        let plan = LaunchPlan {
            manager: PackageManager::Bun,
            monorepo: None,
            build: Some(ResolvedTarget::script("build", Origin::Manifest)),
            main: ResolvedTarget::command("next start", Origin::Framework(FrameworkId::NextJs)),
            main_body: Some("next start".to_string()),
            extra_args: vec!["--port".to_string(), "4000".to_string()],
        };

        assert_eq!(
            plan.describe(),
            vec![
                "Package manager: bun",
                "Build: script 'build' (from package.json)",
                "Run: 'next start' (from framework (Next.js))",
                "Arguments: --port 4000",
            ]
        );
    }
}
