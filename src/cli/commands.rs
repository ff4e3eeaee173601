use crate::stack::RunMode;
use crate::util::logging::parse_level;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Universal development launcher
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "unirun",
    about = "Detects how a JavaScript project runs, checks it is ready, then launches it",
    version,
    author,
    long_about = "unirun works out the package manager and the script to run for the \
                  requested mode, offers to install dependencies, create .env and free a busy \
                  port, then launches the command.\n\n\
                  Unknown flags and everything after -- are passed to the launched command.\n\n\
                  Examples:\n  \
                  unirun\n  \
                  unirun --prod\n  \
                  unirun --build --prod\n  \
                  unirun storybook -- --port 6007\n  \
                  unirun --open"
)]
pub struct CliArgs {
    #[arg(
        value_name = "SCRIPT",
        help = "Script to run instead of detecting one (default: the dev script)"
    )]
    pub script: Option<String>,

    #[arg(long, help = "Build before running")]
    pub build: bool,

    #[arg(long, help = "Run in production mode")]
    pub prod: bool,

    #[arg(long, help = "Print what would run without checking or running anything")]
    pub dry_run: bool,

    #[arg(
        short = 'C',
        long = "cwd",
        value_name = "DIR",
        help = "Project directory (defaults to the current directory)"
    )]
    pub cwd: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level, help = "Set logging level")]
    pub log_level: Option<Level>,

    #[arg(short = 'v', long, help = "Verbose diagnostics")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(
        last = true,
        value_name = "ARGS",
        help = "Arguments passed to the launched command"
    )]
    pub extra_args: Vec<String>,
}

impl CliArgs {
    pub fn mode(&self) -> RunMode {
        if self.prod {
            RunMode::Prod
        } else {
            RunMode::Dev
        }
    }

    /// Level requested on the command line, if any
    pub fn requested_log_level(&self) -> Option<Level> {
        if let Some(level) = self.log_level {
            Some(level)
        } else if self.verbose {
            Some(Level::DEBUG)
        } else if self.quiet {
            Some(Level::ERROR)
        } else {
            None
        }
    }
}

fn parse_log_level(value: &str) -> Result<Level, String> {
    parse_level(value).ok_or_else(|| {
        format!(
            "invalid log level '{}' (expected trace, debug, info, warn or error)",
            value
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["unirun"]);
        assert_eq!(args.script, None);
        assert!(!args.build);
        assert!(!args.dry_run);
        assert_eq!(args.mode(), RunMode::Dev);
        assert_eq!(args.requested_log_level(), None);
        assert!(args.extra_args.is_empty());
    }

    #[test]
    fn test_script_and_flags() {
        let args = CliArgs::parse_from(["unirun", "storybook", "--build", "--prod", "-C", "web"]);
        assert_eq!(args.script.as_deref(), Some("storybook"));
        assert!(args.build);
        assert_eq!(args.mode(), RunMode::Prod);
        assert_eq!(args.cwd, Some(PathBuf::from("web")));
    }

    #[test]
    fn test_trailing_args() {
        let args = CliArgs::parse_from(["unirun", "--", "--open", "--port", "4000"]);
        assert_eq!(args.extra_args, vec!["--open", "--port", "4000"]);
    }

    #[test]
    fn test_log_level_flags() {
        let args = CliArgs::parse_from(["unirun", "--log-level", "info"]);
        assert_eq!(args.requested_log_level(), Some(Level::INFO));

        let args = CliArgs::parse_from(["unirun", "-v"]);
        assert_eq!(args.requested_log_level(), Some(Level::DEBUG));

        let args = CliArgs::parse_from(["unirun", "-q"]);
        assert_eq!(args.requested_log_level(), Some(Level::ERROR));
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(CliArgs::try_parse_from(["unirun", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["unirun", "-v", "-q"]).is_err());
    }
}
