use unirun::cli::{handle_run, parse_args, CliArgs};
use unirun::util::logging::{init_logging, LoggingConfig};
use unirun::VERSION;

use std::env;
use tracing::debug;

fn main() {
    let args = parse_args(env::args_os());
    init_logging_from_args(&args);

    debug!("unirun v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    std::process::exit(handle_run(&args));
}

fn init_logging_from_args(args: &CliArgs) {
    let config = LoggingConfig::from_env();
    let config = match args.requested_log_level() {
        Some(level) => config.with_level(level),
        None => config,
    };
    init_logging(config);
}
