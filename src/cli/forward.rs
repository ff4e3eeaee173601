//! Splitting argv into launcher arguments and forwarded arguments
//!
//! `unirun --prod --open` should run the production target with `--open`.
//! clap rejects unknown flags, so argv is partitioned first, using the clap
//! definition of [`CliArgs`] to decide what the launcher understands.

use super::commands::CliArgs;
use clap::{CommandFactory, Parser};
use std::collections::HashMap;
use std::ffi::OsString;

/// Known option spellings and whether each takes a value
struct KnownOptions {
    long: HashMap<String, bool>,
    short: HashMap<char, bool>,
}

impl KnownOptions {
    fn from_cli() -> Self {
        let mut command = CliArgs::command();
        command.build();

        let mut long = HashMap::new();
        let mut short = HashMap::new();
        for arg in command.get_arguments().filter(|arg| !arg.is_positional()) {
            let takes_value = arg.get_action().takes_values();
            if let Some(name) = arg.get_long() {
                long.insert(name.to_string(), takes_value);
            }
            if let Some(c) = arg.get_short() {
                short.insert(c, takes_value);
            }
        }

        Self { long, short }
    }

    /// `Some(takes_value)` when `token` is a launcher option
    fn classify(&self, token: &str) -> Option<bool> {
        if let Some(name) = token.strip_prefix("--") {
            let (name, inline) = match name.split_once('=') {
                Some((name, _)) => (name, true),
                None => (name, false),
            };
            return self.long.get(name).map(|takes| *takes && !inline);
        }

        let cluster = token.strip_prefix('-')?;
        let mut chars = cluster.chars();
        let first = chars.next()?;
        let takes_value = *self.short.get(&first)?;
        if takes_value {
            // `-C dir` or `-Cdir`
            return Some(chars.as_str().is_empty());
        }
        // `-vq` style clusters must be made only of known flags
        chars
            .all(|c| self.short.get(&c) == Some(&false))
            .then_some(false)
    }
}

fn is_bare(token: &str) -> bool {
    token == "-" || !token.starts_with('-')
}

/// Argv the launcher parses, and arguments for the launched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub own: Vec<String>,
    pub forwarded: Vec<String>,
}

/// Splits `argv` (without the program name).
///
/// Unknown options are forwarded together with a bare value that follows
/// them; the first other bare word is the script; everything after `--` is
/// forwarded verbatim.
pub fn partition(argv: &[String]) -> Partition {
    let known = KnownOptions::from_cli();
    let mut own = Vec::new();
    let mut forwarded = Vec::new();
    let mut seen_script = false;
    let mut tokens = argv.iter().peekable();

    while let Some(token) = tokens.next() {
        if token == "--" {
            forwarded.extend(tokens.by_ref().cloned());
            break;
        }

        if is_bare(token) {
            if seen_script {
                forwarded.push(token.clone());
            } else {
                seen_script = true;
                own.push(token.clone());
            }
            continue;
        }

        match known.classify(token) {
            Some(takes_value) => {
                own.push(token.clone());
                if takes_value {
                    own.extend(tokens.next().cloned());
                }
            }
            None => {
                forwarded.push(token.clone());
                if !token.contains('=') {
                    if let Some(value) = tokens.next_if(|next| is_bare(next)) {
                        forwarded.push(value.clone());
                    }
                }
            }
        }
    }

    Partition { own, forwarded }
}

/// Parses process arguments, moving forwarded ones into `extra_args`.
pub fn parse_args<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(|arg| arg.into().to_string_lossy().into_owned());
    let program = args.next().unwrap_or_else(|| "unirun".to_string());
    let rest: Vec<String> = args.collect();

    let Partition { own, forwarded } = partition(&rest);
    CliArgs::parse_from(std::iter::once(program).chain(own).chain(
        (!forwarded.is_empty())
            .then(|| std::iter::once("--".to_string()).chain(forwarded))
            .into_iter()
            .flatten(),
    ))
}
