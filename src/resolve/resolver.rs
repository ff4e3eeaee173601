use super::target::{Origin, ResolvedTarget};
use crate::config::UserConfig;
use crate::error::LaunchError;
use crate::manifest::ManifestView;
use crate::prompt::Prompter;
use crate::stack::{framework_command, MonorepoTool, RunMode};
use tracing::debug;

/// Outcome of resolving a run mode without asking anyone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedTarget),
    /// Several fallback scripts matched; the caller must pick one
    Ambiguous(Vec<String>),
    NotFound,
}

/// Candidate scripts for `mode` that the manifest defines, in priority order.
pub fn matching_scripts(mode: RunMode, manifest: &ManifestView) -> Vec<&'static str> {
    mode.script_candidates()
        .iter()
        .copied()
        .filter(|name| manifest.has_script(name))
        .collect()
}

/// Resolves `mode` to a target.
///
/// User config beats monorepo delegation, which beats manifest scripts, which
/// beat framework heuristics.
pub fn resolve(
    mode: RunMode,
    manifest: &ManifestView,
    config: Option<&UserConfig>,
    monorepo: Option<MonorepoTool>,
) -> Resolution {
    if let Some(script) = config.and_then(|c| c.script_for(mode)) {
        debug!("{} script pinned by user config: {}", mode, script);
        return Resolution::Resolved(ResolvedTarget::script(script, Origin::UserConfig));
    }

    let matches = matching_scripts(mode, manifest);

    if let Some(tool) = monorepo {
        let script = matches.first().copied().unwrap_or(mode.delegate_default());
        let command = tool.orchestrator().run_command(script);
        debug!("Delegating {} to {}: {}", mode, tool, command);
        return Resolution::Resolved(ResolvedTarget::command(
            command,
            Origin::MonorepoDelegate(tool),
        ));
    }

    let primary = mode.script_candidates().first().copied();
    match matches.as_slice() {
        [] => match framework_command(mode, manifest) {
            Some(found) => {
                debug!("Using {} convention: {}", found.framework, found.command);
                Resolution::Resolved(ResolvedTarget::command(
                    found.command,
                    Origin::Framework(found.framework),
                ))
            }
            None => Resolution::NotFound,
        },
        [only] => Resolution::Resolved(ResolvedTarget::script(*only, Origin::Manifest)),
        [first, ..] if Some(*first) == primary => {
            Resolution::Resolved(ResolvedTarget::script(*first, Origin::Manifest))
        }
        several => Resolution::Ambiguous(several.iter().map(|s| s.to_string()).collect()),
    }
}

/// Like [`resolve`], but asks the user to settle ambiguity.
///
/// Cancelling the choice aborts with [`LaunchError::Cancelled`].
pub fn resolve_interactive(
    mode: RunMode,
    manifest: &ManifestView,
    config: Option<&UserConfig>,
    monorepo: Option<MonorepoTool>,
    prompter: &dyn Prompter,
) -> Result<ResolvedTarget, LaunchError> {
    match resolve(mode, manifest, config, monorepo) {
        Resolution::Resolved(target) => Ok(target),
        Resolution::NotFound => Err(LaunchError::NoTarget { mode }),
        Resolution::Ambiguous(candidates) => {
            let choice = prompter
                .ask_choice(
                    "Multiple scripts found. Which one do you want to run?",
                    &candidates,
                    None,
                )
                .map_err(|e| LaunchError::Prompt(format!("{:#}", e)))?;

            let index = choice.ok_or(LaunchError::Cancelled)?;
            let script = candidates
                .into_iter()
                .nth(index)
                .ok_or(LaunchError::Cancelled)?;
            Ok(ResolvedTarget::script(script, Origin::Manifest))
        }
    }
}
