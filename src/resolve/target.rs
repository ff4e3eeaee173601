use crate::manifest::ManifestView;
use crate::stack::{FrameworkId, MonorepoTool};
use std::fmt;

/// How a target is launched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A manifest script, run through the package manager
    Script,
    /// A command line, run directly
    Command,
}

/// Where a target came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Manifest,
    UserConfig,
    Framework(FrameworkId),
    MonorepoDelegate(MonorepoTool),
    CommandLine,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Manifest => f.write_str("package.json"),
            Origin::UserConfig => f.write_str("user config"),
            Origin::Framework(id) => write!(f, "framework ({})", id.display_name()),
            Origin::MonorepoDelegate(tool) => write!(f, "monorepo ({})", tool.display_name()),
            Origin::CommandLine => f.write_str("command line"),
        }
    }
}

/// The one thing a run mode resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    kind: TargetKind,
    value: String,
    origin: Origin,
}

impl ResolvedTarget {
    pub fn script(name: impl Into<String>, origin: Origin) -> Self {
        Self {
            kind: TargetKind::Script,
            value: name.into(),
            origin,
        }
    }

    pub fn command(command: impl Into<String>, origin: Origin) -> Self {
        Self {
            kind: TargetKind::Command,
            value: command.into(),
            origin,
        }
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_script(&self) -> bool {
        self.kind == TargetKind::Script
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self.origin, Origin::MonorepoDelegate(_))
    }

    /// Text that will actually execute: the script body for scripts, the
    /// command itself otherwise.
    pub fn body<'m>(&'m self, manifest: &'m ManifestView) -> Option<&'m str> {
        match self.kind {
            TargetKind::Script => manifest.script(&self.value),
            TargetKind::Command => Some(&self.value),
        }
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TargetKind::Script => write!(f, "script '{}'", self.value),
            TargetKind::Command => write!(f, "'{}'", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_of_script_reads_manifest() {
        let manifest = ManifestView::from_json(r#"{"scripts": {"dev": "vite --port 4000"}}"#)
            .unwrap();

        let target = ResolvedTarget::script("dev", Origin::Manifest);
        assert_eq!(target.body(&manifest), Some("vite --port 4000"));

        let missing = ResolvedTarget::script("serve", Origin::CommandLine);
        assert_eq!(missing.body(&manifest), None);
    }

    #[test]
    fn test_body_of_command_is_itself() {
        let target = ResolvedTarget::command("next dev", Origin::Framework(FrameworkId::NextJs));
        assert_eq!(target.body(&ManifestView::default()), Some("next dev"));
        assert!(!target.is_script());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ResolvedTarget::script("dev", Origin::Manifest).to_string(),
            "script 'dev'"
        );
        assert_eq!(
            Origin::MonorepoDelegate(MonorepoTool::Turbo).to_string(),
            "monorepo (Turborepo)"
        );
        assert_eq!(
            Origin::Framework(FrameworkId::NextJs).to_string(),
            "framework (Next.js)"
        );
    }
}
