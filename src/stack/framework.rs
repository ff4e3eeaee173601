//! Framework heuristics
//!
//! When a project has no recognisable script for a mode, a known framework in
//! its dependencies tells us the conventional command instead. The table is
//! ordered: meta-frameworks come before the bundlers they are built on, and the
//! first match wins.

use crate::manifest::ManifestView;
use crate::stack::{FrameworkId, RunMode};

/// Canonical command per run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeCommands {
    pub dev: &'static str,
    pub build: &'static str,
    pub prod: &'static str,
}

impl ModeCommands {
    pub fn for_mode(&self, mode: RunMode) -> &'static str {
        match mode {
            RunMode::Dev => self.dev,
            RunMode::Build => self.build,
            RunMode::Prod => self.prod,
        }
    }
}

/// One row of the framework table
#[derive(Debug, Clone, Copy)]
pub struct FrameworkEntry {
    pub id: FrameworkId,
    /// Any of these packages in `dependencies` or `devDependencies` selects the framework
    pub packages: &'static [&'static str],
    pub commands: ModeCommands,
}

impl FrameworkEntry {
    pub fn matches(&self, manifest: &ManifestView) -> bool {
        self.packages.iter().any(|pkg| manifest.depends_on(pkg))
    }
}

/// Framework found in the manifest and the command it implies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkMatch {
    pub framework: FrameworkId,
    pub command: String,
}

pub static FRAMEWORKS: &[FrameworkEntry] = &[
    FrameworkEntry {
        id: FrameworkId::NextJs,
        packages: &["next"],
        commands: ModeCommands {
            dev: "next dev",
            build: "next build",
            prod: "next start",
        },
    },
    FrameworkEntry {
        id: FrameworkId::Nuxt,
        packages: &["nuxt", "nuxt3"],
        commands: ModeCommands {
            dev: "nuxt dev",
            build: "nuxt build",
            prod: "nuxt preview",
        },
    },
    FrameworkEntry {
        id: FrameworkId::Astro,
        packages: &["astro"],
        commands: ModeCommands {
            dev: "astro dev",
            build: "astro build",
            prod: "astro preview",
        },
    },
    FrameworkEntry {
        id: FrameworkId::SvelteKit,
        packages: &["@sveltejs/kit"],
        commands: ModeCommands {
            dev: "vite dev",
            build: "vite build",
            prod: "vite preview",
        },
    },
    FrameworkEntry {
        id: FrameworkId::Gatsby,
        packages: &["gatsby"],
        commands: ModeCommands {
            dev: "gatsby develop",
            build: "gatsby build",
            prod: "gatsby serve",
        },
    },
    FrameworkEntry {
        id: FrameworkId::Angular,
        packages: &["@angular/cli", "@angular/core"],
        commands: ModeCommands {
            dev: "ng serve",
            build: "ng build",
            prod: "ng serve --configuration production",
        },
    },
    FrameworkEntry {
        id: FrameworkId::NestJs,
        packages: &["@nestjs/cli", "@nestjs/core"],
        commands: ModeCommands {
            dev: "nest start --watch",
            build: "nest build",
            prod: "nest start",
        },
    },
    FrameworkEntry {
        id: FrameworkId::VueCli,
        packages: &["@vue/cli-service"],
        commands: ModeCommands {
            dev: "vue-cli-service serve",
            build: "vue-cli-service build",
            prod: "vue-cli-service serve --mode production",
        },
    },
    FrameworkEntry {
        id: FrameworkId::Vite,
        packages: &["vite"],
        commands: ModeCommands {
            dev: "vite",
            build: "vite build",
            prod: "vite preview",
        },
    },
];

/// First framework in table order that the manifest depends on
pub fn detect_framework(manifest: &ManifestView) -> Option<&'static FrameworkEntry> {
    FRAMEWORKS.iter().find(|entry| entry.matches(manifest))
}

/// Canonical command for `mode`, if the manifest uses a known framework
pub fn framework_command(mode: RunMode, manifest: &ManifestView) -> Option<FrameworkMatch> {
    detect_framework(manifest).map(|entry| FrameworkMatch {
        framework: entry.id,
        command: entry.commands.for_mode(mode).to_string(),
    })
}
