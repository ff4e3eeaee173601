//! Package manager identity, inferred from lockfiles

use crate::fs::FileSystem;
use crate::manifest::ManifestView;
use std::path::Path;
use tracing::debug;

crate::define_id_enum! {
    /// The package manager that governs a project
    PackageManager {
        Npm => "npm" : "npm",
        Yarn => "yarn" : "Yarn",
        Pnpm => "pnpm" : "pnpm",
        Bun => "bun" : "Bun",
    }
}

/// Lockfile to manager, checked in this order
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("yarn.lock", PackageManager::Yarn),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
];

impl PackageManager {
    /// Picks the manager for the project at `root`.
    ///
    /// Lockfiles win; the manifest's `packageManager` pin is consulted only
    /// when no lockfile is present. Falls back to npm.
    pub fn detect<F: FileSystem + ?Sized>(
        fs: &F,
        root: &Path,
        manifest: Option<&ManifestView>,
    ) -> Self {
        for (lockfile, manager) in LOCKFILES {
            if fs.exists(&root.join(lockfile)) {
                debug!("Found {}, using {}", lockfile, manager);
                return *manager;
            }
        }

        if let Some(pinned) = manifest
            .and_then(|m| m.package_manager.as_deref())
            .and_then(Self::from_pin)
        {
            debug!("Using {} from packageManager field", pinned);
            return pinned;
        }

        PackageManager::Npm
    }

    /// Parses a corepack pin such as `yarn@4.1.0`
    pub fn from_pin(pin: &str) -> Option<Self> {
        let name = pin.split('@').next()?.trim();
        Self::from_name(name)
    }

    pub fn program(&self) -> &'static str {
        self.name()
    }

    pub fn install_args(&self) -> Vec<String> {
        vec!["install".to_string()]
    }

    /// `run <script> [-- <extra>...]`
    pub fn run_args(&self, script: &str, extra_args: &[String]) -> Vec<String> {
        let mut args = vec!["run".to_string(), script.to_string()];
        if !extra_args.is_empty() {
            args.push("--".to_string());
            args.extend(extra_args.iter().cloned());
        }
        args
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        PackageManager::Npm
    }
}
