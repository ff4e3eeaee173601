//! Read-only view of a project's `package.json`

use crate::error::LaunchError;
use crate::fs::FileSystem;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const MANIFEST_FILE: &str = "package.json";

/// The parts of `package.json` the launcher looks at
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestView {
    pub name: Option<String>,
    pub scripts: HashMap<String, String>,
    pub dependencies: HashMap<String, String>,
    pub dev_dependencies: HashMap<String, String>,
    /// Corepack pin, e.g. `pnpm@8.15.0`
    pub package_manager: Option<String>,
}

impl ManifestView {
    /// Loads `package.json` from the project root.
    pub fn load<F: FileSystem + ?Sized>(fs: &F, root: &Path) -> Result<Self, LaunchError> {
        let path = root.join(MANIFEST_FILE);
        if !fs.is_file(&path) {
            return Err(LaunchError::ManifestNotFound(root.to_path_buf()));
        }

        let content = fs
            .read_to_string(&path)
            .map_err(|e| LaunchError::ManifestParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        Self::from_json(&content).map_err(|e| LaunchError::ManifestParse {
            path,
            message: e.to_string(),
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts.get(name).map(String::as_str)
    }

    /// True if the package appears in either dependency set
    pub fn depends_on(&self, package: &str) -> bool {
        self.dependencies.contains_key(package) || self.dev_dependencies.contains_key(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = ManifestView::from_json(
            r#"{
                "name": "web",
                "scripts": { "dev": "vite", "build": "vite build" },
                "dependencies": { "react": "^18.2.0" },
                "devDependencies": { "vite": "^5.0.0" },
                "packageManager": "pnpm@8.15.0"
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.name.as_deref(), Some("web"));
        assert_eq!(manifest.script("dev"), Some("vite"));
        assert!(manifest.depends_on("react"));
        assert!(manifest.depends_on("vite"));
        assert!(!manifest.depends_on("next"));
        assert_eq!(manifest.package_manager.as_deref(), Some("pnpm@8.15.0"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let manifest = ManifestView::from_json(r#"{"name": "bare"}"#).unwrap();
        assert!(manifest.scripts.is_empty());
        assert!(manifest.dependencies.is_empty());
        assert!(manifest.dev_dependencies.is_empty());
    }

    #[test]
    fn test_load_missing_manifest() {
        let fs = MockFileSystem::new();
        let err = ManifestView::load(&fs, Path::new("/project")).unwrap_err();
        assert!(matches!(err, LaunchError::ManifestNotFound(_)));
    }

    #[test]
    fn test_load_invalid_manifest() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{ not json");
        let err = ManifestView::load(&fs, Path::new("/project")).unwrap_err();
        assert!(matches!(err, LaunchError::ManifestParse { .. }));
    }

    #[test]
    fn test_load_from_mock() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", r#"{"scripts": {"start": "node index.js"}}"#);
        let manifest = ManifestView::load(&fs, Path::new("/project")).unwrap();
        assert!(manifest.has_script("start"));
    }
}
