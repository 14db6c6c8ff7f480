use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{FluidRenameError, Result};

const COMPOSER_MANIFEST: &str = "composer.json";
const EXTENSION_MANIFEST: &str = "ext_emconf.php";
const TYPO3_PACKAGE_TYPE_PREFIX: &str = "typo3-cms-";

/// Package locations below a project root and how deep packages sit in each.
const PACKAGE_LOCATIONS: &[(&str, usize)] = &[
    ("vendor", 2),
    ("packages", 1),
    ("typo3conf/ext", 1),
    ("public/typo3conf/ext", 1),
    ("typo3/sysext", 1),
    ("public/typo3/sysext", 1),
];

#[derive(Debug, Deserialize)]
struct ComposerManifest {
    name: Option<String>,
    #[serde(rename = "type")]
    package_type: Option<String>,
    #[serde(default)]
    extra: serde_json::Value,
}

impl ComposerManifest {
    fn is_typo3_package(&self) -> bool {
        self.package_type
            .as_deref()
            .is_some_and(|t| t.starts_with(TYPO3_PACKAGE_TYPE_PREFIX))
    }

    fn extension_key(&self) -> Option<String> {
        if let Some(key) = self.extra["typo3/cms"]["extension-key"].as_str() {
            return Some(key.to_string());
        }
        let name = self.name.as_deref()?;
        let package = name.rsplit('/').next()?;
        Some(package.replace('-', "_"))
    }
}

/// A TYPO3 extension and the directory it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub key: String,
    pub composer_name: Option<String>,
    pub path: PathBuf,
}

impl Package {
    fn matches(&self, name: &str) -> bool {
        self.key == name || self.composer_name.as_deref() == Some(name)
    }

    fn load(dir: &Path) -> Option<Self> {
        let manifest_path = dir.join(COMPOSER_MANIFEST);
        if manifest_path.is_file() {
            match read_manifest(&manifest_path) {
                Ok(manifest) if manifest.is_typo3_package() => {
                    if let Some(key) = manifest.extension_key() {
                        return Some(Self {
                            key,
                            composer_name: manifest.name,
                            path: dir.to_path_buf(),
                        });
                    }
                }
                Ok(_) => debug!("Not a TYPO3 package: {:?}", manifest_path),
                Err(e) => warn!("Ignoring {:?}: {}", manifest_path, e),
            }
        }

        if dir.join(EXTENSION_MANIFEST).is_file() {
            let key = dir.file_name()?.to_str()?.to_string();
            return Some(Self {
                key,
                composer_name: None,
                path: dir.to_path_buf(),
            });
        }
        None
    }
}

fn read_manifest(path: &Path) -> std::result::Result<ComposerManifest, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

/// Packages known below a project root.
#[derive(Debug, Default)]
pub struct PackageRegistry {
    packages: Vec<Package>,
}

impl PackageRegistry {
    pub fn discover(project_root: &Path) -> Result<Self> {
        let mut packages: Vec<Package> = Vec::new();
        let mut add = |package: Package| {
            if !packages.iter().any(|p| p.path == package.path) {
                debug!("Found package '{}' at {:?}", package.key, package.path);
                packages.push(package);
            }
        };

        if let Some(package) = Package::load(project_root) {
            add(package);
        }

        for (location, depth) in PACKAGE_LOCATIONS {
            let base = project_root.join(location);
            if !base.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&base)
                .min_depth(*depth)
                .max_depth(*depth)
                .sort_by_file_name()
            {
                let entry = entry?;
                if !entry.file_type().is_dir() {
                    continue;
                }
                if let Some(package) = Package::load(entry.path()) {
                    add(package);
                }
            }
        }

        Ok(Self { packages })
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Looks up a package by extension key or composer name.
    ///
    /// An existing directory is accepted as an ad-hoc package when no known package matches.
    pub fn get(&self, name: &str) -> Result<Package> {
        if let Some(package) = self.packages.iter().find(|p| p.matches(name)) {
            return Ok(package.clone());
        }

        let dir = Path::new(name);
        if dir.is_dir() {
            let key = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.to_string());
            debug!("Using directory as package: {:?}", dir);
            return Ok(Package {
                key,
                composer_name: None,
                path: dir.to_path_buf(),
            });
        }

        Err(FluidRenameError::PackageNotFound {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "vendor/acme/site-package/composer.json",
            r#"{"name": "acme/site-package", "type": "typo3-cms-extension",
                "extra": {"typo3/cms": {"extension-key": "acme_site"}}}"#,
        );
        write(
            root,
            "vendor/acme/news-extended/composer.json",
            r#"{"name": "acme/news-extended", "type": "typo3-cms-extension"}"#,
        );
        write(
            root,
            "vendor/symfony/console/composer.json",
            r#"{"name": "symfony/console", "type": "library"}"#,
        );
        write(root, "typo3conf/ext/legacy_ext/ext_emconf.php", "<?php\n");
        write(root, "packages/broken/composer.json", "{ not json");
        dir
    }

    #[test]
    fn test_lookup_by_extension_key() {
        let dir = project();
        let registry = PackageRegistry::discover(dir.path()).unwrap();
        let package = registry.get("acme_site").unwrap();
        assert_eq!(package.composer_name.as_deref(), Some("acme/site-package"));
        assert_eq!(package.path, dir.path().join("vendor/acme/site-package"));
    }

    #[test]
    fn test_lookup_by_composer_name() {
        let dir = project();
        let registry = PackageRegistry::discover(dir.path()).unwrap();
        assert_eq!(registry.get("acme/site-package").unwrap().key, "acme_site");
        assert_eq!(registry.get("acme/news-extended").unwrap().key, "news_extended");
    }

    #[test]
    fn test_legacy_extension() {
        let dir = project();
        let registry = PackageRegistry::discover(dir.path()).unwrap();
        let package = registry.get("legacy_ext").unwrap();
        assert_eq!(package.path, dir.path().join("typo3conf/ext/legacy_ext"));
        assert_eq!(package.composer_name, None);
    }

    #[test]
    fn test_non_typo3_packages_are_ignored() {
        let dir = project();
        let registry = PackageRegistry::discover(dir.path()).unwrap();
        assert_eq!(registry.packages().len(), 3);
        assert!(matches!(
            registry.get("symfony/console"),
            Err(FluidRenameError::PackageNotFound { .. })
        ));
    }

    #[test]
    fn test_project_root_is_package() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "composer.json",
            r#"{"name": "vendor/my-ext", "type": "typo3-cms-extension"}"#,
        );
        let registry = PackageRegistry::discover(dir.path()).unwrap();
        assert_eq!(registry.get("my_ext").unwrap().path, dir.path());
    }

    #[test]
    fn test_directory_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("my_ext")).unwrap();
        let registry = PackageRegistry::default();
        let path = dir.path().join("my_ext");
        let package = registry.get(path.to_str().unwrap()).unwrap();
        assert_eq!(package.key, "my_ext");
        assert_eq!(package.path, path);
    }

    #[test]
    fn test_unknown_package() {
        let registry = PackageRegistry::default();
        let error = registry.get("does_not_exist").unwrap_err();
        assert_eq!(error.to_string(), "Package \"does_not_exist\" is not available.");
    }
}
