//! Where the framework dependency comes from and how its version is labelled

use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Framework dependency source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameworkSource {
    /// Whatever the package index resolves
    Latest,
    /// An exact version from the command line
    Pinned(String),
    /// A local checkout used while developing the framework itself
    Local(PathBuf),
}

impl FrameworkSource {
    /// PEP 508 requirement string for the generated manifest
    pub fn requirement(&self, package: &str) -> String {
        match self {
            FrameworkSource::Latest => package.to_string(),
            FrameworkSource::Pinned(version) => format!("{}=={}", package, version),
            FrameworkSource::Local(path) => match Url::from_file_path(path) {
                Ok(url) => format!("{} @ {}", package, url),
                Err(()) => format!("{} @ file://{}", package, path.display()),
            },
        }
    }

    /// Only an unpinned, non-local source is worth asking the resolver about
    pub fn needs_resolution(&self) -> bool {
        matches!(self, FrameworkSource::Latest)
    }

    /// Label shown before the resolver had a say
    pub fn base_label(&self, package: &str) -> String {
        match self {
            FrameworkSource::Latest => "Latest".to_string(),
            FrameworkSource::Pinned(version) => version.clone(),
            FrameworkSource::Local(path) => match local_version(path, package) {
                Some(version) => format!("{} (Local)", version),
                None => "Local (Source)".to_string(),
            },
        }
    }
}

#[derive(Deserialize)]
struct PyProject {
    project: Option<PyProjectTable>,
}

#[derive(Deserialize)]
struct PyProjectTable {
    version: Option<String>,
}

/// Read the version of a local framework checkout.
///
/// Tries the generated `src/<package>/_version.py` first, then the static
/// `[project].version` in `pyproject.toml`. The checkout directory may have any name.
pub fn local_version(checkout: &Path, package: &str) -> Option<String> {
    version_from_version_file(checkout, package).or_else(|| version_from_pyproject(checkout))
}

fn version_from_version_file(checkout: &Path, package: &str) -> Option<String> {
    let module = package.replace('-', "_");
    let path = checkout.join("src").join(module).join("_version.py");
    let content = std::fs::read_to_string(path).ok()?;

    let re = Regex::new(r#"version\s*=\s*["']([^"']+)["']"#).ok()?;
    re.captures(&content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn version_from_pyproject(checkout: &Path) -> Option<String> {
    let content = std::fs::read_to_string(checkout.join("pyproject.toml")).ok()?;
    let parsed: PyProject = toml::from_str(&content).ok()?;
    parsed.project?.version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements() {
        assert_eq!(FrameworkSource::Latest.requirement("pywire"), "pywire");
        assert_eq!(
            FrameworkSource::Pinned("0.1.4".into()).requirement("pywire"),
            "pywire==0.1.4"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_local_requirement_is_file_url() {
        let source = FrameworkSource::Local(PathBuf::from("/work/pywire"));
        assert_eq!(source.requirement("pywire"), "pywire @ file:///work/pywire");
        assert!(!source.needs_resolution());
    }

    #[test]
    fn test_only_latest_needs_resolution() {
        assert!(FrameworkSource::Latest.needs_resolution());
        assert!(!FrameworkSource::Pinned("1.0.0".into()).needs_resolution());
    }

    #[test]
    fn test_local_version_from_version_file() {
        let tmp = tempfile::tempdir().unwrap();
        let checkout = tmp.path().join("pywire");
        std::fs::create_dir_all(checkout.join("src/pywire")).unwrap();
        std::fs::write(
            checkout.join("src/pywire/_version.py"),
            "# generated\n__version__ = version = '0.3.1.dev4'\n",
        )
        .unwrap();

        assert_eq!(local_version(&checkout, "pywire").as_deref(), Some("0.3.1.dev4"));
        assert_eq!(
            FrameworkSource::Local(checkout).base_label("pywire"),
            "0.3.1.dev4 (Local)"
        );
    }

    #[test]
    fn test_local_version_falls_back_to_pyproject() {
        let tmp = tempfile::tempdir().unwrap();
        let checkout = tmp.path().join("pywire");
        std::fs::create_dir_all(&checkout).unwrap();
        std::fs::write(
            checkout.join("pyproject.toml"),
            "[project]\nname = \"pywire\"\nversion = \"0.2.0\"\n",
        )
        .unwrap();

        assert_eq!(local_version(&checkout, "pywire").as_deref(), Some("0.2.0"));
    }

    #[test]
    fn test_local_label_without_version() {
        let tmp = tempfile::tempdir().unwrap();
        let source = FrameworkSource::Local(tmp.path().join("pywire"));
        assert_eq!(source.base_label("pywire"), "Local (Source)");
    }

    #[test]
    fn test_version_file_found_in_renamed_checkout() {
        let tmp = tempfile::tempdir().unwrap();
        let checkout = tmp.path().join("pywire-main");
        std::fs::create_dir_all(checkout.join("src/pywire")).unwrap();
        std::fs::write(checkout.join("src/pywire/_version.py"), "version = '0.9.0'\n").unwrap();

        assert_eq!(
            FrameworkSource::Local(checkout).base_label("pywire"),
            "0.9.0 (Local)"
        );
    }
}
