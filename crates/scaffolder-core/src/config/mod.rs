//! Run configuration resolved once at start-up from flags and environment

pub mod framework;

pub use framework::{local_version, FrameworkSource};

use crate::product::ProductConfig;
use std::path::{Path, PathBuf};

/// Values the interaction flow needs before it asks anything
#[derive(Debug, Clone)]
pub struct Settings {
    /// Framework package name (e.g. `pywire`)
    pub package: &'static str,
    pub framework: FrameworkSource,
}

impl Settings {
    /// Resolve settings from CLI values plus the product's local-mode switch.
    ///
    /// Local mode wins over a pinned version, which wins over "latest".
    /// `local_path` arrives already merged with its environment variable by the CLI parser.
    pub fn resolve<C: ProductConfig>(
        config: &C,
        pinned_version: Option<String>,
        local_path: Option<PathBuf>,
    ) -> Self {
        let use_local = std::env::var(config.local_mode_env())
            .map(|v| v == "1")
            .unwrap_or(false);
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self::from_values(config, use_local, pinned_version, local_path, &cwd)
    }

    /// Same as [`Settings::resolve`] with the environment already read
    pub fn from_values<C: ProductConfig>(
        config: &C,
        use_local: bool,
        pinned_version: Option<String>,
        local_path: Option<PathBuf>,
        cwd: &Path,
    ) -> Self {
        let framework = if use_local {
            let path = local_path
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| default_local_checkout(cwd, config.framework_package()));
            let path = if path.is_absolute() { path } else { cwd.join(path) };
            FrameworkSource::Local(path)
        } else {
            match pinned_version.filter(|v| !v.trim().is_empty()) {
                Some(version) => FrameworkSource::Pinned(version.trim().to_string()),
                None => FrameworkSource::Latest,
            }
        };

        Self {
            package: config.framework_package(),
            framework,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.framework, FrameworkSource::Local(_))
    }

    /// Requirement string written into the generated manifest
    pub fn requirement(&self) -> String {
        self.framework.requirement(self.package)
    }
}

/// A checkout named after the package, next to the working directory
fn default_local_checkout(cwd: &Path, package: &str) -> PathBuf {
    cwd.parent().unwrap_or(cwd).join(package)
}
