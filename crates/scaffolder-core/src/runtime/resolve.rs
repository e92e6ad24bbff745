//! Best-effort lookup of the framework version an install would pick

use super::command::ExternalCommand;
use crate::config::FrameworkSource;
use regex::Regex;
use std::time::Duration;
use tracing::debug;

/// Upper bound for the resolver query
pub const RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can answer "which version would this requirement install?"
#[allow(async_fn_in_trait)]
pub trait VersionQuery {
    /// `None` on any failure: tool missing, non-zero exit, timeout, unparseable output
    async fn resolve(&self, requirement: &str, package: &str) -> Option<String>;
}

/// Asks `uv pip compile` in dry-run form
#[derive(Debug, Clone)]
pub struct UvVersionQuery {
    uv: String,
    timeout: Duration,
}

impl UvVersionQuery {
    pub fn new(uv: impl Into<String>) -> Self {
        Self {
            uv: uv.into(),
            timeout: RESOLVE_TIMEOUT,
        }
    }
}

impl VersionQuery for UvVersionQuery {
    async fn resolve(&self, requirement: &str, package: &str) -> Option<String> {
        let outcome = ExternalCommand::new(&self.uv)
            .args(["pip", "compile", "-", "--quiet"])
            .stdin(requirement)
            .timeout(self.timeout)
            .output()
            .await;

        let Some(stdout) = outcome.stdout() else {
            debug!(?outcome, "version query failed");
            return None;
        };
        pinned_version(stdout, package)
    }
}

/// Extract `<package>==<version>` from compiled requirements
pub fn pinned_version(compiled: &str, package: &str) -> Option<String> {
    let pattern = format!(r"(?m)^\s*{}==(\S+)", regex::escape(package));
    let re = Regex::new(&pattern).ok()?;
    re.captures(compiled)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Version label for the start-up banner. Only a "latest" source consults the query.
pub async fn version_label<Q: VersionQuery>(
    source: &FrameworkSource,
    package: &str,
    query: &Q,
) -> String {
    if source.needs_resolution() {
        if let Some(version) = query.resolve(&source.requirement(package), package).await {
            return version;
        }
    }
    source.base_label(package)
}
