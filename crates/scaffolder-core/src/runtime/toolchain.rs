//! Post-generation steps: git repository, environment sync, dev server
//!
//! None of these are allowed to abort the flow. Every failure is turned into a
//! warning on the reporter and the step returns `false`.

use super::command::{CommandOutcome, ExternalCommand};
use super::resolve::UvVersionQuery;
use crate::report::Reporter;
use anyhow::Result;
use std::path::Path;

/// Marker of an activated virtual environment; removed so `uv sync` targets the new project
const VIRTUAL_ENV: &str = "VIRTUAL_ENV";

/// Names of the external programs the flow shells out to
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub git: String,
    pub uv: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            uv: "uv".to_string(),
        }
    }
}

impl Toolchain {
    pub fn new(git: impl Into<String>, uv: impl Into<String>) -> Self {
        Self {
            git: git.into(),
            uv: uv.into(),
        }
    }

    /// Resolver query backed by this toolchain's uv
    pub fn version_query(&self) -> UvVersionQuery {
        UvVersionQuery::new(&self.uv)
    }

    fn git(&self, dir: &Path) -> ExternalCommand {
        ExternalCommand::new(&self.git).current_dir(dir)
    }

    /// `git init`, `git add .`, `git commit`. Returns true when the initial commit exists.
    ///
    /// A failed step skips the ones after it and leaves the repository as it is.
    pub async fn init_repository(
        &self,
        dir: &Path,
        commit_message: &str,
        reporter: &dyn Reporter,
    ) -> Result<bool> {
        match self.git(dir).arg("init").output().await {
            CommandOutcome::Success { .. } => {}
            CommandOutcome::NotFound => {
                reporter.warning("Git not found, skipping repository setup")?;
                return Ok(false);
            }
            outcome => {
                reporter.warning(&failure_line("Git init failed", &outcome))?;
                return Ok(false);
            }
        }

        let add = self.git(dir).args(["add", "."]).output().await;
        if !add.is_success() {
            reporter.warning(&failure_line("Git add failed, skipping commit", &add))?;
            return Ok(false);
        }

        let commit = self
            .git(dir)
            .args(["commit", "-m", commit_message])
            .output()
            .await;
        if !commit.is_success() {
            reporter.warning(&failure_line(
                "Git commit skipped (configure user.name/email to enable)",
                &commit,
            ))?;
            return Ok(false);
        }

        reporter.success("Initialized git repository")?;
        Ok(true)
    }

    /// `uv sync` without the caller's virtual environment. Returns true on success.
    pub async fn sync_environment(&self, dir: &Path, reporter: &dyn Reporter) -> Result<bool> {
        let outcome = ExternalCommand::new(&self.uv)
            .arg("sync")
            .current_dir(dir)
            .env_remove(VIRTUAL_ENV)
            .output()
            .await;

        match outcome {
            CommandOutcome::Success { .. } => {
                reporter.success("Environment ready")?;
                Ok(true)
            }
            CommandOutcome::NotFound => {
                reporter.warning(&format!("{} not found, skipping sync", self.uv))?;
                Ok(false)
            }
            CommandOutcome::Failed { stderr, .. } if !stderr.is_empty() => {
                reporter.warning(&format!("Failed to sync environment:\n{}", stderr))?;
                Ok(false)
            }
            outcome => {
                reporter.warning(&failure_line("Failed to sync environment", &outcome))?;
                Ok(false)
            }
        }
    }

    /// Run the dev server in the foreground. Returns false when it could not be started
    /// or exited with an error.
    pub async fn start_dev_server(
        &self,
        dir: &Path,
        dev_command: &[&str],
        reporter: &dyn Reporter,
    ) -> Result<bool> {
        let outcome = ExternalCommand::new(&self.uv)
            .arg("run")
            .args(dev_command.iter().copied())
            .current_dir(dir)
            .env_remove(VIRTUAL_ENV)
            .run_attached()
            .await;

        match outcome {
            CommandOutcome::Success { .. } => Ok(true),
            CommandOutcome::NotFound => {
                reporter.warning(&format!("{} not found, cannot start server", self.uv))?;
                Ok(false)
            }
            _ => {
                reporter.error("Failed to start the dev server")?;
                Ok(false)
            }
        }
    }
}

fn failure_line(prefix: &str, outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Failed { stderr, .. } => match stderr.lines().next() {
            Some(first) if !first.trim().is_empty() => format!("{}: {}", prefix, first.trim()),
            _ => prefix.to_string(),
        },
        CommandOutcome::TimedOut => format!("{} (timed out)", prefix),
        _ => prefix.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::product::tests::TestProduct;
    use crate::product::ProductConfig;
    use crate::project::{GenerationRequest, ProjectKind, RoutingStrategy};
    use crate::report::memory::{Level, MemoryReporter};

    const MISSING: &str = "/nonexistent/tool-7731";

    #[tokio::test]
    async fn test_missing_git_is_a_warning() {
        let tmp = tempfile::tempdir().unwrap();
        let reporter = MemoryReporter::default();
        let tools = Toolchain::new(MISSING, "uv");

        let done = tools
            .init_repository(tmp.path(), "init", &reporter)
            .await
            .unwrap();

        assert!(!done);
        assert!(reporter.has(Level::Warning, "Git not found"));
    }

    #[tokio::test]
    async fn test_missing_uv_is_a_warning() {
        let tmp = tempfile::tempdir().unwrap();
        let reporter = MemoryReporter::default();
        let tools = Toolchain::new("git", MISSING);

        assert!(!tools.sync_environment(tmp.path(), &reporter).await.unwrap());
        assert!(reporter.has(Level::Warning, "not found, skipping sync"));

        assert!(!tools
            .start_dev_server(tmp.path(), &["pywire", "dev"], &reporter)
            .await
            .unwrap());
        assert!(reporter.has(Level::Warning, "cannot start server"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_git_stops_after_first_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let reporter = MemoryReporter::default();
        let tools = Toolchain::new("false", "uv");

        let done = tools
            .init_repository(tmp.path(), "init", &reporter)
            .await
            .unwrap();

        assert!(!done);
        assert_eq!(reporter.entries().len(), 1);
        assert!(reporter.has(Level::Warning, "Git init failed"));
    }

    // Generation succeeds, the sync failure is only a warning, and the
    // instructions tell the user to sync by hand.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_sync_failure_keeps_project_and_adds_manual_step() {
        let tmp = tempfile::tempdir().unwrap();
        let req = GenerationRequest::new(
            tmp.path().join("my-app"),
            ProjectKind::Counter,
            RoutingStrategy::PathBased,
            true,
            &[],
            "pywire",
        );
        let generated = generate(&req).await.unwrap();
        assert!(!generated.files.is_empty());

        let reporter = MemoryReporter::default();
        let tools = Toolchain::new(MISSING, "false");
        let synced = tools
            .sync_environment(&req.project_path, &reporter)
            .await
            .unwrap();

        assert!(!synced);
        assert!(reporter.has(Level::Warning, "Failed to sync environment"));
        assert!(!reporter.has(Level::Error, ""));
        assert!(req.project_path.join("pyproject.toml").is_file());

        let steps = TestProduct.next_steps("./my-app", synced);
        assert!(steps.iter().any(|s| s == "uv sync"));
    }

    #[test]
    fn test_failure_line_uses_first_stderr_line() {
        let outcome = CommandOutcome::Failed {
            code: Some(128),
            stderr: "Author identity unknown\n\n*** Please tell me who you are.".into(),
        };
        assert_eq!(
            failure_line("Git commit skipped", &outcome),
            "Git commit skipped: Author identity unknown"
        );
        assert_eq!(
            failure_line("x", &CommandOutcome::Failed { code: None, stderr: String::new() }),
            "x"
        );
    }
}
