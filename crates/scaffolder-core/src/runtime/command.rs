//! External command execution with a three-way outcome
//!
//! Every optional post-generation step shells out through [`ExternalCommand`].
//! Callers branch on [`CommandOutcome`] instead of catching errors, so a
//! missing or failing tool never aborts the flow.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

/// Result of running an external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Success { stdout: String },
    /// The program is not on PATH
    NotFound,
    /// The program ran and exited non-zero (or could not be spawned)
    Failed { code: Option<i32>, stderr: String },
    TimedOut,
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success { .. })
    }

    pub fn stdout(&self) -> Option<&str> {
        match self {
            CommandOutcome::Success { stdout } => Some(stdout),
            _ => None,
        }
    }
}

/// A blocking subprocess invocation
#[derive(Debug, Clone)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env_remove: Vec<String>,
    stdin: Option<String>,
    timeout: Option<Duration>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env_remove: Vec::new(),
            stdin: None,
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Drop a variable from the child's environment
    pub fn env_remove(mut self, key: impl Into<String>) -> Self {
        self.env_remove.push(key.into());
        self
    }

    /// Feed this text to the child's stdin
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// The command line as shown to the user
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn build(&self) -> TokioCommand {
        let mut cmd = TokioCommand::new(&self.program);
        cmd.args(&self.args).kill_on_drop(true);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        for key in &self.env_remove {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Run with captured output
    pub async fn output(&self) -> CommandOutcome {
        let mut cmd = self.build();
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd.stdin(if self.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        debug!(command = %self.display(), "running");

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => return spawn_failure(e),
        };

        if let (Some(input), Some(mut pipe)) = (&self.stdin, child.stdin.take()) {
            // A child that exits without reading stdin surfaces through its exit status
            let _ = pipe.write_all(input.as_bytes()).await;
        }

        let wait = child.wait_with_output();
        let result = match self.timeout {
            Some(limit) => match timeout(limit, wait).await {
                Ok(result) => result,
                Err(_) => {
                    debug!(command = %self.display(), "timed out");
                    return CommandOutcome::TimedOut;
                }
            },
            None => wait.await,
        };

        match result {
            Ok(output) if output.status.success() => CommandOutcome::Success {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            },
            Ok(output) => CommandOutcome::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            },
            Err(e) => CommandOutcome::Failed {
                code: None,
                stderr: e.to_string(),
            },
        }
    }

    /// Run attached to the terminal (stdio inherited); blocks until the child exits
    pub async fn run_attached(&self) -> CommandOutcome {
        let mut cmd = self.build();
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!(command = %self.display(), "running attached");

        match cmd.status().await {
            Ok(status) if status.success() => CommandOutcome::Success {
                stdout: String::new(),
            },
            Ok(status) => CommandOutcome::Failed {
                code: status.code(),
                stderr: String::new(),
            },
            Err(e) => spawn_failure(e),
        }
    }
}

fn spawn_failure(e: std::io::Error) -> CommandOutcome {
    if e.kind() == std::io::ErrorKind::NotFound {
        CommandOutcome::NotFound
    } else {
        CommandOutcome::Failed {
            code: None,
            stderr: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let outcome = ExternalCommand::new("definitely-not-a-real-tool-4821")
            .arg("--version")
            .output()
            .await;
        assert_eq!(outcome, CommandOutcome::NotFound);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_success_captures_stdout() {
        let outcome = ExternalCommand::new("sh")
            .args(["-c", "echo hello"])
            .output()
            .await;
        assert_eq!(outcome.stdout().map(str::trim), Some("hello"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failure_captures_stderr_and_code() {
        let outcome = ExternalCommand::new("sh")
            .args(["-c", "echo broken >&2; exit 3"])
            .output()
            .await;
        assert_eq!(
            outcome,
            CommandOutcome::Failed {
                code: Some(3),
                stderr: "broken".to_string()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdin_is_forwarded() {
        let outcome = ExternalCommand::new("cat").stdin("pywire\n").output().await;
        assert_eq!(outcome.stdout(), Some("pywire\n"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_env_remove() {
        std::env::set_var("SCAFFOLDER_TEST_MARKER", "1");
        let outcome = ExternalCommand::new("sh")
            .args(["-c", "echo \"${SCAFFOLDER_TEST_MARKER:-unset}\""])
            .env_remove("SCAFFOLDER_TEST_MARKER")
            .output()
            .await;
        assert_eq!(outcome.stdout().map(str::trim), Some("unset"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout() {
        let outcome = ExternalCommand::new("sleep")
            .arg("5")
            .timeout(Duration::from_millis(100))
            .output()
            .await;
        assert_eq!(outcome, CommandOutcome::TimedOut);
    }

    #[test]
    fn test_display() {
        let cmd = ExternalCommand::new("git").args(["commit", "-m", "init"]);
        assert_eq!(cmd.display(), "git commit -m init");
    }
}
