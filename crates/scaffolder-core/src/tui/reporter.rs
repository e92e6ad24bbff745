//! Reporter backed by cliclack's log lines

use crate::report::Reporter;
use std::io;

/// Writes status lines in the same style as the prompts
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackReporter;

impl Reporter for CliclackReporter {
    fn info(&self, message: &str) -> io::Result<()> {
        cliclack::log::info(message)
    }

    fn success(&self, message: &str) -> io::Result<()> {
        cliclack::log::success(message)
    }

    fn warning(&self, message: &str) -> io::Result<()> {
        cliclack::log::warning(message)
    }

    fn error(&self, message: &str) -> io::Result<()> {
        cliclack::log::error(message)
    }
}
