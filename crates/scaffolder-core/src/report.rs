//! Status output seam
//!
//! Post-generation steps report through a [`Reporter`] passed by reference
//! instead of printing directly, so the interactive front end and tests can
//! each supply their own.

use std::io;

/// Sink for user-facing status lines
pub trait Reporter {
    fn info(&self, message: &str) -> io::Result<()>;

    fn success(&self, message: &str) -> io::Result<()>;

    /// Recoverable problem; the flow continues
    fn warning(&self, message: &str) -> io::Result<()>;

    fn error(&self, message: &str) -> io::Result<()>;
}
