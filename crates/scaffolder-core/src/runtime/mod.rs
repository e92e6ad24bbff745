//! External tools
//!
//! This module provides:
//! - A subprocess wrapper with a success / not-found / failed outcome
//! - The best-effort framework version query
//! - Post-generation steps (git, uv sync, dev server)

pub mod command;
pub mod resolve;
pub mod toolchain;

pub use command::{CommandOutcome, ExternalCommand};
pub use resolve::{version_label, UvVersionQuery, VersionQuery, RESOLVE_TIMEOUT};
pub use toolchain::Toolchain;
