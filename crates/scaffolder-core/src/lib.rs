//! Scaffolder Core - shared library for the PyWire project scaffolder
//!
//! This library turns a handful of answers (destination, starter kind, routing
//! style, layout, deployment adapters) into a new application tree on disk.
//!
//! # Architecture
//!
//! The library is organized into layers, each only calling the one below it:
//!
//! - **Layer 1: Assets** - templates embedded at compile time and the
//!   `(kind, routing)` table saying where each one lands
//! - **Layer 2: Generation** - `ProjectGenerator` renders or copies every artifact
//! - **Layer 3: Orchestration** - `ProductConfig`, settings, external tools
//!   (git, uv) and the optional cliclack prompt flow (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{generator, GenerationRequest, ProjectKind, RoutingStrategy};
//!
//! let request = GenerationRequest::new(
//!     "./my-app",
//!     ProjectKind::Blog,
//!     RoutingStrategy::PathBased,
//!     true,
//!     &[],
//!     "pywire",
//! );
//! let generated = generator::generate(&request).await?;
//! ```

pub mod config;
pub mod generator;
pub mod product;
pub mod project;
pub mod report;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{FrameworkSource, Settings};
pub use generator::{GeneratedProject, ProjectGenerator, ProjectPaths};
pub use product::ProductConfig;
pub use project::{DeployAdapter, GenerationRequest, ProjectKind, RoutingStrategy};
pub use report::Reporter;
pub use runtime::{CommandOutcome, ExternalCommand, Toolchain};
pub use templates::{TemplateError, TemplateRenderer};

#[cfg(feature = "tui")]
pub use tui::{run, FlowError};
