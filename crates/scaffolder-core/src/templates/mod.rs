//! Embedded templates and how they map onto a project tree
//!
//! This module provides:
//! - The static asset catalog (templates compiled into the binary)
//! - The (kind, routing) layout table listing every artifact to produce
//! - The renderer that substitutes context values or copies assets verbatim

pub mod catalog;
pub mod layout;
pub mod renderer;

pub use catalog::{lookup, Asset, ASSETS};
pub use layout::{artifacts_for, kind_layout, ArtifactSpec, ContextKind, DirSpec, KindLayout, Root};
pub use renderer::{TemplateError, TemplateRenderer};
