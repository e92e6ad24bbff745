//! Handlebars-backed rendering over the embedded catalog

use super::catalog::{self, Asset};
use anyhow::{Context, Result};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Failures that point at a packaging defect rather than a user mistake
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unknown template '{0}'")]
    Unknown(String),

    #[error("template '{0}' is static and has nothing to render")]
    NotParameterized(String),

    #[error("failed to parse template '{id}'")]
    Parse {
        id: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("failed to render template '{id}'")]
    Render {
        id: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

handlebars_helper!(toml_str: |value: str| escape_toml_basic(value));

/// Escape text for a TOML basic (double-quoted) string
fn escape_toml_basic(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Renders parameterized assets and copies static ones
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Parse every parameterized asset up front so a broken template fails before any file is written
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("toml_str", Box::new(toml_str));

        for asset in catalog::ASSETS.iter().filter(|a| a.parameterized) {
            registry
                .register_template_string(asset.id, asset.source)
                .map_err(|e| TemplateError::Parse {
                    id: asset.id.to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(Self { registry })
    }

    /// Render a parameterized asset with the given context
    pub fn render<T: Serialize>(&self, id: &str, context: &T) -> Result<String, TemplateError> {
        let asset = Self::asset(id)?;
        if !asset.parameterized {
            return Err(TemplateError::NotParameterized(id.to_string()));
        }

        self.registry
            .render(id, context)
            .map_err(|e| TemplateError::Render {
                id: id.to_string(),
                source: Box::new(e),
            })
    }

    /// Write a static asset to `dest` unmodified
    pub async fn copy(&self, id: &str, dest: &Path) -> Result<()> {
        let asset = Self::asset(id)?;
        fs::write(dest, asset.source.as_bytes())
            .await
            .with_context(|| format!("Failed to write file: {}", dest.display()))?;
        Ok(())
    }

    fn asset(id: &str) -> Result<&'static Asset, TemplateError> {
        catalog::lookup(id).ok_or_else(|| TemplateError::Unknown(id.to_string()))
    }
}
