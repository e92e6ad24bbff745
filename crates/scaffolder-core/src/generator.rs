//! Turns a generation request into files on disk
//!
//! The generator computes three roots (project, app, pages), creates them, then
//! walks the artifact specs from [`crate::templates::layout`], rendering or
//! copying each one. Files that already exist are overwritten.

use crate::project::GenerationRequest;
use crate::templates::layout::{self, ArtifactSpec, ContextKind, Root};
use crate::templates::TemplateRenderer;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

/// The three directories every artifact path is relative to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub project_root: PathBuf,
    pub app_root: PathBuf,
    pub pages_root: PathBuf,
}

impl ProjectPaths {
    pub fn new(project_root: &Path, use_src: bool) -> Self {
        let project_root = project_root.to_path_buf();
        let app_root = if use_src {
            project_root.join("src")
        } else {
            project_root.clone()
        };
        let pages_root = app_root.join("pages");

        Self {
            project_root,
            app_root,
            pages_root,
        }
    }

    pub fn root(&self, root: Root) -> &Path {
        match root {
            Root::Project => &self.project_root,
            Root::App => &self.app_root,
            Root::Pages => &self.pages_root,
        }
    }
}

/// What a generation run wrote
#[derive(Debug, Clone, Default)]
pub struct GeneratedProject {
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
}

/// Generates a project from one request
pub struct ProjectGenerator<'a> {
    request: &'a GenerationRequest,
    renderer: TemplateRenderer,
    paths: ProjectPaths,
}

impl<'a> ProjectGenerator<'a> {
    pub fn new(request: &'a GenerationRequest) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let paths = ProjectPaths::new(&request.project_path, request.use_src);

        Ok(Self {
            request,
            renderer,
            paths,
        })
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Create the directory tree and write every artifact for the request
    #[instrument(skip_all, fields(kind = %self.request.kind, routing = %self.request.routing))]
    pub async fn generate(&self) -> Result<GeneratedProject> {
        let mut generated = GeneratedProject::default();

        for dir in [
            &self.paths.project_root,
            &self.paths.app_root,
            &self.paths.pages_root,
        ] {
            self.create_dir(dir, &mut generated).await?;
        }

        let kind_layout = layout::kind_layout(self.request.kind, self.request.routing);
        for spec in kind_layout.directories {
            let dir = self.paths.root(spec.root).join(spec.path);
            self.create_dir(&dir, &mut generated).await?;
        }

        let artifacts = layout::artifacts_for(
            self.request.kind,
            self.request.routing,
            &self.request.adapters,
        );
        for spec in artifacts {
            let dest = self.write_artifact(spec).await?;
            generated.files.push(dest);
        }

        debug!(files = generated.files.len(), "project generated");
        Ok(generated)
    }

    async fn create_dir(&self, dir: &Path, generated: &mut GeneratedProject) -> Result<()> {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        if !generated.directories.iter().any(|d| d == dir) {
            generated.directories.push(dir.to_path_buf());
        }
        Ok(())
    }

    async fn write_artifact(&self, spec: &ArtifactSpec) -> Result<PathBuf> {
        let dest = self.paths.root(spec.root).join(spec.path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        if spec.parameterized {
            let context = self.context(spec.context);
            let content = self.renderer.render(spec.template, &context)?;
            fs::write(&dest, content)
                .await
                .with_context(|| format!("Failed to write file: {}", dest.display()))?;
        } else {
            self.renderer.copy(spec.template, &dest).await?;
        }

        debug!(template = spec.template, dest = %dest.display(), "wrote artifact");
        Ok(dest)
    }

    fn context(&self, kind: ContextKind) -> Value {
        let request = self.request;
        match kind {
            ContextKind::Project => json!({
                "project_name": request.project_name,
                "routing": request.routing.id(),
                "explicit": request.routing == crate::project::RoutingStrategy::Explicit,
            }),
            ContextKind::Manifest => json!({
                "project_name": request.project_name,
                "dependencies": request.dependencies(),
                "deploy_config": request.adapters.first().map(|a| json!({ "adapter": a.id() })),
            }),
            ContextKind::Readme => json!({
                "project_name": request.project_name,
                "template_description": request.kind.description(),
                "routing_style": request.routing.display_name(),
            }),
            ContextKind::Entrypoint => json!({
                "pages_dir": if request.use_src { "src/pages" } else { "pages" },
            }),
        }
    }
}

/// Convenience wrapper: build a generator and run it
pub async fn generate(request: &GenerationRequest) -> Result<GeneratedProject> {
    ProjectGenerator::new(request)?.generate().await
}
