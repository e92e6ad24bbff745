//! Generation request types: project kind, routing strategy, layout and adapters

use std::fmt;
use std::path::{Path, PathBuf};

/// Starter template category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    Skeleton,
    Counter,
    Blog,
    Saas,
}

impl ProjectKind {
    /// All kinds in prompt order; the first entry is the default
    pub const ALL: [ProjectKind; 4] = [
        ProjectKind::Skeleton,
        ProjectKind::Counter,
        ProjectKind::Blog,
        ProjectKind::Saas,
    ];

    /// Identifier used in template paths and diagnostics
    pub fn id(&self) -> &'static str {
        match self {
            ProjectKind::Skeleton => "skeleton",
            ProjectKind::Counter => "counter",
            ProjectKind::Blog => "blog",
            ProjectKind::Saas => "saas",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectKind::Skeleton => "Skeleton (minimal)",
            ProjectKind::Counter => "Counter",
            ProjectKind::Blog => "Blog/Portfolio (Markdown + SQLite)",
            ProjectKind::Saas => "SaaS Starter (Stripe + SQLAlchemy + Auth Stub)",
        }
    }

    /// One-line description written into the generated README
    pub fn description(&self) -> &'static str {
        match self {
            ProjectKind::Skeleton => "A blank slate with only a single page.",
            ProjectKind::Counter => "A minimal counter app demonstrating interactivity.",
            ProjectKind::Blog => {
                "A blog and portfolio starter with Markdown content stored in SQLite."
            }
            ProjectKind::Saas => {
                "A SaaS starter with Stripe, SQLAlchemy models, and stubbed auth."
            }
        }
    }

    /// Dependencies this kind needs on top of the framework itself
    pub fn extra_dependencies(&self) -> &'static [&'static str] {
        match self {
            ProjectKind::Skeleton | ProjectKind::Counter => &[],
            ProjectKind::Blog => &["markdown>=3.6"],
            ProjectKind::Saas => &["stripe>=7.0.0", "sqlalchemy>=2.0.0"],
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// How pages are addressed by the generated application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingStrategy {
    /// Routes follow the file layout under `pages/`
    PathBased,
    /// Every page declares its own route
    Explicit,
}

impl RoutingStrategy {
    pub const ALL: [RoutingStrategy; 2] = [RoutingStrategy::PathBased, RoutingStrategy::Explicit];

    pub fn id(&self) -> &'static str {
        match self {
            RoutingStrategy::PathBased => "path",
            RoutingStrategy::Explicit => "explicit",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoutingStrategy::PathBased => "Path-based",
            RoutingStrategy::Explicit => "Explicit",
        }
    }
}

impl fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Optional deployment add-ons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DeployAdapter {
    /// Container build file
    Docker,
    /// Render platform manifest
    Render,
}

impl DeployAdapter {
    pub const ALL: [DeployAdapter; 2] = [DeployAdapter::Docker, DeployAdapter::Render];

    pub fn id(&self) -> &'static str {
        match self {
            DeployAdapter::Docker => "docker",
            DeployAdapter::Render => "render",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeployAdapter::Docker => "Docker (Dockerfile)",
            DeployAdapter::Render => "Render (render.yaml)",
        }
    }
}

/// Everything the generator needs to materialize one project
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub project_path: PathBuf,
    pub project_name: String,
    pub kind: ProjectKind,
    pub routing: RoutingStrategy,
    pub use_src: bool,
    pub adapters: Vec<DeployAdapter>,
    /// Requirement string for the framework package (e.g. `pywire==0.1.4`)
    pub framework_requirement: String,
}

impl GenerationRequest {
    /// Build a request, deriving the project name from the destination's last segment.
    /// Adapters are de-duplicated and kept in prompt order.
    pub fn new(
        project_path: impl Into<PathBuf>,
        kind: ProjectKind,
        routing: RoutingStrategy,
        use_src: bool,
        adapters: &[DeployAdapter],
        framework_requirement: impl Into<String>,
    ) -> Self {
        let project_path = project_path.into();
        let project_name = project_name_for(&project_path);

        let mut adapters = adapters.to_vec();
        adapters.sort();
        adapters.dedup();

        Self {
            project_path,
            project_name,
            kind,
            routing,
            use_src,
            adapters,
            framework_requirement: framework_requirement.into(),
        }
    }

    pub fn has_adapter(&self, adapter: DeployAdapter) -> bool {
        self.adapters.contains(&adapter)
    }

    /// Dependency list for the manifest: framework first, then kind extras, no duplicates
    pub fn dependencies(&self) -> Vec<String> {
        let mut deps = vec![self.framework_requirement.clone()];
        for extra in self.kind.extra_dependencies() {
            if !deps.iter().any(|d| d == extra) {
                deps.push((*extra).to_string());
            }
        }
        deps
    }
}

fn project_name_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}
