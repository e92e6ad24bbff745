//! Which artifacts land where, for every (kind, routing) combination
//!
//! The generator never branches on the project kind itself; it walks the
//! static specs returned from here. Adding a kind means adding a table entry.

use crate::project::{DeployAdapter, ProjectKind, RoutingStrategy};

/// Directory an artifact path is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Root {
    /// The destination directory
    Project,
    /// `src/` under the project, or the project itself for a flat layout
    App,
    /// `pages/` under the app root
    Pages,
}

/// Shape of the render context an artifact needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    /// Project name and routing strategy
    Project,
    /// Dependency list and optional deploy record
    Manifest,
    /// Kind description and routing label
    Readme,
    /// Pages directory relative to the project root
    Entrypoint,
}

/// One file to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Catalog id
    pub template: &'static str,
    pub root: Root,
    /// Destination relative to `root`
    pub path: &'static str,
    /// Rendered through the template engine rather than copied verbatim
    pub parameterized: bool,
    pub context: ContextKind,
}

/// A directory that must exist even when no artifact is written into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirSpec {
    pub root: Root,
    pub path: &'static str,
}

/// Kind-specific additions for one routing strategy
#[derive(Debug)]
pub struct KindLayout {
    pub directories: &'static [DirSpec],
    pub artifacts: &'static [ArtifactSpec],
}

const fn render(template: &'static str, root: Root, path: &'static str, context: ContextKind) -> ArtifactSpec {
    ArtifactSpec {
        template,
        root,
        path,
        parameterized: true,
        context,
    }
}

const fn page(template: &'static str, path: &'static str) -> ArtifactSpec {
    render(template, Root::Pages, path, ContextKind::Project)
}

const fn copy(template: &'static str, root: Root, path: &'static str) -> ArtifactSpec {
    ArtifactSpec {
        template,
        root,
        path,
        parameterized: false,
        context: ContextKind::Project,
    }
}

const fn dir(root: Root, path: &'static str) -> DirSpec {
    DirSpec { root, path }
}

/// Written for every project regardless of kind
pub static SHARED: &[ArtifactSpec] = &[
    render("common/pyproject.toml", Root::Project, "pyproject.toml", ContextKind::Manifest),
    render("common/README.md", Root::Project, "README.md", ContextKind::Readme),
    copy("common/gitignore", Root::Project, ".gitignore"),
    copy("common/extensions.json", Root::Project, ".vscode/extensions.json"),
    copy("common/__error__.wire", Root::Pages, "__error__.wire"),
];

static MAIN_PATH: ArtifactSpec =
    render("common/main-path.py", Root::App, "main.py", ContextKind::Entrypoint);
static MAIN_EXPLICIT: ArtifactSpec =
    render("common/main-explicit.py", Root::App, "main.py", ContextKind::Entrypoint);

/// The application entry point; exactly one variant per routing strategy
pub fn entrypoint(routing: RoutingStrategy) -> &'static ArtifactSpec {
    match routing {
        RoutingStrategy::PathBased => &MAIN_PATH,
        RoutingStrategy::Explicit => &MAIN_EXPLICIT,
    }
}

static SKELETON: KindLayout = KindLayout {
    directories: &[],
    artifacts: &[page("skeleton/index.wire", "index.wire")],
};

static COUNTER_PATH: KindLayout = KindLayout {
    directories: &[],
    artifacts: &[
        page("counter/path-based/__layout__.wire", "__layout__.wire"),
        copy("counter/path-based/index.wire", Root::Pages, "index.wire"),
    ],
};

static COUNTER_EXPLICIT: KindLayout = KindLayout {
    directories: &[],
    artifacts: &[
        page("counter/explicit/layout.wire", "layout.wire"),
        copy("counter/explicit/home.wire", Root::Pages, "home.wire"),
    ],
};

static BLOG_PATH: KindLayout = KindLayout {
    directories: &[dir(Root::App, "data"), dir(Root::Pages, "posts")],
    artifacts: &[
        page("blog/path-based/__layout__.wire", "__layout__.wire"),
        page("blog/path-based/posts__layout__.wire", "posts/__layout__.wire"),
        copy("blog/path-based/index.wire", Root::Pages, "index.wire"),
        copy("blog/path-based/posts_index.wire", Root::Pages, "posts/index.wire"),
        copy("blog/path-based/posts_slug.wire", Root::Pages, "posts/[slug].wire"),
    ],
};

static BLOG_EXPLICIT: KindLayout = KindLayout {
    directories: &[dir(Root::App, "data")],
    artifacts: &[
        page("blog/explicit/layout.wire", "layout.wire"),
        copy("blog/explicit/home.wire", Root::Pages, "home.wire"),
        copy("blog/explicit/blog-posts.wire", Root::Pages, "blog-posts.wire"),
        copy("blog/explicit/about.wire", Root::Pages, "about.wire"),
    ],
};

static SAAS_PATH: KindLayout = KindLayout {
    directories: &[dir(Root::Pages, "dashboard")],
    artifacts: &[
        copy("saas/models.py", Root::App, "models.py"),
        page("saas/path-based/__layout__.wire", "__layout__.wire"),
        page("saas/path-based/dashboard__layout__.wire", "dashboard/__layout__.wire"),
        copy("saas/path-based/index.wire", Root::Pages, "index.wire"),
        copy("saas/path-based/pricing.wire", Root::Pages, "pricing.wire"),
        copy("saas/path-based/login.wire", Root::Pages, "login.wire"),
        copy("saas/path-based/dashboard_index.wire", Root::Pages, "dashboard/index.wire"),
        copy("saas/path-based/dashboard_settings.wire", Root::Pages, "dashboard/settings.wire"),
    ],
};

static SAAS_EXPLICIT: KindLayout = KindLayout {
    directories: &[],
    artifacts: &[
        copy("saas/models.py", Root::App, "models.py"),
        page("saas/explicit/public-layout.wire", "public-layout.wire"),
        page("saas/explicit/auth-layout.wire", "auth-layout.wire"),
        copy("saas/explicit/landing.wire", Root::Pages, "landing.wire"),
        copy("saas/explicit/pricing.wire", Root::Pages, "pricing.wire"),
        copy("saas/explicit/login.wire", Root::Pages, "login.wire"),
        copy("saas/explicit/dashboard-pages.wire", Root::Pages, "dashboard-pages.wire"),
    ],
};

/// Kind-specific layout for a (kind, routing) pair
pub fn kind_layout(kind: ProjectKind, routing: RoutingStrategy) -> &'static KindLayout {
    use ProjectKind::*;
    use RoutingStrategy::*;

    match (kind, routing) {
        (Skeleton, PathBased) | (Skeleton, Explicit) => &SKELETON,
        (Counter, PathBased) => &COUNTER_PATH,
        (Counter, Explicit) => &COUNTER_EXPLICIT,
        (Blog, PathBased) => &BLOG_PATH,
        (Blog, Explicit) => &BLOG_EXPLICIT,
        (Saas, PathBased) => &SAAS_PATH,
        (Saas, Explicit) => &SAAS_EXPLICIT,
    }
}

static DOCKERFILE: ArtifactSpec = copy("common/Dockerfile", Root::Project, "Dockerfile");
static RENDER_MANIFEST: ArtifactSpec =
    render("common/render.yaml", Root::Project, "render.yaml", ContextKind::Project);

/// Artifact produced by a deployment adapter
pub fn adapter_artifact(adapter: DeployAdapter) -> &'static ArtifactSpec {
    match adapter {
        DeployAdapter::Docker => &DOCKERFILE,
        DeployAdapter::Render => &RENDER_MANIFEST,
    }
}

/// Every artifact for a combination, in generation order
pub fn artifacts_for(
    kind: ProjectKind,
    routing: RoutingStrategy,
    adapters: &[DeployAdapter],
) -> Vec<&'static ArtifactSpec> {
    SHARED
        .iter()
        .chain(std::iter::once(entrypoint(routing)))
        .chain(kind_layout(kind, routing).artifacts.iter())
        .chain(adapters.iter().map(|a| adapter_artifact(*a)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::catalog;
    use std::collections::HashSet;

    fn every_artifact() -> Vec<&'static ArtifactSpec> {
        let mut all = Vec::new();
        for kind in ProjectKind::ALL {
            for routing in RoutingStrategy::ALL {
                all.extend(artifacts_for(kind, routing, &DeployAdapter::ALL));
            }
        }
        all
    }

    #[test]
    fn test_every_artifact_is_in_catalog() {
        for spec in every_artifact() {
            let asset = catalog::lookup(spec.template)
                .unwrap_or_else(|| panic!("missing catalog entry: {}", spec.template));
            assert_eq!(
                asset.parameterized, spec.parameterized,
                "parameterized flag mismatch for {}",
                spec.template
            );
        }
    }

    #[test]
    fn test_every_catalog_asset_is_used() {
        let used: HashSet<_> = every_artifact().iter().map(|s| s.template).collect();
        for asset in catalog::ASSETS {
            assert!(used.contains(asset.id), "unused asset: {}", asset.id);
        }
    }

    #[test]
    fn test_no_destination_collisions() {
        for kind in ProjectKind::ALL {
            for routing in RoutingStrategy::ALL {
                let specs = artifacts_for(kind, routing, &DeployAdapter::ALL);
                let dests: HashSet<_> = specs.iter().map(|s| (s.root, s.path)).collect();
                assert_eq!(dests.len(), specs.len(), "{kind}/{routing}");
            }
        }
    }

    #[test]
    fn test_entrypoint_variant_follows_routing() {
        assert_eq!(entrypoint(RoutingStrategy::PathBased).template, "common/main-path.py");
        assert_eq!(entrypoint(RoutingStrategy::Explicit).template, "common/main-explicit.py");
    }

    #[test]
    fn test_explicit_blog_stays_flat() {
        let layout = kind_layout(ProjectKind::Blog, RoutingStrategy::Explicit);
        assert!(layout.artifacts.iter().all(|a| !a.path.contains('/')));
        assert_eq!(layout.directories, &[dir(Root::App, "data")]);
    }
}
