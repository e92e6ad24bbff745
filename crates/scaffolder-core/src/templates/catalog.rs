//! Static asset catalog
//!
//! Every template is embedded into the binary at compile time. Parameterized
//! assets live on disk with a `.hbs` suffix which is not part of their id.

/// One embedded template artifact
#[derive(Debug, Clone, Copy)]
pub struct Asset {
    /// Logical identifier, e.g. `counter/path-based/index.wire`
    pub id: &'static str,
    /// Raw template text
    pub source: &'static str,
    /// Whether the source contains substitutions and must go through the renderer
    pub parameterized: bool,
}

macro_rules! rendered {
    ($id:literal) => {
        Asset {
            id: $id,
            source: include_str!(concat!("../../templates/", $id, ".hbs")),
            parameterized: true,
        }
    };
}

macro_rules! verbatim {
    ($id:literal) => {
        Asset {
            id: $id,
            source: include_str!(concat!("../../templates/", $id)),
            parameterized: false,
        }
    };
}

/// The full catalog, grouped by kind and routing strategy
pub static ASSETS: &[Asset] = &[
    // Shared by every project
    rendered!("common/pyproject.toml"),
    rendered!("common/README.md"),
    verbatim!("common/gitignore"),
    verbatim!("common/extensions.json"),
    rendered!("common/main-path.py"),
    rendered!("common/main-explicit.py"),
    verbatim!("common/__error__.wire"),
    // Deployment adapters
    verbatim!("common/Dockerfile"),
    rendered!("common/render.yaml"),
    // Skeleton
    rendered!("skeleton/index.wire"),
    // Counter
    rendered!("counter/path-based/__layout__.wire"),
    verbatim!("counter/path-based/index.wire"),
    rendered!("counter/explicit/layout.wire"),
    verbatim!("counter/explicit/home.wire"),
    // Blog
    rendered!("blog/path-based/__layout__.wire"),
    rendered!("blog/path-based/posts__layout__.wire"),
    verbatim!("blog/path-based/index.wire"),
    verbatim!("blog/path-based/posts_index.wire"),
    verbatim!("blog/path-based/posts_slug.wire"),
    rendered!("blog/explicit/layout.wire"),
    verbatim!("blog/explicit/home.wire"),
    verbatim!("blog/explicit/blog-posts.wire"),
    verbatim!("blog/explicit/about.wire"),
    // SaaS
    verbatim!("saas/models.py"),
    rendered!("saas/path-based/__layout__.wire"),
    rendered!("saas/path-based/dashboard__layout__.wire"),
    verbatim!("saas/path-based/index.wire"),
    verbatim!("saas/path-based/pricing.wire"),
    verbatim!("saas/path-based/login.wire"),
    verbatim!("saas/path-based/dashboard_index.wire"),
    verbatim!("saas/path-based/dashboard_settings.wire"),
    rendered!("saas/explicit/public-layout.wire"),
    rendered!("saas/explicit/auth-layout.wire"),
    verbatim!("saas/explicit/landing.wire"),
    verbatim!("saas/explicit/pricing.wire"),
    verbatim!("saas/explicit/login.wire"),
    verbatim!("saas/explicit/dashboard-pages.wire"),
];

/// Look up an asset by id
pub fn lookup(id: &str) -> Option<&'static Asset> {
    ASSETS.iter().find(|asset| asset.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = ASSETS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ASSETS.len());
    }

    #[test]
    fn test_lookup() {
        let asset = lookup("saas/models.py").unwrap();
        assert!(!asset.parameterized);
        assert!(asset.source.contains("class Subscription"));

        assert!(lookup("common/pyproject.toml.hbs").is_none());
        assert!(lookup("nope").is_none());
    }

    #[test]
    fn test_verbatim_assets_are_nonempty() {
        for asset in ASSETS.iter().filter(|a| !a.parameterized) {
            assert!(!asset.source.trim().is_empty(), "{} is empty", asset.id);
        }
    }
}
