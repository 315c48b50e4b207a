//! Build lifecycle hooks.
//!
//! The site generator calls three hooks at fixed points of its build:
//!
//! ```text
//! pre_build   docs/*.tmpl   →  docs/*        (render templated pages)
//! on_files    FileSet       →  FileSet       (drop non-website sources)
//! post_build  ../scripts/…  →  site/get …    (copy auxiliary assets)
//! ```
//!
//! Each hook is a plain function over a [`BuildContext`] so any host can
//! drive it. [`build`] runs them in lifecycle order with a minimal publish
//! step in between, copying the filtered sources verbatim into the site
//! directory; turning Markdown into HTML is the host generator's job.

use crate::assets::{self, AssetError, CopiedAsset};
use crate::config::{self, HooksConfig};
use crate::files::{self, FileSet, FilterError};
use crate::render::{self, ExpandReport, RenderError, RenderJob, Renderer};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Template expansion failed: {0}")]
    Render(#[from] RenderError),
    #[error("File filter failed: {0}")]
    Filter(#[from] FilterError),
    #[error("Asset copy failed: {0}")]
    Asset(#[from] AssetError),
}

/// Directories a hook runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Directory holding the hook config; asset sources resolve against it.
    pub config_dir: PathBuf,
    pub docs_dir: PathBuf,
    pub site_dir: PathBuf,
}

impl BuildContext {
    /// Resolve `docs_dir` and `site_dir` from config, relative to the
    /// directory containing `config_path`.
    pub fn from_config(config_path: &Path, config: &HooksConfig) -> Self {
        let config_dir = config::config_dir(config_path);
        Self {
            docs_dir: config_dir.join(&config.docs_dir),
            site_dir: config_dir.join(&config.site_dir),
            config_dir,
        }
    }

    pub fn with_docs_dir(mut self, docs_dir: PathBuf) -> Self {
        self.docs_dir = docs_dir;
        self
    }

    pub fn with_site_dir(mut self, site_dir: PathBuf) -> Self {
        self.site_dir = site_dir;
        self
    }
}

/// Before the build: render every templated page.
pub fn pre_build(
    ctx: &BuildContext,
    config: &HooksConfig,
    renderer: &dyn Renderer,
) -> Result<ExpandReport, HookError> {
    Ok(render::expand_templates(
        &config.templates,
        &ctx.docs_dir,
        renderer,
        config.renderer.on_failure,
    )?)
}

/// After file discovery: drop everything that must not be published.
pub fn on_files(files: FileSet, config: &HooksConfig) -> Result<FileSet, HookError> {
    Ok(files::filter_files(
        files,
        &config.non_website_paths,
        &config.templates,
    )?)
}

/// After the build: copy auxiliary assets into the site root.
pub fn post_build(ctx: &BuildContext, config: &HooksConfig) -> Result<Vec<CopiedAsset>, HookError> {
    Ok(assets::copy_assets(
        &config.assets,
        &ctx.config_dir,
        &ctx.site_dir,
    )?)
}

/// Copy each file of the set into `site_dir` under its `src_uri`.
pub fn publish(files: &FileSet, site_dir: &Path) -> Result<usize, HookError> {
    for file in files.iter() {
        let dest = site_dir.join(&file.src_uri);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| HookError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::copy(&file.abs_path, &dest).map_err(|source| HookError::Io {
            path: dest.clone(),
            source,
        })?;
    }
    log::info!("Published {} files to {}", files.len(), site_dir.display());
    Ok(files.len())
}

/// Everything a full [`build`] did.
#[derive(Debug)]
pub struct BuildReport {
    pub expanded: ExpandReport,
    pub published: FileSet,
    pub assets: Vec<CopiedAsset>,
}

/// Run pre-build, discovery, filtering, publish, and post-build in order.
pub fn build(
    ctx: &BuildContext,
    config: &HooksConfig,
    renderer: &dyn Renderer,
) -> Result<BuildReport, HookError> {
    let expanded = pre_build(ctx, config, renderer)?;
    let discovered = FileSet::discover(&ctx.docs_dir)?;
    let published = on_files(discovered, config)?;
    publish(&published, &ctx.site_dir)?;
    let assets = post_build(ctx, config)?;
    Ok(BuildReport {
        expanded,
        published,
        assets,
    })
}

/// A configured path that does not exist on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPath {
    pub kind: &'static str,
    pub path: PathBuf,
}

/// Verify every configured input exists, without running anything.
pub fn check(ctx: &BuildContext, config: &HooksConfig) -> Vec<MissingPath> {
    let mut missing = Vec::new();
    let mut require = |kind: &'static str, path: PathBuf| {
        if !path.is_file() {
            missing.push(MissingPath { kind, path });
        }
    };

    for path in &config.non_website_paths {
        require("non-website path", ctx.docs_dir.join(path));
    }
    for page in &config.templates {
        require("template", RenderJob::for_page(&ctx.docs_dir, page).template);
    }
    for asset in &config.assets {
        require("asset source", ctx.config_dir.join(&asset.source));
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssetCopy, FailurePolicy};
    use crate::render::backend::tests::MockRenderer;
    use crate::test_helpers::{sample_config, setup_site};

    #[test]
    fn context_resolves_against_config_dir() {
        let config = HooksConfig::default();
        let ctx = BuildContext::from_config(Path::new("assets/website/hooks.toml"), &config);
        assert_eq!(ctx.config_dir, PathBuf::from("assets/website"));
        assert_eq!(ctx.docs_dir, PathBuf::from("assets/website/docs"));
        assert_eq!(ctx.site_dir, PathBuf::from("assets/website/site"));
    }

    #[test]
    fn context_overrides() {
        let ctx = BuildContext::from_config(Path::new("hooks.toml"), &HooksConfig::default())
            .with_docs_dir("/tmp/docs".into())
            .with_site_dir("/tmp/site".into());
        assert_eq!(ctx.docs_dir, PathBuf::from("/tmp/docs"));
        assert_eq!(ctx.site_dir, PathBuf::from("/tmp/site"));
        assert_eq!(ctx.config_dir, PathBuf::from("."));
    }

    #[test]
    fn build_runs_all_stages() {
        let (tmp, ctx) = setup_site();
        let config = sample_config();
        let renderer = MockRenderer::new();

        let report = build(&ctx, &config, &renderer).unwrap();

        assert_eq!(report.expanded.rendered.len(), 2);
        assert_eq!(
            report.published.src_uris(),
            vec!["index.md", "install.md", "quick-start.md"]
        );
        assert_eq!(report.assets.len(), 2);

        let site = tmp.path().join("website/site");
        assert!(site.join("install.md").is_file());
        assert!(site.join("get").is_file());
        assert!(site.join("CNAME").is_file());
        assert!(!site.join("install.md.tmpl").exists());
        assert!(!site.join("hooks.py").exists());
    }

    #[test]
    fn build_stops_on_renderer_failure() {
        let (tmp, ctx) = setup_site();
        let config = sample_config();
        let renderer = MockRenderer::failing_on(&["index.md.tmpl"]);

        let err = build(&ctx, &config, &renderer).unwrap_err();

        assert!(matches!(err, HookError::Render(RenderError::Failed { .. })));
        assert!(!tmp.path().join("website/site").exists());
    }

    #[test]
    fn build_continues_when_failures_are_warnings() {
        let (_tmp, ctx) = setup_site();
        let mut config = sample_config();
        config.renderer.on_failure = FailurePolicy::Warn;
        let renderer = MockRenderer::failing_on(&["index.md.tmpl"]);

        let report = build(&ctx, &config, &renderer).unwrap();

        assert_eq!(report.expanded.failed.len(), 1);
        assert_eq!(report.assets.len(), 2);
    }

    #[test]
    fn post_build_missing_asset_is_fatal() {
        let (_tmp, ctx) = setup_site();
        let mut config = sample_config();
        config.assets.push(AssetCopy::new("../cosign/cosign.pub", "cosign.pub"));

        let err = post_build(&ctx, &config).unwrap_err();
        assert!(matches!(err, HookError::Asset(AssetError::MissingSource(_))));
    }

    #[test]
    fn check_passes_on_complete_tree() {
        let (_tmp, ctx) = setup_site();
        assert!(check(&ctx, &sample_config()).is_empty());
    }

    #[test]
    fn check_reports_every_missing_path() {
        let (_tmp, ctx) = setup_site();
        let mut config = sample_config();
        config.non_website_paths.push("docs.go".into());
        config.templates.push("links/videos.md".into());
        config.assets.push(AssetCopy::new("nope.pub", "nope.pub"));

        let missing = check(&ctx, &config);
        let kinds: Vec<&str> = missing.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, vec!["non-website path", "template", "asset source"]);
        assert_eq!(missing[1].path, ctx.docs_dir.join("links/videos.md.tmpl"));
    }
}
