//! # docs-hooks
//!
//! Build hooks for the documentation website, plus a YAML normalizer for the
//! data files that feed it.
//!
//! # Architecture: Three Lifecycle Hooks
//!
//! The static-site generator owns the build; these hooks run at three fixed
//! points of it:
//!
//! ```text
//! 1. pre-build   render docs/<page> from <page>.tmpl (+ <page>.yaml)
//! 2. files       drop non-website sources and template inputs from the publish set
//! 3. post-build  copy CNAME, install scripts, and the signing key into site/
//! ```
//!
//! The hooks share nothing but the on-disk tree and the [`files::FileSet`]
//! the host passes from discovery to filtering. Each is a plain function in
//! [`hooks`]; the `docs-hooks` binary runs them one at a time or in order.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`hooks`] | `BuildContext` and the three hook entry points |
//! | [`render`] | Template expansion through an external renderer |
//! | [`files`] | Discovered file set and the publish filter |
//! | [`assets`] | Post-build copy table |
//! | [`yamlfmt`] | In-place YAML normalization (line endings, no wrapping) |
//! | [`config`] | `hooks.toml` loading, defaults, and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Renderer Is External
//!
//! Templated pages are rendered by a separate executable that already knows
//! the project's template functions. [`render::Renderer`] is the seam:
//! [`render::CommandRenderer`] spawns the executable, tests substitute a
//! recording mock. Renderer failures abort the build unless `hooks.toml`
//! sets `renderer.on_failure = "warn"`.
//!
//! ## Missing Inputs Are Fatal
//!
//! Every configured template, non-website path, and asset source must exist.
//! A missing one means the configuration and the tree have drifted, and a
//! silently incomplete site is worse than a failed build. `docs-hooks check`
//! lists every such path up front.

pub mod assets;
pub mod config;
pub mod files;
pub mod hooks;
pub mod output;
pub mod render;
pub mod yamlfmt;

#[cfg(test)]
pub(crate) mod test_helpers;
