//! Shared test utilities for the docs-hooks test suite.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let (tmp, ctx) = setup_site();
//! let report = build(&ctx, &sample_config(), &MockRenderer::new()).unwrap();
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::{AssetCopy, HooksConfig};
use crate::hooks::BuildContext;

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `(relative path, contents)` pairs under `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
    }
}

/// A small project tree:
///
/// ```text
/// <tmp>/
/// ├── scripts/install.sh
/// └── website/              # config dir
///     ├── CNAME
///     └── docs/
///         ├── hooks.py
///         ├── index.md.tmpl
///         ├── install.md.tmpl
///         ├── install.md.yaml
///         └── quick-start.md
/// ```
pub fn setup_site() -> (TempDir, BuildContext) {
    let tmp = TempDir::new().unwrap();
    write_tree(
        tmp.path(),
        &[
            ("scripts/install.sh", "#!/bin/sh\n"),
            ("website/CNAME", "docs.example.io\n"),
            ("website/docs/hooks.py", "# hook\n"),
            ("website/docs/index.md.tmpl", "# Home\n"),
            ("website/docs/install.md.tmpl", "# Install {{ .version }}\n"),
            ("website/docs/install.md.yaml", "version: 2.0.0\n"),
            ("website/docs/quick-start.md", "# Quick start\n"),
        ],
    );
    let ctx = BuildContext::from_config(&tmp.path().join("website/hooks.toml"), &sample_config());
    (tmp, ctx)
}

/// Config matching [`setup_site`].
pub fn sample_config() -> HooksConfig {
    HooksConfig {
        non_website_paths: vec!["hooks.py".into()],
        templates: vec!["index.md".into(), "install.md".into()],
        assets: vec![
            AssetCopy::new("CNAME", "CNAME"),
            AssetCopy::new("../scripts/install.sh", "get"),
        ],
        ..HooksConfig::default()
    }
}
