//! Hook configuration module.
//!
//! Handles loading, validating, and merging `hooks.toml`. Stock defaults
//! describe the documentation site as it ships; a user `hooks.toml` overrides
//! only the keys it names.
//!
//! ## Config File Location
//!
//! The config file sits next to the site generator's own configuration. Its
//! parent directory is the *config directory*: asset sources and the relative
//! `docs_dir` / `site_dir` are resolved against it.
//!
//! ```text
//! assets/website/
//! ├── hooks.toml               # This file (optional, stock defaults otherwise)
//! ├── CNAME                    # Copied to site/CNAME after build
//! ├── docs/                    # docs_dir
//! │   ├── install.md.tmpl      # Template → install.md
//! │   ├── install.md.yaml      # Template data (optional)
//! │   └── ...
//! └── site/                    # site_dir (generated)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! docs_dir = "docs"
//! site_dir = "site"
//! non_website_paths = ["docs.go", "hooks.py"]
//! templates = ["index.md", "install.md"]
//!
//! [renderer]
//! program = "go"
//! args = ["run", "{config_dir}/../../internal/cmds/execute-template/main.go"]
//! on_failure = "fail"       # or "warn"
//!
//! [[assets]]
//! source = "CNAME"
//! destination = "CNAME"
//!
//! [yaml]
//! line_ending = "lf"        # or "crlf"
//! ```
//!
//! Lists replace their default wholesale; tables merge key by key.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Placeholder in renderer args replaced with the config directory.
pub const CONFIG_DIR_PLACEHOLDER: &str = "{config_dir}";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Hook configuration loaded from `hooks.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HooksConfig {
    /// Documentation source directory, relative to the config directory.
    pub docs_dir: String,
    /// Generated site directory, relative to the config directory.
    pub site_dir: String,
    /// Docs-relative paths that exist for build or test purposes and must
    /// never be published.
    pub non_website_paths: Vec<String>,
    /// Docs-relative output paths rendered from `<path>.tmpl` (and optional
    /// `<path>.yaml` data) before the build.
    pub templates: Vec<String>,
    /// External template renderer invocation.
    pub renderer: RendererConfig,
    /// Files copied into the site directory after the build.
    pub assets: Vec<AssetCopy>,
    /// YAML normalizer settings.
    pub yaml: YamlConfig,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_string(),
            site_dir: "site".to_string(),
            non_website_paths: strings(&[
                "docs.go",
                "hooks.py",
                "reference/commands/commands.go",
                "reference/commands/commands_test.go",
            ]),
            templates: strings(&[
                "index.md",
                "install.md",
                "links/articles.md",
                "links/podcasts.md",
                "links/videos.md",
                "reference/configuration-file/variables.md",
                "reference/release-history.md",
            ]),
            renderer: RendererConfig::default(),
            assets: vec![
                AssetCopy::new("CNAME", "CNAME"),
                AssetCopy::new("../scripts/install.sh", "get"),
                AssetCopy::new("../scripts/install-local-bin.sh", "getlb"),
                AssetCopy::new("../scripts/install.ps1", "get.ps1"),
                AssetCopy::new("../cosign/cosign.pub", "cosign.pub"),
            ],
            yaml: YamlConfig::default(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl HooksConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.docs_dir.is_empty() {
            return Err(ConfigError::Validation("docs_dir must not be empty".into()));
        }
        if self.site_dir.is_empty() {
            return Err(ConfigError::Validation("site_dir must not be empty".into()));
        }
        if self.renderer.program.is_empty() {
            return Err(ConfigError::Validation(
                "renderer.program must not be empty".into(),
            ));
        }
        for path in self.non_website_paths.iter().chain(&self.templates) {
            if !is_docs_relative(path) {
                return Err(ConfigError::Validation(format!(
                    "'{path}' must be a relative path inside docs_dir"
                )));
            }
        }
        for asset in &self.assets {
            if asset.source.is_empty() {
                return Err(ConfigError::Validation(
                    "assets.source must not be empty".into(),
                ));
            }
            if !is_docs_relative(&asset.destination) {
                return Err(ConfigError::Validation(format!(
                    "asset destination '{}' must be a relative path inside site_dir",
                    asset.destination
                )));
            }
        }
        Ok(())
    }
}

/// A docs-relative path is non-empty, relative, and never climbs out with `..`.
fn is_docs_relative(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// What to do when the template renderer fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Abort the build with the renderer's error.
    #[default]
    Fail,
    /// Log a warning and continue with the next template.
    Warn,
}

/// External template renderer invocation.
///
/// The renderer is run as `program args... [-data DATA] -output OUTPUT TEMPLATE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    pub program: String,
    /// Leading arguments. `{config_dir}` is replaced with the config directory.
    pub args: Vec<String>,
    pub on_failure: FailurePolicy,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            args: strings(&[
                "run",
                "{config_dir}/../../internal/cmds/execute-template/main.go",
            ]),
            on_failure: FailurePolicy::Fail,
        }
    }
}

impl RendererConfig {
    /// Leading arguments with `{config_dir}` substituted.
    pub fn resolved_args(&self, config_dir: &Path) -> Vec<String> {
        let dir = config_dir.to_string_lossy();
        self.args
            .iter()
            .map(|a| a.replace(CONFIG_DIR_PLACEHOLDER, &dir))
            .collect()
    }
}

/// One auxiliary file copied into the site after the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetCopy {
    /// Source path, relative to the config directory.
    pub source: String,
    /// Destination path, relative to the site directory.
    pub destination: String,
}

impl AssetCopy {
    pub fn new(source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
        }
    }
}

/// Line-ending convention for normalized YAML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// YAML normalizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct YamlConfig {
    pub line_ending: LineEnding,
}

impl Default for YamlConfig {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(HooksConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<HooksConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: HooksConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `hooks.toml` from the given path.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock defaults.
pub fn load_config(config_path: &Path) -> Result<HooksConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(config_path)?;
    resolve_config(base, overlay)
}

/// YAML normalizer settings from `hooks.toml`, for `fmt-yaml`.
///
/// The normalizer only needs `[yaml]`, so a config that is unreadable or
/// invalid elsewhere falls back to the defaults with a warning.
pub fn load_yaml_config(config_path: &Path) -> YamlConfig {
    match load_config(config_path) {
        Ok(config) => config.yaml,
        Err(e) => {
            log::warn!(
                "ignoring {} for YAML settings: {}",
                config_path.display(),
                e
            );
            YamlConfig::default()
        }
    }
}

/// Directory containing the config file; `.` for a bare file name.
pub fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Returns a fully-commented stock `hooks.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docs-hooks Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths are resolved against the directory containing this file.
# Lists replace the default list entirely. Unknown keys will cause an error.

# Documentation sources.
docs_dir = "docs"

# Generated site output.
site_dir = "site"

# Files under docs_dir that must never be published. Each one must exist.
non_website_paths = [
    "docs.go",
    "hooks.py",
    "reference/commands/commands.go",
    "reference/commands/commands_test.go",
]

# Pages rendered from <path>.tmpl, with <path>.yaml as data when present.
templates = [
    "index.md",
    "install.md",
    "links/articles.md",
    "links/podcasts.md",
    "links/videos.md",
    "reference/configuration-file/variables.md",
    "reference/release-history.md",
]

# ---------------------------------------------------------------------------
# Template renderer
# ---------------------------------------------------------------------------
# Invoked as: program args... [-data DATA] -output OUTPUT TEMPLATE
[renderer]
program = "go"
args = ["run", "{config_dir}/../../internal/cmds/execute-template/main.go"]

# "fail" aborts the build when the renderer fails; "warn" logs and continues.
on_failure = "fail"

# ---------------------------------------------------------------------------
# YAML normalizer
# ---------------------------------------------------------------------------
[yaml]
# "lf" or "crlf". Lines are never wrapped.
line_ending = "lf"

# ---------------------------------------------------------------------------
# Assets copied into site_dir after the build
# ---------------------------------------------------------------------------
# GitHub Pages domain.
[[assets]]
source = "CNAME"
destination = "CNAME"

# Installation scripts.
[[assets]]
source = "../scripts/install.sh"
destination = "get"

[[assets]]
source = "../scripts/install-local-bin.sh"
destination = "getlb"

[[assets]]
source = "../scripts/install.ps1"
destination = "get.ps1"

# Release signing key.
[[assets]]
source = "../cosign/cosign.pub"
destination = "cosign.pub"
"##
}
