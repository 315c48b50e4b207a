//! CLI output formatting for every hook.
//!
//! Each hook has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Pre-build
//!
//! ```text
//! Templates
//! 001 index.md
//! 002 install.md
//!     Data: install.md.yaml
//! 003 links/videos.md (failed: exit status: 1)
//! ```
//!
//! ## Files
//!
//! ```text
//! Published files
//! 001 index.md
//! 002 install.md
//! ```
//!
//! ## Post-build
//!
//! ```text
//! Assets
//! 001 get (412 bytes)
//!     Source: ../scripts/install.sh
//! ```

use crate::assets::CopiedAsset;
use crate::files::FileSet;
use crate::hooks::MissingPath;
use crate::render::ExpandReport;
use crate::yamlfmt::Normalized;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `path` relative to `base` when possible, for display.
fn relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

// ============================================================================
// Pre-build
// ============================================================================

/// Format the template expansion report, rendered pages first.
pub fn format_expand_report(report: &ExpandReport, docs_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Templates".to_string()];
    let mut pos = 0;

    for job in &report.rendered {
        pos += 1;
        lines.push(format!(
            "{} {}",
            format_index(pos),
            relative(&job.output, docs_dir)
        ));
        if let Some(data) = &job.data {
            lines.push(format!("{}Data: {}", indent(1), relative(data, docs_dir)));
        }
    }
    for (job, reason) in &report.failed {
        pos += 1;
        lines.push(format!(
            "{} {} (failed: {})",
            format_index(pos),
            relative(&job.output, docs_dir),
            reason
        ));
    }
    lines
}

pub fn print_expand_report(report: &ExpandReport, docs_dir: &Path) {
    for line in format_expand_report(report, docs_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Files
// ============================================================================

/// Format the published file list.
pub fn format_file_list(files: &FileSet) -> Vec<String> {
    let mut lines = vec!["Published files".to_string()];
    for (i, uri) in files.src_uris().into_iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), uri));
    }
    lines
}

pub fn print_file_list(files: &FileSet) {
    for line in format_file_list(files) {
        println!("{}", line);
    }
}

// ============================================================================
// Post-build
// ============================================================================

/// Format copied assets with their sources as context lines.
pub fn format_assets(copied: &[CopiedAsset], config_dir: &Path, site_dir: &Path) -> Vec<String> {
    let mut lines = vec!["Assets".to_string()];
    for (i, asset) in copied.iter().enumerate() {
        lines.push(format!(
            "{} {} ({} bytes)",
            format_index(i + 1),
            relative(&asset.destination, site_dir),
            asset.bytes
        ));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            relative(&asset.source, config_dir)
        ));
    }
    lines
}

pub fn print_assets(copied: &[CopiedAsset], config_dir: &Path, site_dir: &Path) {
    for line in format_assets(copied, config_dir, site_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check(missing: &[MissingPath]) -> Vec<String> {
    missing
        .iter()
        .map(|m| format!("missing {}: {}", m.kind, m.path.display()))
        .collect()
}

// ============================================================================
// YAML
// ============================================================================

pub fn format_normalized(results: &[Normalized]) -> Vec<String> {
    results
        .iter()
        .map(|r| {
            let status = if r.changed { "normalized" } else { "unchanged" };
            format!("{status} {}", r.path.display())
        })
        .collect()
}
