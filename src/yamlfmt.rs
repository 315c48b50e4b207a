//! YAML normalization.
//!
//! Rewrites YAML files in a single canonical layout so that hand edits and
//! generated data produce the same bytes, whatever editor or platform they
//! came from. Each document is parsed into a [`Value`] and written back with
//! `serde_yaml_ng`'s emitter:
//!
//! ```yaml
//! title: Install
//! version: '2.0'            # quoted when plain would change type
//! platforms:
//! - name: linux
//!   mirrors: []
//! notes: |                  # literal blocks for multi-line text
//!   First line.
//!   Second line.
//! ```
//!
//! - Lines are never wrapped.
//! - Line endings are forced to the configured convention.
//! - Multiple documents are separated with `---`.
//! - Comments are dropped: `serde_yaml_ng` does not surface them.
//!
//! Normalizing normalized output is a no-op, byte for byte.
//!
//! # Failure
//!
//! A file is read, parsed, and re-emitted in memory before anything is
//! written back, so a parse error leaves it untouched. Processing stops at
//! the first failing file.

use crate::config::YamlConfig;
use serde::Deserialize;
use serde_yaml_ng::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum YamlError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
}

/// Outcome for one normalized file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub path: PathBuf,
    /// False when the file was already normalized and left alone.
    pub changed: bool,
}

/// Normalize each file in order, stopping at the first failure.
pub fn normalize_files(
    paths: &[PathBuf],
    config: &YamlConfig,
) -> Result<Vec<Normalized>, YamlError> {
    paths.iter().map(|p| normalize_file(p, config)).collect()
}

/// Normalize a single file in place.
///
/// The file is only rewritten when its normalized bytes differ.
pub fn normalize_file(path: &Path, config: &YamlConfig) -> Result<Normalized, YamlError> {
    let input = fs::read_to_string(path).map_err(|source| YamlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let output = normalize_str(&input, config).map_err(|source| YamlError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    let changed = output != input;
    if changed {
        fs::write(path, &output).map_err(|source| YamlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("normalized {}", path.display());
    } else {
        log::debug!("unchanged {}", path.display());
    }

    Ok(Normalized {
        path: path.to_path_buf(),
        changed,
    })
}

/// Parse every document in `input` and emit it in canonical layout.
pub fn normalize_str(input: &str, config: &YamlConfig) -> Result<String, serde_yaml_ng::Error> {
    if input.trim().is_empty() {
        return Ok(String::new());
    }

    let mut emitted = Vec::new();
    for document in serde_yaml_ng::Deserializer::from_str(input) {
        let value = Value::deserialize(document)?;
        emitted.push(serde_yaml_ng::to_string(&value)?);
    }
    let out = emitted.join("---\n");

    let newline = config.line_ending.as_str();
    Ok(if newline == "\n" {
        out
    } else {
        out.replace('\n', newline)
    })
}
