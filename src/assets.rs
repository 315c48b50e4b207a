//! Post-build asset copying.
//!
//! A handful of files live outside the docs tree but must be served from the
//! site root: the GitHub Pages `CNAME`, the install scripts (served as `get`,
//! `getlb`, `get.ps1`), and the release signing key. Each entry in the copy
//! table names a source relative to the config directory and a destination
//! relative to the site directory.

use crate::config::AssetCopy;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error copying {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Asset source not found: {0}")]
    MissingSource(PathBuf),
}

/// A resolved copy: absolute-or-cwd-relative source and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedAsset {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes: u64,
}

/// Copy every asset in `table` into `site_dir`, overwriting existing files.
///
/// Stops at the first missing source.
pub fn copy_assets(
    table: &[AssetCopy],
    config_dir: &Path,
    site_dir: &Path,
) -> Result<Vec<CopiedAsset>, AssetError> {
    let mut copied = Vec::with_capacity(table.len());

    for asset in table {
        let source = config_dir.join(&asset.source);
        let destination = site_dir.join(&asset.destination);
        if !source.is_file() {
            return Err(AssetError::MissingSource(source));
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| AssetError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let bytes = fs::copy(&source, &destination).map_err(|e| AssetError::Io {
            path: destination.clone(),
            source: e,
        })?;
        log::debug!("copied {} -> {}", source.display(), destination.display());
        copied.push(CopiedAsset {
            source,
            destination,
            bytes,
        });
    }

    log::info!("Asset copy: {} files", copied.len());
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_tree;
    use tempfile::TempDir;

    #[test]
    fn copies_bytes_verbatim() {
        let tmp = TempDir::new().unwrap();
        let config_dir = tmp.path().join("website");
        write_tree(
            tmp.path(),
            &[
                ("website/CNAME", "example.io\n"),
                ("scripts/install.sh", "#!/bin/sh\necho hi\n"),
            ],
        );
        let site = tmp.path().join("website/site");

        let table = vec![
            AssetCopy::new("CNAME", "CNAME"),
            AssetCopy::new("../scripts/install.sh", "get"),
        ];
        let copied = copy_assets(&table, &config_dir, &site).unwrap();

        assert_eq!(copied.len(), 2);
        assert_eq!(fs::read(site.join("CNAME")).unwrap(), b"example.io\n");
        assert_eq!(
            fs::read(site.join("get")).unwrap(),
            fs::read(tmp.path().join("scripts/install.sh")).unwrap()
        );
        assert_eq!(copied[1].bytes, 18);
    }

    #[test]
    fn overwrites_existing_destination() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("CNAME", "new\n"), ("site/CNAME", "old\n")]);

        copy_assets(
            &[AssetCopy::new("CNAME", "CNAME")],
            tmp.path(),
            &tmp.path().join("site"),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("site/CNAME")).unwrap(),
            "new\n"
        );
    }

    #[test]
    fn creates_nested_destination_dirs() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("cosign.pub", "KEY")]);

        copy_assets(
            &[AssetCopy::new("cosign.pub", "keys/cosign.pub")],
            tmp.path(),
            &tmp.path().join("site"),
        )
        .unwrap();

        assert!(tmp.path().join("site/keys/cosign.pub").is_file());
    }

    #[test]
    fn missing_source_is_fatal() {
        let tmp = TempDir::new().unwrap();
        write_tree(tmp.path(), &[("CNAME", "x")]);

        let table = vec![
            AssetCopy::new("CNAME", "CNAME"),
            AssetCopy::new("../cosign/cosign.pub", "cosign.pub"),
        ];
        let err = copy_assets(&table, tmp.path(), &tmp.path().join("site")).unwrap_err();

        assert!(
            matches!(err, AssetError::MissingSource(ref p) if p == &tmp.path().join("../cosign/cosign.pub"))
        );
    }
}
