//! Discovered docs files and the publish filter.
//!
//! The site generator discovers every file under `docs_dir` and hands the set
//! to the files hook, which removes what must not be published: the
//! non-website sources (build code, tests, the hook script itself) and the raw
//! template inputs (`<page>.tmpl`, `<page>.yaml`) whose rendered page replaces
//! them.
//!
//! Keys are POSIX-style paths relative to `docs_dir` (`links/videos.md`),
//! independent of the host platform's separator.

use crate::render::{DATA_SUFFIX, TEMPLATE_SUFFIX};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("File not in the discovered set: {0}")]
    MissingFile(String),
}

/// One discovered source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Path relative to the docs directory, `/`-separated.
    pub src_uri: String,
    /// Location on disk.
    pub abs_path: PathBuf,
}

/// The set of files the site will publish, keyed by `src_uri`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: BTreeMap<String, SourceFile>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `docs_dir` and record every regular file.
    pub fn discover(docs_dir: &Path) -> Result<Self, FilterError> {
        let mut set = Self::new();
        for entry in WalkDir::new(docs_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            // Entries always live under the walk root.
            let rel = entry.path().strip_prefix(docs_dir).unwrap_or(entry.path());
            set.insert(SourceFile {
                src_uri: to_src_uri(rel),
                abs_path: entry.path().to_path_buf(),
            });
        }
        log::debug!("discovered {} files under {}", set.len(), docs_dir.display());
        Ok(set)
    }

    pub fn insert(&mut self, file: SourceFile) {
        self.files.insert(file.src_uri.clone(), file);
    }

    pub fn get(&self, src_uri: &str) -> Option<&SourceFile> {
        self.files.get(src_uri)
    }

    pub fn contains(&self, src_uri: &str) -> bool {
        self.files.contains_key(src_uri)
    }

    /// Remove a file that must be present.
    pub fn remove(&mut self, src_uri: &str) -> Result<SourceFile, FilterError> {
        self.files
            .remove(src_uri)
            .ok_or_else(|| FilterError::MissingFile(src_uri.to_string()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in `src_uri` order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    pub fn src_uris(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }
}

/// `/`-joined relative path.
fn to_src_uri(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Drop non-website sources and template inputs from the publish set.
///
/// Every non-website path and every `<page>.tmpl` must be present; a missing
/// one means the configuration and the docs tree have drifted apart. The
/// `<page>.yaml` data file is optional and only removed when present.
pub fn filter_files(
    mut files: FileSet,
    non_website_paths: &[String],
    templates: &[String],
) -> Result<FileSet, FilterError> {
    for path in non_website_paths {
        files.remove(path)?;
    }

    for page in templates {
        files.remove(&format!("{page}{TEMPLATE_SUFFIX}"))?;
        let data = format!("{page}{DATA_SUFFIX}");
        if files.contains(&data) {
            files.remove(&data)?;
        }
    }

    log::info!("File filter: {} files to publish", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_tree;
    use tempfile::TempDir;

    fn set_of(uris: &[&str]) -> FileSet {
        let mut set = FileSet::new();
        for uri in uris {
            set.insert(SourceFile {
                src_uri: uri.to_string(),
                abs_path: PathBuf::from("/docs").join(uri),
            });
        }
        set
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn discover_uses_relative_posix_paths() {
        let tmp = TempDir::new().unwrap();
        write_tree(
            tmp.path(),
            &[("index.md", ""), ("links/videos.md", ""), ("a/b/c.txt", "")],
        );

        let set = FileSet::discover(tmp.path()).unwrap();
        assert_eq!(set.src_uris(), vec!["a/b/c.txt", "index.md", "links/videos.md"]);
        assert_eq!(
            set.get("links/videos.md").unwrap().abs_path,
            tmp.path().join("links").join("videos.md")
        );
    }

    #[test]
    fn discover_skips_directories() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("empty/dir")).unwrap();
        let set = FileSet::discover(tmp.path()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn discover_missing_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = FileSet::discover(&tmp.path().join("nope"));
        assert!(matches!(result, Err(FilterError::Walk(_))));
    }

    #[test]
    fn remove_absent_is_error() {
        let mut set = set_of(&["index.md"]);
        let err = set.remove("hooks.py").unwrap_err();
        assert!(matches!(err, FilterError::MissingFile(ref p) if p == "hooks.py"));
    }

    #[test]
    fn filter_removes_listed_paths_and_keeps_the_rest() {
        let set = set_of(&[
            "docs.go",
            "hooks.py",
            "install.md.tmpl",
            "install.md.yaml",
            "install.md",
            "quick-start.md",
            "reference/index.md",
        ]);

        let filtered = filter_files(
            set,
            &strings(&["docs.go", "hooks.py"]),
            &strings(&["install.md"]),
        )
        .unwrap();

        assert_eq!(
            filtered.src_uris(),
            vec!["install.md", "quick-start.md", "reference/index.md"]
        );
    }

    #[test]
    fn filter_tolerates_missing_data_file() {
        let set = set_of(&["index.md.tmpl", "index.md"]);
        let filtered = filter_files(set, &[], &strings(&["index.md"])).unwrap();
        assert_eq!(filtered.src_uris(), vec!["index.md"]);
    }

    #[test]
    fn filter_requires_non_website_path() {
        let set = set_of(&["index.md"]);
        let err = filter_files(set, &strings(&["docs.go"]), &[]).unwrap_err();
        assert!(matches!(err, FilterError::MissingFile(ref p) if p == "docs.go"));
    }

    #[test]
    fn filter_requires_template_file() {
        let set = set_of(&["index.md", "index.md.yaml"]);
        let err = filter_files(set, &[], &strings(&["index.md"])).unwrap_err();
        assert!(matches!(err, FilterError::MissingFile(ref p) if p == "index.md.tmpl"));
    }

    #[test]
    fn filter_leaves_unrelated_yaml_alone() {
        let set = set_of(&["index.md.tmpl", "data/versions.yaml"]);
        let filtered = filter_files(set, &[], &strings(&["index.md"])).unwrap();
        assert_eq!(filtered.src_uris(), vec!["data/versions.yaml"]);
    }

    #[test]
    fn filter_nested_template_paths() {
        let set = set_of(&[
            "reference/release-history.md.tmpl",
            "reference/release-history.md",
        ]);
        let filtered =
            filter_files(set, &[], &strings(&["reference/release-history.md"])).unwrap();
        assert_eq!(filtered.src_uris(), vec!["reference/release-history.md"]);
    }
}
