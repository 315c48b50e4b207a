//! Render job parameters.
//!
//! A job is a pure description of one renderer invocation. Building one
//! touches the filesystem only to check whether the data file exists.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix of the template file next to each rendered page.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";
/// Suffix of the optional data file next to each rendered page.
pub const DATA_SUFFIX: &str = ".yaml";

/// Paths for rendering a single templated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// The page the renderer writes, e.g. `docs/install.md`.
    pub output: PathBuf,
    /// The template it reads, e.g. `docs/install.md.tmpl`.
    pub template: PathBuf,
    /// Template data, present only when `docs/install.md.yaml` exists.
    pub data: Option<PathBuf>,
}

impl RenderJob {
    /// Resolve the job for a docs-relative page path.
    pub fn for_page(docs_dir: &Path, page: &str) -> Self {
        let output = docs_dir.join(page);
        let template = with_suffix(&output, TEMPLATE_SUFFIX);
        let data = Some(with_suffix(&output, DATA_SUFFIX)).filter(|p| p.exists());
        Self {
            output,
            template,
            data,
        }
    }

    /// Renderer flags: `[-data DATA] -output OUTPUT TEMPLATE`.
    ///
    /// The template is always the final positional argument.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(5);
        if let Some(data) = &self.data {
            args.push("-data".into());
            args.push(data.clone().into_os_string());
        }
        args.push("-output".into());
        args.push(self.output.clone().into_os_string());
        args.push(self.template.clone().into_os_string());
        args
    }
}

/// Append a suffix to the full file name (`install.md` → `install.md.tmpl`).
pub(crate) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}
