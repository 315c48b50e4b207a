//! Expand every configured template before the build.

use super::backend::{RenderError, Renderer};
use super::job::RenderJob;
use crate::config::FailurePolicy;
use std::path::Path;

/// What the expansion did, in template-list order.
#[derive(Debug, Default)]
pub struct ExpandReport {
    pub rendered: Vec<RenderJob>,
    /// Jobs whose renderer failed under [`FailurePolicy::Warn`], with the error text.
    pub failed: Vec<(RenderJob, String)>,
}

/// Render each page in `templates` from its `.tmpl` (and `.yaml`, if present).
///
/// A missing template is always fatal. Renderer failures are fatal under
/// [`FailurePolicy::Fail`] and logged-and-skipped under [`FailurePolicy::Warn`].
pub fn expand_templates(
    templates: &[String],
    docs_dir: &Path,
    renderer: &dyn Renderer,
    on_failure: FailurePolicy,
) -> Result<ExpandReport, RenderError> {
    let mut report = ExpandReport::default();

    for page in templates {
        let job = RenderJob::for_page(docs_dir, page);
        if !job.template.is_file() {
            return Err(RenderError::MissingTemplate(job.template));
        }

        match renderer.render(&job) {
            Ok(()) => {
                log::debug!("rendered {}", job.output.display());
                report.rendered.push(job);
            }
            Err(err) if on_failure == FailurePolicy::Warn => {
                log::warn!("ignoring renderer failure: {err}");
                report.failed.push((job, err.to_string()));
            }
            Err(err) => return Err(err),
        }
    }

    log::info!(
        "Template expansion: {} rendered, {} failed",
        report.rendered.len(),
        report.failed.len()
    );
    Ok(report)
}
