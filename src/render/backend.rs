//! Renderer trait and shared error type.
//!
//! The production implementation is
//! [`CommandRenderer`](super::command::CommandRenderer), which spawns the
//! external template executable. Tests swap in a recording mock.

use super::job::RenderJob;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    MissingTemplate(PathBuf),
    #[error("Failed to start renderer '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("Renderer failed for {template}: {reason}")]
    Failed { template: PathBuf, reason: String },
}

/// Something that can turn a template (plus optional data) into a page.
pub trait Renderer {
    /// Render `job.template` into `job.output`, overwriting it.
    fn render(&self, job: &RenderJob) -> Result<(), RenderError>;
}
