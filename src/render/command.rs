//! External-executable renderer.
//!
//! Runs `program args... [-data DATA] -output OUTPUT TEMPLATE` and waits for
//! it to exit. The child inherits stdout/stderr so its diagnostics reach the
//! build log unchanged.

use super::backend::{RenderError, Renderer};
use super::job::RenderJob;
use crate::config::RendererConfig;
use std::path::Path;
use std::process::Command;

/// Renderer backed by an external template executable.
#[derive(Debug, Clone)]
pub struct CommandRenderer {
    pub program: String,
    /// Leading arguments, placed before the job's own flags.
    pub args: Vec<String>,
}

impl CommandRenderer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from config, substituting `{config_dir}` in the arguments.
    pub fn from_config(config: &RendererConfig, config_dir: &Path) -> Self {
        Self::new(config.program.clone(), config.resolved_args(config_dir))
    }

    fn command(&self, job: &RenderJob) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).args(job.args());
        cmd
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, job: &RenderJob) -> Result<(), RenderError> {
        log::debug!(
            "running {} {:?} for {}",
            self.program,
            self.args,
            job.template.display()
        );
        let status = self
            .command(job)
            .status()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(RenderError::Failed {
                template: job.template.clone(),
                reason: status.to_string(),
            });
        }
        Ok(())
    }
}
