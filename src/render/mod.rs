//! Template expansion: the pre-build hook.
//!
//! | Piece | Role |
//! |---|---|
//! | **Job** | [`RenderJob`]: output, template, and optional data paths for one page |
//! | **Backend** | [`Renderer`] trait + [`CommandRenderer`] (external executable) |
//! | **Expansion** | [`expand_templates`]: walks the template list, applies the failure policy |
//!
//! The renderer itself is an external program; this module only decides
//! which paths to hand it and what to do when it fails.

pub mod backend;
pub mod command;
pub mod expand;
mod job;

pub use backend::{RenderError, Renderer};
pub use command::CommandRenderer;
pub use expand::{ExpandReport, expand_templates};
pub use job::{DATA_SUFFIX, RenderJob, TEMPLATE_SUFFIX};
