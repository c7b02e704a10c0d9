//! Port definitions for code-generation collaborators.

pub mod process;
pub mod template_service;

pub use process::{BuildLauncher, BuildProcess, LaunchError, ProcessError};
#[cfg(test)]
pub use template_service::MockTemplateService;
pub use template_service::{TemplateService, TemplateServiceError, TemplateServiceResult};
