//! Port for the remote project-template generator.

use crate::codegen::domain::TemplateParams;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for template service calls.
pub type TemplateServiceResult<T> = Result<T, TemplateServiceError>;

/// Produces a zipped project scaffold for a set of parameters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateService: Send + Sync {
    /// Returns the raw archive bytes for `params`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError`] when the service is unreachable or
    /// answers with a non-success status.
    async fn fetch_archive(&self, params: &TemplateParams) -> TemplateServiceResult<Vec<u8>>;
}

/// Errors returned by template service adapters.
#[derive(Debug, Clone, Error)]
pub enum TemplateServiceError {
    /// The service answered with a non-success HTTP status.
    #[error("template service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// Transport failure reaching the service.
    #[error("template service transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TemplateServiceError {
    /// Wraps a transport error from the adapter.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
