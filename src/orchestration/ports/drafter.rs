//! Port for the collaborator that drafts generated source files.

use super::WorkerContext;
use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// A source file produced by a [`CodeDrafter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    /// Path relative to the project root.
    pub relative_path: Utf8PathBuf,
    /// Full file contents.
    pub content: String,
}

impl GeneratedSource {
    /// Creates a generated source file.
    #[must_use]
    pub fn new(relative_path: impl Into<Utf8PathBuf>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// Produces the next file for the code-writer worker.
///
/// Implementations typically prompt a language model with the worker's
/// instructions, the request and the history (which includes the source
/// read by the source-reader worker).
#[async_trait]
pub trait CodeDrafter: Send + Sync {
    /// Drafts one file.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] when no file can be produced.
    async fn draft(&self, context: &WorkerContext<'_>) -> Result<GeneratedSource, DraftError>;
}

/// Errors returned by drafter adapters.
#[derive(Debug, Clone, Error)]
pub enum DraftError {
    /// The drafter could not produce a file from the given context.
    #[error("nothing to draft: {0}")]
    NothingToDraft(String),

    /// Transport or runtime failure in the adapter.
    #[error("drafter runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl DraftError {
    /// Wraps a runtime error from the drafter adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
