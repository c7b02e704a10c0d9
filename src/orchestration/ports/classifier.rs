//! Port for the decision-making collaborator backing the supervisor.

use crate::orchestration::domain::ConversationEntry;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for classifier calls.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Everything the classifier sees when choosing the next worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRequest {
    /// Rendered supervisor system prompt.
    pub system_prompt: String,
    /// Rendered question asked after the history.
    pub selection_prompt: String,
    /// The caller's task description.
    pub request: String,
    /// The full message history, oldest first.
    pub history: Vec<ConversationEntry>,
    /// The only acceptable answers.
    pub options: Vec<String>,
    /// Set when a previous answer was rejected and the call is retried.
    pub correction: Option<String>,
}

/// Chooses one of [`RoutingRequest::options`].
///
/// Implementations are usually backed by a language model constrained to
/// the option list. The returned string is untrusted: the supervisor
/// validates it against the roster before acting on it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoutingClassifier: Send + Sync {
    /// Returns the raw value chosen for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] when the collaborator cannot be reached
    /// or produces no answer.
    async fn classify(&self, request: &RoutingRequest) -> ClassifierResult<String>;
}

/// Errors returned by classifier adapters.
#[derive(Debug, Clone, Error)]
pub enum ClassifierError {
    /// The classifier produced no answer.
    #[error("classifier returned no decision: {0}")]
    NoDecision(String),

    /// Transport or runtime failure in the adapter.
    #[error("classifier runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl ClassifierError {
    /// Wraps a runtime error from the classifier adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
