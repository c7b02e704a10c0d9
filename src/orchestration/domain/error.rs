//! Error types for orchestration domain values.

use super::WorkerName;
use thiserror::Error;

/// Errors returned while mutating a [`super::ConversationState`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    /// The author of an appended entry is not a registered worker.
    #[error("worker '{0}' is not registered with this graph")]
    UnregisteredAuthor(WorkerName),

    /// The routing decision is outside the registered set.
    #[error("invalid routing decision: {0}")]
    InvalidRoutingDecision(String),
}

/// Error returned while parsing a worker name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown worker name: {0}")]
pub struct ParseWorkerNameError(pub String);
