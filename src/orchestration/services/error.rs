//! Fatal orchestration errors.
//!
//! Worker-local task failures never reach these types: worker units turn
//! them into conversation content. Only routing, budget and wiring
//! failures abort a run.

use crate::orchestration::{
    domain::{ConversationState, RunId, StateError, WorkerName},
    ports::ClassifierError,
};
use thiserror::Error;

/// Programmer errors raised by a worker unit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkerError {
    /// The bound capability lacked a required argument.
    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),

    /// The conversation state rejected the worker's output.
    #[error(transparent)]
    State(#[from] StateError),
}

/// Errors that abort an orchestration run.
#[derive(Debug, Clone, Error)]
pub enum OrchestrationError {
    /// The supervisor's classifier returned a value outside the roster.
    #[error("invalid routing decision: '{value}'")]
    InvalidRoutingDecision {
        /// The rejected raw value.
        value: String,
    },

    /// The run reached its step budget without finishing.
    #[error("step budget of {budget} transitions exceeded")]
    StepBudgetExceeded {
        /// The configured maximum number of transitions.
        budget: u32,
    },

    /// The classifier could not be consulted.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// A worker unit failed fatally.
    #[error("worker '{worker}' failed: {source}")]
    Worker {
        /// The failing worker.
        worker: WorkerName,
        /// The underlying error.
        source: WorkerError,
    },

    /// The routed worker has no registered unit.
    #[error("worker '{0}' is not registered with this graph")]
    UnregisteredWorker(WorkerName),

    /// The conversation state rejected a mutation.
    #[error(transparent)]
    State(#[from] StateError),
}

impl OrchestrationError {
    /// Returns `true` for [`OrchestrationError::StepBudgetExceeded`].
    #[must_use]
    pub const fn is_budget_exceeded(&self) -> bool {
        matches!(self, Self::StepBudgetExceeded { .. })
    }
}

/// A fatal failure together with the partial state of the run.
#[derive(Debug, Clone, Error)]
#[error("run {run_id} aborted after {steps} transitions: {error}")]
pub struct RunFailure {
    /// The aborted run.
    pub run_id: RunId,
    /// The fatal error.
    pub error: OrchestrationError,
    /// Conversation state at the moment of failure.
    pub state: ConversationState,
    /// Transitions performed before the failure.
    pub steps: u32,
}
