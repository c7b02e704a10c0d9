//! Orchestration services: router, worker units and the graph loop.

mod error;
mod graph;
pub mod prompts;
mod router;
mod worker;

pub use error::{OrchestrationError, RunFailure, WorkerError};
pub use graph::{
    DEFAULT_STEP_BUDGET, GraphBuildError, InvalidStepBudget, OrchestrationGraph,
    OrchestrationGraphBuilder, Run, RunReport, StepBudget,
};
pub use router::{RoutingRetryPolicy, Supervisor};
pub use worker::WorkerUnit;
