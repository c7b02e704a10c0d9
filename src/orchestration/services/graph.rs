//! The orchestration graph: a step-bounded supervisor/worker loop.

use super::{OrchestrationError, RunFailure, Supervisor, WorkerUnit};
use crate::orchestration::{
    domain::{ConversationState, GraphNode, Roster, RunId, WorkerName},
    ports::RoutingClassifier,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, debug, info, info_span};

/// Default maximum number of transitions per run.
pub const DEFAULT_STEP_BUDGET: u32 = 25;

/// Maximum number of transitions a run may perform.
///
/// This is the only safeguard against a supervisor that never finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StepBudget(u32);

impl StepBudget {
    /// Creates a budget of `value` transitions.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStepBudget`] when `value` is zero.
    pub const fn new(value: u32) -> Result<Self, InvalidStepBudget> {
        if value == 0 {
            return Err(InvalidStepBudget);
        }
        Ok(Self(value))
    }

    /// Returns the number of permitted transitions.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Default for StepBudget {
    fn default() -> Self {
        Self(DEFAULT_STEP_BUDGET)
    }
}

impl TryFrom<u32> for StepBudget {
    type Error = InvalidStepBudget;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StepBudget> for u32 {
    fn from(budget: StepBudget) -> Self {
        budget.0
    }
}

impl fmt::Display for StepBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned for a zero step budget.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("step budget must be at least 1")]
pub struct InvalidStepBudget;

/// Errors raised while assembling a graph.
#[derive(Debug, Error)]
pub enum GraphBuildError {
    /// Two units were registered under the same worker name.
    #[error("worker '{0}' is registered twice")]
    DuplicateWorker(WorkerName),

    /// No worker was registered.
    #[error("a graph needs at least one worker")]
    EmptyRoster,

    /// The supervisor prompts failed to render.
    #[error("supervisor prompt rendering failed: {0}")]
    Prompt(#[from] minijinja::Error),
}

/// An in-flight run that can be advanced one transition at a time.
#[derive(Debug, Clone)]
pub struct Run {
    id: RunId,
    state: ConversationState,
    node: GraphNode,
    steps: u32,
    budget: StepBudget,
}

impl Run {
    /// Returns the run identifier.
    #[must_use]
    pub const fn id(&self) -> RunId {
        self.id
    }

    /// Returns the conversation state.
    #[must_use]
    pub const fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Returns the node the next step will execute.
    #[must_use]
    pub const fn node(&self) -> GraphNode {
        self.node
    }

    /// Returns the number of transitions performed.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Returns the configured budget.
    #[must_use]
    pub const fn budget(&self) -> StepBudget {
        self.budget
    }

    /// Consumes the run, returning its state.
    #[must_use]
    pub fn into_state(self) -> ConversationState {
        self.state
    }
}

/// Outcome of a run that reached the terminal node.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The completed run.
    pub run_id: RunId,
    /// Final conversation state.
    pub state: ConversationState,
    /// Transitions performed, including the final one into `Terminal`.
    pub steps: u32,
}

/// Supervisor plus registered worker units.
///
/// States are the supervisor, one state per registered worker, and the
/// absorbing terminal state. Execution is strictly sequential.
pub struct OrchestrationGraph<C, K>
where
    C: RoutingClassifier,
    K: Clock + Send + Sync,
{
    supervisor: Supervisor<C>,
    workers: BTreeMap<WorkerName, WorkerUnit>,
    budget: StepBudget,
    clock: Arc<K>,
}

impl<C, K> OrchestrationGraph<C, K>
where
    C: RoutingClassifier,
    K: Clock + Send + Sync,
{
    /// Starts building a graph.
    #[must_use]
    pub fn builder(classifier: Arc<C>, clock: Arc<K>) -> OrchestrationGraphBuilder<C, K> {
        OrchestrationGraphBuilder::new(classifier, clock)
    }

    /// Returns the registered workers.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        self.supervisor.roster()
    }

    /// Returns the step budget applied to new runs.
    #[must_use]
    pub const fn budget(&self) -> StepBudget {
        self.budget
    }

    /// Creates a run positioned at the supervisor with an empty history.
    #[must_use]
    pub fn start(&self, request: impl Into<String>) -> Run {
        Run {
            id: RunId::new(),
            state: ConversationState::new(self.roster().clone(), request),
            node: GraphNode::Supervisor,
            steps: 0,
            budget: self.budget,
        }
    }

    /// Performs one transition and returns the node reached.
    ///
    /// Stepping a terminal run is a no-op that consumes no budget.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::StepBudgetExceeded`] when the run has
    /// already performed `budget` transitions, or any fatal router or
    /// worker error.
    pub async fn step(&self, run: &mut Run) -> Result<GraphNode, OrchestrationError> {
        if run.node.is_terminal() {
            return Ok(GraphNode::Terminal);
        }
        if run.steps >= run.budget.value() {
            return Err(OrchestrationError::StepBudgetExceeded {
                budget: run.budget.value(),
            });
        }

        let next = match run.node {
            GraphNode::Supervisor => {
                let decision = self.supervisor.decide(&run.state).await?;
                run.state.set_next(decision)?;
                GraphNode::from(decision)
            }
            GraphNode::Worker(name) => {
                let unit = self
                    .workers
                    .get(&name)
                    .ok_or(OrchestrationError::UnregisteredWorker(name))?;
                unit.run(&mut run.state, self.clock.as_ref())
                    .await
                    .map_err(|source| OrchestrationError::Worker {
                        worker: name,
                        source,
                    })?;
                GraphNode::Supervisor
            }
            GraphNode::Terminal => GraphNode::Terminal,
        };

        run.steps += 1;
        debug!(from = %run.node, to = %next, step = run.steps, "graph transition");
        run.node = next;
        Ok(next)
    }

    /// Runs `request` until the supervisor finishes.
    ///
    /// # Errors
    ///
    /// Returns a boxed [`RunFailure`] carrying the partial state when a
    /// fatal error aborts the run.
    pub async fn run(&self, request: impl Into<String>) -> Result<RunReport, Box<RunFailure>> {
        let mut run = self.start(request);
        let span = info_span!("run", run_id = %run.id, budget = %run.budget);

        async move {
            info!(workers = self.roster().len(), "run started");
            loop {
                match self.step(&mut run).await {
                    Ok(GraphNode::Terminal) => break,
                    Ok(_) => {}
                    Err(error) => {
                        info!(%error, steps = run.steps, "run aborted");
                        return Err(Box::new(RunFailure {
                            run_id: run.id,
                            error,
                            steps: run.steps,
                            state: run.state,
                        }));
                    }
                }
            }
            info!(steps = run.steps, "run finished");
            Ok(RunReport {
                run_id: run.id,
                steps: run.steps,
                state: run.state,
            })
        }
        .instrument(span)
        .await
    }
}

/// Builder for [`OrchestrationGraph`].
pub struct OrchestrationGraphBuilder<C, K>
where
    C: RoutingClassifier,
    K: Clock + Send + Sync,
{
    classifier: Arc<C>,
    clock: Arc<K>,
    workers: Vec<WorkerUnit>,
    budget: StepBudget,
    policy: super::RoutingRetryPolicy,
}

impl<C, K> OrchestrationGraphBuilder<C, K>
where
    C: RoutingClassifier,
    K: Clock + Send + Sync,
{
    fn new(classifier: Arc<C>, clock: Arc<K>) -> Self {
        Self {
            classifier,
            clock,
            workers: Vec::new(),
            budget: StepBudget::default(),
            policy: super::RoutingRetryPolicy::default(),
        }
    }

    /// Registers a worker unit.
    #[must_use]
    pub fn with_worker(mut self, unit: WorkerUnit) -> Self {
        self.workers.push(unit);
        self
    }

    /// Sets the step budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: StepBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the supervisor's retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: super::RoutingRetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphBuildError`] when no worker is registered, a worker
    /// is registered twice, or the supervisor prompts fail to render.
    pub fn build(self) -> Result<OrchestrationGraph<C, K>, GraphBuildError> {
        let mut workers = BTreeMap::new();
        for unit in self.workers {
            let name = unit.name();
            if workers.insert(name, unit).is_some() {
                return Err(GraphBuildError::DuplicateWorker(name));
            }
        }
        if workers.is_empty() {
            return Err(GraphBuildError::EmptyRoster);
        }

        let roster = Roster::new(workers.keys().copied());
        let supervisor = Supervisor::new(self.classifier, roster, self.policy)?;
        Ok(OrchestrationGraph {
            supervisor,
            workers,
            budget: self.budget,
            clock: self.clock,
        })
    }
}
