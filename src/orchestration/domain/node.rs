//! Nodes of the orchestration state machine.

use super::{RoutingDecision, WorkerName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A state of the orchestration graph.
///
/// Runs start at [`GraphNode::Supervisor`]. The supervisor moves to a
/// worker or to [`GraphNode::Terminal`]; every worker moves back to the
/// supervisor. `Terminal` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "worker", rename_all = "snake_case")]
pub enum GraphNode {
    /// The router chooses what happens next.
    Supervisor,
    /// The named worker runs next.
    Worker(WorkerName),
    /// The run is complete.
    Terminal,
}

impl GraphNode {
    /// Returns `true` for [`GraphNode::Terminal`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminal)
    }
}

impl From<RoutingDecision> for GraphNode {
    fn from(decision: RoutingDecision) -> Self {
        match decision {
            RoutingDecision::Worker(name) => Self::Worker(name),
            RoutingDecision::Finish => Self::Terminal,
        }
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supervisor => f.write_str("supervisor"),
            Self::Worker(name) => write!(f, "{name}"),
            Self::Terminal => f.write_str("terminal"),
        }
    }
}
