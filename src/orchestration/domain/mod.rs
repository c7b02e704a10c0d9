//! Domain model for supervisor-driven orchestration.
//!
//! These types carry the run's conversation history, the routing
//! vocabulary and the graph's node set. They hold no infrastructure
//! dependencies.

mod decision;
mod error;
mod ids;
pub mod metadata;
mod node;
mod state;
mod worker_name;

pub use decision::{FINISH, RoutingDecision};
pub use error::{ParseWorkerNameError, StateError};
pub use ids::RunId;
pub use metadata::TaskMetadata;
pub use node::GraphNode;
pub use state::{ConversationEntry, ConversationState, StateSnapshot};
pub use worker_name::{Roster, WorkerName};
