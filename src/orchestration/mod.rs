//! Supervisor-driven orchestration of single-purpose workers.
//!
//! A run alternates between the supervisor, which picks the next worker or
//! ends the run, and the chosen worker, which appends its output to the
//! shared conversation state. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`] ([`domain::ConversationState`],
//!   [`domain::WorkerName`], [`domain::RoutingDecision`])
//! - Port contracts in [`ports`] ([`ports::RoutingClassifier`],
//!   [`ports::WorkerCapability`], [`ports::CodeDrafter`])
//! - Adapter implementations in [`adapters`]
//! - The router, worker units and graph loop in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
