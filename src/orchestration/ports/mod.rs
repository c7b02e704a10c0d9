//! Port definitions for orchestration collaborators.

pub mod capability;
pub mod classifier;
pub mod drafter;

pub use capability::{
    CapabilityError, CapabilityKind, CapabilityOutput, WorkerCapability, WorkerContext,
};
pub use classifier::{ClassifierError, ClassifierResult, RoutingClassifier, RoutingRequest};
#[cfg(test)]
pub use classifier::MockRoutingClassifier;
pub use drafter::{CodeDrafter, DraftError, GeneratedSource};
