//! Worker units: one named worker bound to one capability.

use super::{WorkerError, prompts};
use crate::orchestration::{
    domain::{ConversationState, WorkerName},
    ports::{CapabilityError, CapabilityKind, WorkerCapability, WorkerContext},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// A named worker that runs exactly one capability and reports back.
///
/// Task failures are data: a recoverable capability error is appended to
/// the conversation as `"<worker> failed: <reason>"` so the supervisor can
/// react. Only missing arguments, which indicate a wiring mistake, are
/// returned as errors.
#[derive(Clone)]
pub struct WorkerUnit {
    name: WorkerName,
    instructions: String,
    capability: Arc<dyn WorkerCapability>,
}

impl WorkerUnit {
    /// Binds `capability` to `name` with the default instructions.
    #[must_use]
    pub fn new(name: WorkerName, capability: Arc<dyn WorkerCapability>) -> Self {
        Self {
            name,
            instructions: prompts::default_instructions(name).to_owned(),
            capability,
        }
    }

    /// Replaces the instruction context.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Returns the worker name.
    #[must_use]
    pub const fn name(&self) -> WorkerName {
        self.name
    }

    /// Returns the instruction context.
    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Returns the kind of the bound capability.
    #[must_use]
    pub fn capability_kind(&self) -> CapabilityKind {
        self.capability.kind()
    }

    /// Runs the capability and appends its content to `state`.
    ///
    /// Returns the appended content.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::MissingArgument`] when the capability lacks a
    /// required argument, or [`WorkerError::State`] when the state rejects
    /// the entry.
    pub async fn run(
        &self,
        state: &mut ConversationState,
        clock: &(impl Clock + Sync),
    ) -> Result<String, WorkerError> {
        let result = {
            let snapshot = state.snapshot();
            let context = WorkerContext {
                worker: self.name,
                instructions: &self.instructions,
                request: snapshot.request,
                history: snapshot.messages,
                metadata: snapshot.metadata,
            };
            self.capability.execute(&context).await
        };

        let content = match result {
            Ok(output) => {
                let (content, metadata) = output.into_parts();
                for (key, value) in metadata {
                    state.record_metadata(key, value);
                }
                info!(worker = %self.name, kind = %self.capability.kind(), "worker completed");
                content
            }
            Err(CapabilityError::Recoverable(reason)) => {
                warn!(worker = %self.name, %reason, "worker task failed");
                format!("{} failed: {reason}", self.name)
            }
            Err(CapabilityError::MissingArgument(argument)) => {
                return Err(WorkerError::MissingArgument(argument));
            }
        };

        state.append(self.name, content.clone(), clock)?;
        Ok(content)
    }
}
