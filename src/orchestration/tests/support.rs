//! Shared test doubles for orchestration tests.

use crate::orchestration::ports::{
    CapabilityError, CapabilityKind, CapabilityOutput, WorkerCapability, WorkerContext,
};
use async_trait::async_trait;
use std::sync::Mutex;

/// What a [`StubCapability`] saw on its last call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenContext {
    pub request: String,
    pub instructions: String,
    pub history_len: usize,
}

/// Capability returning a fixed result and recording its inputs.
pub struct StubCapability {
    result: Result<CapabilityOutput, CapabilityError>,
    seen: Mutex<Vec<SeenContext>>,
}

impl StubCapability {
    pub fn ok(content: &str) -> Self {
        Self::with_result(Ok(CapabilityOutput::new(content)))
    }

    pub fn with_result(result: Result<CapabilityOutput, CapabilityError>) -> Self {
        Self {
            result,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<SeenContext> {
        self.seen.lock().expect("seen lock").clone()
    }
}

#[async_trait]
impl WorkerCapability for StubCapability {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Scaffold
    }

    async fn execute(
        &self,
        context: &WorkerContext<'_>,
    ) -> Result<CapabilityOutput, CapabilityError> {
        self.seen.lock().expect("seen lock").push(SeenContext {
            request: context.request.to_owned(),
            instructions: context.instructions.to_owned(),
            history_len: context.history.len(),
        });
        self.result.clone()
    }
}
