//! In-memory collaborators for tests and offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::orchestration::ports::{
    ClassifierError, ClassifierResult, CodeDrafter, DraftError, GeneratedSource,
    RoutingClassifier, RoutingRequest, WorkerContext,
};

/// Classifier that replays a fixed sequence of raw answers.
///
/// Once the script is exhausted it repeats the fallback answer, or fails
/// with [`ClassifierError::NoDecision`] when none is set.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClassifier {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    answers: VecDeque<String>,
    fallback: Option<String>,
    requests: Vec<RoutingRequest>,
}

impl ScriptedClassifier {
    /// Creates a classifier answering with `answers` in order.
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                answers: answers.into_iter().map(Into::into).collect(),
                ..ScriptState::default()
            })),
        }
    }

    /// Creates a classifier that always answers `answer`.
    #[must_use]
    pub fn repeating(answer: impl Into<String>) -> Self {
        let classifier = Self::default();
        if let Ok(mut state) = classifier.state.lock() {
            state.fallback = Some(answer.into());
        }
        classifier
    }

    /// Returns how many times the classifier was called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.lock().map_or(0, |state| state.requests.len())
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RoutingRequest> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RoutingClassifier for ScriptedClassifier {
    async fn classify(&self, request: &RoutingRequest) -> ClassifierResult<String> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| ClassifierError::runtime(std::io::Error::other(err.to_string())))?;
        state.requests.push(request.clone());
        state
            .answers
            .pop_front()
            .or_else(|| state.fallback.clone())
            .ok_or_else(|| ClassifierError::NoDecision("script exhausted".to_owned()))
    }
}

/// Drafter that always produces the same file.
#[derive(Debug, Clone)]
pub struct StaticDrafter {
    source: GeneratedSource,
}

impl StaticDrafter {
    /// Creates a drafter returning `source` for every call.
    #[must_use]
    pub const fn new(source: GeneratedSource) -> Self {
        Self { source }
    }
}

#[async_trait]
impl CodeDrafter for StaticDrafter {
    async fn draft(&self, _context: &WorkerContext<'_>) -> Result<GeneratedSource, DraftError> {
        Ok(self.source.clone())
    }
}
