//! The supervisor: chooses the next worker or ends the run.

use super::{
    OrchestrationError,
    prompts::{self, SupervisorPrompts},
};
use crate::orchestration::{
    domain::{ConversationState, Roster, RoutingDecision},
    ports::{ClassifierError, RoutingClassifier, RoutingRequest},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// What the supervisor does when the classifier answers outside the
/// roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingRetryPolicy {
    /// Fail the run on the first invalid answer.
    #[default]
    FailFast,
    /// Ask once more with a correction note, then fail.
    RetryOnce,
}

impl RoutingRetryPolicy {
    const fn attempts(self) -> usize {
        match self {
            Self::FailFast => 1,
            Self::RetryOnce => 2,
        }
    }
}

/// Router that turns classifier output into validated decisions.
///
/// The supervisor is stateless between turns: everything it knows comes
/// from the conversation state passed to [`Supervisor::decide`].
pub struct Supervisor<C>
where
    C: RoutingClassifier,
{
    classifier: Arc<C>,
    roster: Roster,
    policy: RoutingRetryPolicy,
    prompts: SupervisorPrompts,
}

impl<C> Supervisor<C>
where
    C: RoutingClassifier,
{
    /// Creates a supervisor for `roster`.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] if the supervisor prompts fail to
    /// render.
    pub fn new(
        classifier: Arc<C>,
        roster: Roster,
        policy: RoutingRetryPolicy,
    ) -> Result<Self, minijinja::Error> {
        let prompts = prompts::supervisor_prompts(&roster)?;
        Ok(Self {
            classifier,
            roster,
            policy,
            prompts,
        })
    }

    /// Returns the roster the supervisor routes between.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn policy(&self) -> RoutingRetryPolicy {
        self.policy
    }

    /// Chooses the next step for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::InvalidRoutingDecision`] when every
    /// permitted attempt answered outside the roster, or
    /// [`OrchestrationError::Classifier`] when the classifier itself fails.
    pub async fn decide(
        &self,
        state: &ConversationState,
    ) -> Result<RoutingDecision, OrchestrationError> {
        let mut request = self.routing_request(state);
        let mut rejected = String::new();

        for attempt in 1..=self.policy.attempts() {
            let raw = self.classifier.classify(&request).await?;
            match self.validate(&raw) {
                Some(decision) => {
                    info!(%decision, attempt, "supervisor routed");
                    return Ok(decision);
                }
                None => {
                    warn!(value = %raw, attempt, "supervisor rejected routing decision");
                    request.correction = Some(
                        prompts::correction_note(&raw, &self.roster)
                            .map_err(ClassifierError::runtime)?,
                    );
                    rejected = raw;
                }
            }
        }

        Err(OrchestrationError::InvalidRoutingDecision { value: rejected })
    }

    fn routing_request(&self, state: &ConversationState) -> RoutingRequest {
        let snapshot = state.snapshot();
        RoutingRequest {
            system_prompt: self.prompts.system.clone(),
            selection_prompt: self.prompts.selection.clone(),
            request: snapshot.request.to_owned(),
            history: snapshot.messages.to_vec(),
            options: RoutingDecision::options(&self.roster)
                .into_iter()
                .map(str::to_owned)
                .collect(),
            correction: None,
        }
    }

    fn validate(&self, raw: &str) -> Option<RoutingDecision> {
        RoutingDecision::parse(raw)
            .ok()
            .filter(|decision| decision.is_permitted_by(&self.roster))
    }
}
