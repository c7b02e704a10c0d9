//! The shared conversation state mutated during one orchestration run.

use super::{Roster, RoutingDecision, StateError, TaskMetadata, WorkerName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One worker output in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    author: WorkerName,
    content: String,
    recorded_at: DateTime<Utc>,
}

impl ConversationEntry {
    /// Returns the worker that produced this entry.
    #[must_use]
    pub const fn author(&self) -> WorkerName {
        self.author
    }

    /// Returns the entry content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the entry was appended.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Conversation and task state for a single run.
///
/// # Invariants
///
/// - `messages` is append-only: entries are never removed or reordered
/// - every entry's author is on the roster
/// - `next`, once set, is `Finish` or a rostered worker
///
/// The state lives exactly as long as one run and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    roster: Roster,
    request: String,
    messages: Vec<ConversationEntry>,
    next: Option<RoutingDecision>,
    task_metadata: TaskMetadata,
}

/// Read-only view of a [`ConversationState`].
#[derive(Debug, Clone, Copy)]
pub struct StateSnapshot<'a> {
    /// The caller's task description.
    pub request: &'a str,
    /// Every worker output so far, in append order.
    pub messages: &'a [ConversationEntry],
    /// The latest routing decision, if the supervisor has run.
    pub next: Option<RoutingDecision>,
    /// Artefacts recorded by workers.
    pub metadata: &'a TaskMetadata,
}

impl ConversationState {
    /// Creates an empty state for `roster` seeded with the caller's
    /// request.
    #[must_use]
    pub fn new(roster: Roster, request: impl Into<String>) -> Self {
        Self {
            roster,
            request: request.into(),
            messages: Vec::new(),
            next: None,
            task_metadata: TaskMetadata::new(),
        }
    }

    /// Appends one worker output.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnregisteredAuthor`] when `author` is not on
    /// the roster.
    pub fn append(
        &mut self,
        author: WorkerName,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), StateError> {
        if !self.roster.contains(author) {
            return Err(StateError::UnregisteredAuthor(author));
        }
        self.messages.push(ConversationEntry {
            author,
            content: content.into(),
            recorded_at: clock.utc(),
        });
        Ok(())
    }

    /// Records the supervisor's decision for the next turn.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidRoutingDecision`] when `decision` names
    /// a worker that is not on the roster.
    pub fn set_next(&mut self, decision: RoutingDecision) -> Result<(), StateError> {
        if !decision.is_permitted_by(&self.roster) {
            return Err(StateError::InvalidRoutingDecision(decision.to_string()));
        }
        self.next = Some(decision);
        Ok(())
    }

    /// Inserts or replaces a metadata entry.
    pub fn record_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.task_metadata.insert(key, value);
    }

    /// Returns a view reflecting every append made so far.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot<'_> {
        StateSnapshot {
            request: &self.request,
            messages: &self.messages,
            next: self.next,
            metadata: &self.task_metadata,
        }
    }

    /// Returns the registered workers.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the caller's task description.
    #[must_use]
    pub fn request(&self) -> &str {
        &self.request
    }

    /// Returns the message history.
    #[must_use]
    pub fn messages(&self) -> &[ConversationEntry] {
        &self.messages
    }

    /// Returns the latest routing decision.
    #[must_use]
    pub const fn next(&self) -> Option<RoutingDecision> {
        self.next
    }

    /// Returns the task metadata.
    #[must_use]
    pub const fn metadata(&self) -> &TaskMetadata {
        &self.task_metadata
    }
}
