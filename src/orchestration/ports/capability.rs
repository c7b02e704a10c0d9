//! Port binding a worker unit to its single underlying task.

use crate::orchestration::domain::{ConversationEntry, TaskMetadata, WorkerName};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The task function a capability performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    /// Fetch and extract a project scaffold.
    Scaffold,
    /// Build and run the scaffold.
    Verify,
    /// Read a source file.
    ReadSource,
    /// Write generated code into the scaffold.
    WriteCode,
}

impl CapabilityKind {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scaffold => "scaffold",
            Self::Verify => "verify",
            Self::ReadSource => "read_source",
            Self::WriteCode => "write_code",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a capability sees when a worker unit invokes it.
#[derive(Debug, Clone, Copy)]
pub struct WorkerContext<'a> {
    /// The invoking worker.
    pub worker: WorkerName,
    /// The worker's fixed instruction context.
    pub instructions: &'a str,
    /// The caller's task description.
    pub request: &'a str,
    /// Message history so far.
    pub history: &'a [ConversationEntry],
    /// Artefacts recorded by earlier workers.
    pub metadata: &'a TaskMetadata,
}

/// Successful capability output.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityOutput {
    content: String,
    metadata: Vec<(String, Value)>,
}

impl CapabilityOutput {
    /// Creates output with the given message content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Vec::new(),
        }
    }

    /// Adds a metadata entry to record in the conversation state.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.push((key.into(), value));
        self
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the metadata entries.
    #[must_use]
    pub fn metadata(&self) -> &[(String, Value)] {
        &self.metadata
    }

    /// Splits the output into content and metadata.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<(String, Value)>) {
        (self.content, self.metadata)
    }
}

/// Failures reported by a capability.
///
/// `Recoverable` failures become ordinary conversation content so the
/// supervisor can react to them. `MissingArgument` signals a wiring
/// mistake and aborts the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapabilityError {
    /// The task failed in a way the supervisor should see and react to.
    #[error("{0}")]
    Recoverable(String),

    /// A required argument was neither configured nor recorded by an
    /// earlier worker.
    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),
}

impl CapabilityError {
    /// Creates a recoverable failure from any displayable error.
    pub fn recoverable(err: impl fmt::Display) -> Self {
        Self::Recoverable(err.to_string())
    }
}

/// One task function that a worker unit can be bound to.
#[async_trait]
pub trait WorkerCapability: Send + Sync {
    /// Returns which task function this is.
    fn kind(&self) -> CapabilityKind;

    /// Performs the task.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError`] when the task cannot complete.
    async fn execute(
        &self,
        context: &WorkerContext<'_>,
    ) -> Result<CapabilityOutput, CapabilityError>;
}
