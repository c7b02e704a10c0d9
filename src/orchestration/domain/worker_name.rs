//! The canonical worker enumeration and the per-graph roster.

use super::ParseWorkerNameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Names of the single-purpose workers a graph may register.
///
/// This is the only place worker names are enumerated. Routers, worker
/// units and the conversation state all receive a [`Roster`] built from
/// these values rather than keeping their own lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerName {
    /// Generates the project scaffold.
    Initializer,
    /// Builds and runs the scaffold to confirm it starts.
    Verifier,
    /// Reads the source file that is being migrated.
    SourceReader,
    /// Writes generated code into the scaffold.
    CodeWriter,
}

impl WorkerName {
    /// Every worker name, in routing-prompt order.
    pub const ALL: [Self; 4] = [
        Self::Initializer,
        Self::Verifier,
        Self::SourceReader,
        Self::CodeWriter,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initializer => "initializer",
            Self::Verifier => "verifier",
            Self::SourceReader => "source_reader",
            Self::CodeWriter => "code_writer",
        }
    }
}

impl TryFrom<&str> for WorkerName {
    type Error = ParseWorkerNameError;

    /// Parses a worker name case-insensitively.
    ///
    /// Besides the canonical names, the labels used by earlier prompt
    /// revisions (`Initialization`, `Testing`, `File_reader`,
    /// `Controller_Writer`) are accepted.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "initializer" | "initialization" => Ok(Self::Initializer),
            "verifier" | "testing" => Ok(Self::Verifier),
            "source_reader" | "file_reader" => Ok(Self::SourceReader),
            "code_writer" | "controller_writer" => Ok(Self::CodeWriter),
            _ => Err(ParseWorkerNameError(value.to_owned())),
        }
    }
}

impl fmt::Display for WorkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of workers registered with one graph.
///
/// Fixed when the graph is built; never extended during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster(BTreeSet<WorkerName>);

impl Roster {
    /// Creates a roster from the given names, dropping duplicates.
    #[must_use]
    pub fn new(names: impl IntoIterator<Item = WorkerName>) -> Self {
        Self(names.into_iter().collect())
    }

    /// Creates a roster containing every [`WorkerName`].
    #[must_use]
    pub fn all() -> Self {
        Self::new(WorkerName::ALL)
    }

    /// Returns `true` when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: WorkerName) -> bool {
        self.0.contains(&name)
    }

    /// Returns the registered names in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = WorkerName> + '_ {
        self.0.iter().copied()
    }

    /// Returns the number of registered workers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no worker is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
