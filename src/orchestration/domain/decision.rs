//! Routing decisions emitted by the supervisor.

use super::{ParseWorkerNameError, Roster, WorkerName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire form of the terminal decision.
pub const FINISH: &str = "FINISH";

/// The supervisor's output for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "worker", rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Run the named worker next.
    Worker(WorkerName),
    /// End the run.
    Finish,
}

impl RoutingDecision {
    /// Parses a raw decision string.
    ///
    /// `FINISH` (any casing) maps to [`RoutingDecision::Finish`]; anything
    /// else must be a worker name. Membership in a particular roster is not
    /// checked here; see [`RoutingDecision::is_permitted_by`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseWorkerNameError`] when the value is neither `FINISH`
    /// nor a known worker name.
    pub fn parse(value: &str) -> Result<Self, ParseWorkerNameError> {
        let trimmed = value.trim().trim_matches(|c| c == '"' || c == '\'');
        if trimmed.eq_ignore_ascii_case(FINISH) {
            return Ok(Self::Finish);
        }
        WorkerName::try_from(trimmed).map(Self::Worker)
    }

    /// Returns `true` when this decision is `Finish` or names a worker
    /// registered in `roster`.
    #[must_use]
    pub fn is_permitted_by(self, roster: &Roster) -> bool {
        match self {
            Self::Finish => true,
            Self::Worker(name) => roster.contains(name),
        }
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worker(name) => name.as_str(),
            Self::Finish => FINISH,
        }
    }

    /// Lists every permitted wire value for `roster`, `FINISH` first.
    #[must_use]
    pub fn options(roster: &Roster) -> Vec<&'static str> {
        std::iter::once(FINISH)
            .chain(roster.iter().map(WorkerName::as_str))
            .collect()
    }
}

impl fmt::Display for RoutingDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
