//! Prompt text for the supervisor and the default worker instructions.

use crate::orchestration::domain::{FINISH, Roster, RoutingDecision, WorkerName};
use minijinja::{Environment, context};

const SUPERVISOR_SYSTEM_TEMPLATE: &str = "\
You are a supervisor tasked with managing a conversation between the \
following workers: {{ members | join(\", \") }}. Given the user request, \
respond with the worker to act next. Each worker will perform a task and \
respond with its results and status. When finished, respond with {{ finish }}.";

const SUPERVISOR_SELECTION_TEMPLATE: &str = "\
Given the conversation above, who should act next? Or should we {{ finish }}? \
Select one of: {{ options | join(\", \") }}";

const CORRECTION_TEMPLATE: &str = "\
Your previous answer '{{ rejected }}' is not a valid choice. \
Answer with exactly one of: {{ options | join(\", \") }}";

/// The two rendered supervisor prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorPrompts {
    /// Opening system prompt naming the members.
    pub system: String,
    /// Question asked after the conversation history.
    pub selection: String,
}

/// Renders the supervisor prompts for `roster`.
///
/// # Errors
///
/// Returns [`minijinja::Error`] if a template fails to render.
pub fn supervisor_prompts(roster: &Roster) -> Result<SupervisorPrompts, minijinja::Error> {
    let env = Environment::new();
    let members: Vec<&str> = roster.iter().map(WorkerName::as_str).collect();
    let options = RoutingDecision::options(roster);
    let system = env.render_str(
        SUPERVISOR_SYSTEM_TEMPLATE,
        context! { members => members, finish => FINISH },
    )?;
    let selection = env.render_str(
        SUPERVISOR_SELECTION_TEMPLATE,
        context! { options => options, finish => FINISH },
    )?;
    Ok(SupervisorPrompts { system, selection })
}

/// Renders the note sent with a retried classification.
///
/// # Errors
///
/// Returns [`minijinja::Error`] if the template fails to render.
pub fn correction_note(rejected: &str, roster: &Roster) -> Result<String, minijinja::Error> {
    Environment::new().render_str(
        CORRECTION_TEMPLATE,
        context! { rejected => rejected, options => RoutingDecision::options(roster) },
    )
}

/// Returns the default instruction context for `worker`.
#[must_use]
pub const fn default_instructions(worker: WorkerName) -> &'static str {
    match worker {
        WorkerName::Initializer => {
            "You initialise generated applications. Set the project up from the \
             provided template parameters and confirm it was generated correctly."
        }
        WorkerName::Verifier => {
            "You verify generated applications. Check that the project, its build \
             wrapper and its manifest exist, then build and run it and report \
             whether it started."
        }
        WorkerName::SourceReader => {
            "You read the source file being migrated. Return its entire content \
             exactly, preserving code, comments and structure."
        }
        WorkerName::CodeWriter => {
            "You migrate code into the generated application. Produce idiomatic \
             source for the target framework that preserves every endpoint and \
             business rule of the original, and write it into the project."
        }
    }
}
