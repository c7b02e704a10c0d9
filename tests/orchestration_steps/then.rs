//! Then steps for orchestration run scenarios.

use super::world::{RunWorld, split_list};
use atelier::orchestration::domain::{ConversationState, WorkerName, metadata};
use atelier::orchestration::services::{OrchestrationError, RunFailure, RunReport};
use eyre::eyre;
use rstest_bdd_macros::then;

fn report(world: &RunWorld) -> Result<&RunReport, eyre::Report> {
    match world.outcome.as_ref() {
        Some(Ok(report)) => Ok(report),
        Some(Err(failure)) => Err(eyre!("run failed unexpectedly: {}", failure.error)),
        None => Err(eyre!("the run has not executed")),
    }
}

fn failure(world: &RunWorld) -> Result<&RunFailure, eyre::Report> {
    match world.outcome.as_ref() {
        Some(Err(failure)) => Ok(failure),
        Some(Ok(report)) => Err(eyre!("run finished after {} steps", report.steps)),
        None => Err(eyre!("the run has not executed")),
    }
}

fn final_state(world: &RunWorld) -> Result<&ConversationState, eyre::Report> {
    match world.outcome.as_ref() {
        Some(Ok(report)) => Ok(&report.state),
        Some(Err(failure)) => Ok(&failure.state),
        None => Err(eyre!("the run has not executed")),
    }
}

#[then("the run finishes after {steps:u32} transitions")]
fn run_finishes(world: &RunWorld, steps: u32) -> Result<(), eyre::Report> {
    let report = report(world)?;
    if report.steps != steps {
        return Err(eyre!("expected {steps} transitions, found {}", report.steps));
    }
    Ok(())
}

#[then(r#"the messages are authored by "{authors}""#)]
fn messages_authored_by(world: &RunWorld, authors: String) -> Result<(), eyre::Report> {
    let expected = split_list(&authors)
        .iter()
        .map(|name| WorkerName::try_from(name.as_str()))
        .collect::<Result<Vec<_>, _>>()?;
    let actual: Vec<_> = final_state(world)?
        .messages()
        .iter()
        .map(|entry| entry.author())
        .collect();
    if actual != expected {
        return Err(eyre!("expected authors {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the project path is the target directory joined with "{artifact}""#)]
fn project_path_recorded(world: &RunWorld, artifact: String) -> Result<(), eyre::Report> {
    let expected = world.target_dir()?.join(artifact);
    let recorded = final_state(world)?
        .metadata()
        .get_str(metadata::PROJECT_PATH)
        .ok_or_else(|| eyre!("project_path was not recorded"))?;
    if recorded != expected.as_str() {
        return Err(eyre!("expected project path {expected}, found {recorded}"));
    }
    Ok(())
}

#[then("the verification reports the application started")]
fn verification_started(world: &RunWorld) -> Result<(), eyre::Report> {
    let verification = final_state(world)?
        .metadata()
        .get(metadata::VERIFICATION)
        .ok_or_else(|| eyre!("verification was not recorded"))?;
    if verification.get("app_started").and_then(serde_json::Value::as_bool) != Some(true) {
        return Err(eyre!("application did not start: {verification}"));
    }
    let interrupts = world
        .launcher
        .as_ref()
        .map(|launcher| launcher.log().interrupts())
        .unwrap_or_default();
    if interrupts != 1 {
        return Err(eyre!("expected one interrupt, found {interrupts}"));
    }
    Ok(())
}

#[then("the run fails because the step budget of {budget:u32} was exceeded")]
fn budget_exceeded(world: &RunWorld, budget: u32) -> Result<(), eyre::Report> {
    let failure = failure(world)?;
    match failure.error {
        OrchestrationError::StepBudgetExceeded { budget: reported } if reported == budget => {}
        ref other => return Err(eyre!("unexpected error: {other}")),
    }
    if failure.steps != budget {
        return Err(eyre!("expected {budget} transitions, found {}", failure.steps));
    }
    Ok(())
}

#[then(r#"the run fails with invalid routing decision "{value}""#)]
fn invalid_decision(world: &RunWorld, value: String) -> Result<(), eyre::Report> {
    match &failure(world)?.error {
        OrchestrationError::InvalidRoutingDecision { value: rejected } if *rejected == value => {
            Ok(())
        }
        other => Err(eyre!("unexpected error: {other}")),
    }
}

#[then("the partial state holds {count:u32} messages")]
fn partial_state_holds(world: &RunWorld, count: u32) -> Result<(), eyre::Report> {
    let found = failure(world)?.state.messages().len();
    if found != usize::try_from(count)? {
        return Err(eyre!("expected {count} messages, found {found}"));
    }
    Ok(())
}

#[then(r#"the message from "{worker}" reports a failure"#)]
fn message_reports_failure(world: &RunWorld, worker: String) -> Result<(), eyre::Report> {
    let author = WorkerName::try_from(worker.as_str())?;
    let entry = final_state(world)?
        .messages()
        .iter()
        .find(|entry| entry.author() == author)
        .ok_or_else(|| eyre!("no message from {worker}"))?;
    if !entry.content().starts_with(&format!("{author} failed:")) {
        return Err(eyre!("message does not report a failure: {}", entry.content()));
    }
    Ok(())
}
