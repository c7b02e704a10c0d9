//! When steps for orchestration run scenarios.

use super::world::{RunWorld, run_async};
use atelier::assembly::{Collaborators, codegen_graph};
use atelier::orchestration::adapters::StaticDrafter;
use atelier::orchestration::ports::GeneratedSource;
use atelier::orchestration::services::StepBudget;
use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use std::sync::Arc;

#[when("the run executes with a step budget of {budget:u32}")]
fn run_executes(world: &mut RunWorld, budget: u32) -> Result<(), eyre::Report> {
    let mut config = world
        .config
        .clone()
        .ok_or_else(|| eyre!("missing configuration in scenario world"))?;
    config.step_budget = StepBudget::new(budget).wrap_err("step budget")?;
    let collaborators = Collaborators {
        classifier: Arc::new(
            world
                .classifier
                .clone()
                .ok_or_else(|| eyre!("missing classifier in scenario world"))?,
        ),
        template_service: world
            .template_service
            .clone()
            .ok_or_else(|| eyre!("missing template service in scenario world"))?,
        launcher: Arc::new(
            world
                .launcher
                .clone()
                .ok_or_else(|| eyre!("missing launcher in scenario world"))?,
        ),
        drafter: Arc::new(StaticDrafter::new(GeneratedSource::new(
            "src/main/java/com/example/demo/HelloController.java",
            "class HelloController {}",
        ))),
    };

    let graph = codegen_graph(&config, collaborators, Arc::new(DefaultClock))
        .wrap_err("assemble graph")?;
    world.outcome = Some(run_async(graph.run(config.task.clone())));
    world.config = Some(config);
    Ok(())
}
