//! Given steps for orchestration run scenarios.

use super::world::{RunWorld, split_list};
use crate::test_helpers::scaffold_archive;
use atelier::codegen::adapters::{ScriptEnd, ScriptedBuildLauncher, StaticTemplateService};
use atelier::codegen::domain::TemplateParams;
use atelier::config::RunConfig;
use atelier::orchestration::adapters::ScriptedClassifier;
use rstest_bdd_macros::given;
use std::sync::Arc;

fn configure(world: &mut RunWorld, template: TemplateParams) -> Result<(), eyre::Report> {
    let mut config = RunConfig::new(world.target_dir()?, template, "Create a web application");
    config.verifier.startup_timeout_secs = 5;
    config.verifier.shutdown_grace_secs = 1;
    world.config = Some(config);
    Ok(())
}

#[given(r#"a scaffold archive for "{group}" "{artifact}" with dependencies "{dependencies}""#)]
fn scaffold_archive_for(
    world: &mut RunWorld,
    group: String,
    artifact: String,
    dependencies: String,
) -> Result<(), eyre::Report> {
    world.template_service = Some(Arc::new(StaticTemplateService::new(scaffold_archive(
        &artifact,
    )?)));
    configure(
        world,
        TemplateParams::new(group, artifact).with_dependency_list(&dependencies),
    )
}

#[given("a corrupt scaffold archive")]
fn corrupt_scaffold_archive(world: &mut RunWorld) -> Result<(), eyre::Report> {
    world.template_service = Some(Arc::new(StaticTemplateService::new(
        b"not a zip archive".to_vec(),
    )));
    configure(world, TemplateParams::new("com.example", "demo"))
}

#[given("a build that reports the application started")]
fn build_that_starts(world: &mut RunWorld) {
    world.launcher = Some(
        ScriptedBuildLauncher::new([
            "[INFO] Scanning for projects...",
            "Started DemoApplication in 1.2 seconds",
        ])
        .ending_with(ScriptEnd::Hang),
    );
}

#[given(r#"a supervisor answering "{answers}""#)]
fn supervisor_answering(world: &mut RunWorld, answers: String) {
    world.classifier = Some(ScriptedClassifier::new(split_list(&answers)));
}

#[given(r#"a supervisor that always answers "{answer}""#)]
fn supervisor_always_answering(world: &mut RunWorld, answer: String) {
    world.classifier = Some(ScriptedClassifier::repeating(answer));
}
