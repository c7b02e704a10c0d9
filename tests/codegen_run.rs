//! End-to-end runs of the assembled code-generation graph.

mod test_helpers;

use atelier::assembly::{Collaborators, codegen_graph};
use atelier::codegen::adapters::{ScriptEnd, ScriptedBuildLauncher, StaticTemplateService};
use atelier::codegen::domain::TemplateParams;
use atelier::config::RunConfig;
use atelier::orchestration::adapters::{ScriptedClassifier, StaticDrafter};
use atelier::orchestration::domain::{WorkerName, metadata};
use atelier::orchestration::ports::GeneratedSource;
use atelier::orchestration::services::{OrchestrationError, StepBudget};
use eyre::{WrapErr, ensure, eyre};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use tempfile::TempDir;
use test_helpers::{scaffold_archive, utf8_path};

struct Harness {
    _temp: TempDir,
    config: RunConfig,
    template_service: Arc<StaticTemplateService>,
    launcher: ScriptedBuildLauncher,
}

fn harness(budget: u32) -> eyre::Result<Harness> {
    let temp = TempDir::new().wrap_err("create temp dir")?;
    let target = utf8_path(&temp)?.join("generated");
    let template = TemplateParams::new("com.example", "demo").with_dependency_list("web");
    let mut config = RunConfig::new(target, template, "Create a demo web application");
    config.step_budget = StepBudget::new(budget).wrap_err("budget")?;
    config.verifier.startup_timeout_secs = 5;
    config.verifier.shutdown_grace_secs = 1;

    Ok(Harness {
        _temp: temp,
        config,
        template_service: Arc::new(StaticTemplateService::new(scaffold_archive("demo")?)),
        launcher: ScriptedBuildLauncher::new([
            "[INFO] Scanning for projects...",
            "[INFO] Building demo 0.0.1-SNAPSHOT",
            "Started DemoApplication in 1.9 seconds",
        ])
        .ending_with(ScriptEnd::Hang),
    })
}

fn collaborators(
    harness: &Harness,
    classifier: &ScriptedClassifier,
) -> Collaborators<ScriptedClassifier, StaticTemplateService, ScriptedBuildLauncher, StaticDrafter>
{
    Collaborators {
        classifier: Arc::new(classifier.clone()),
        template_service: Arc::clone(&harness.template_service),
        launcher: Arc::new(harness.launcher.clone()),
        drafter: Arc::new(StaticDrafter::new(GeneratedSource::new(
            "src/main/java/com/example/demo/HelloController.java",
            "class HelloController {}",
        ))),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initializer_records_project_path_after_one_message() -> eyre::Result<()> {
    let harness = harness(5)?;
    let classifier = ScriptedClassifier::new(["initializer", "FINISH"]);
    let graph = codegen_graph(
        &harness.config,
        collaborators(&harness, &classifier),
        Arc::new(DefaultClock),
    )?;

    let report = graph
        .run(harness.config.task.clone())
        .await
        .map_err(|failure| eyre!("run failed: {}", failure.error))?;

    let state = &report.state;
    ensure!(state.messages().len() == 1, "expected exactly one message");
    ensure!(state.messages()[0].author() == WorkerName::Initializer);
    let expected = harness.config.target_dir.join("demo");
    ensure!(
        state.metadata().get_str(metadata::PROJECT_PATH) == Some(expected.as_str()),
        "project_path should be {expected}"
    );
    ensure!(expected.join("pom.xml").is_file(), "scaffold extracted");

    let requests = harness.template_service.requests()?;
    ensure!(requests.len() == 1);
    ensure!(requests[0].dependencies == ["web"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_pipeline_scaffolds_writes_and_verifies() -> eyre::Result<()> {
    let harness = harness(12)?;
    let source_dir = harness.config.target_dir.with_file_name("legacy");
    std::fs::create_dir_all(&source_dir).wrap_err("create legacy dir")?;
    let source = source_dir.join("HelloServlet.java");
    std::fs::write(&source, "class HelloServlet {}").wrap_err("write legacy source")?;
    let mut config = harness.config.clone();
    config.source_path = Some(source.clone());

    let classifier = ScriptedClassifier::new([
        "Initialization",
        "File_reader",
        "Controller_Writer",
        "Testing",
        "FINISH",
    ]);
    let graph = codegen_graph(
        &config,
        collaborators(&harness, &classifier),
        Arc::new(DefaultClock),
    )?;

    let report = graph
        .run(config.task.clone())
        .await
        .map_err(|failure| eyre!("run failed: {}", failure.error))?;

    let authors: Vec<_> = report
        .state
        .messages()
        .iter()
        .map(|entry| entry.author())
        .collect();
    ensure!(
        authors
            == [
                WorkerName::Initializer,
                WorkerName::SourceReader,
                WorkerName::CodeWriter,
                WorkerName::Verifier,
            ],
        "unexpected authors {authors:?}"
    );
    ensure!(report.steps == 9);
    ensure!(report.state.messages()[1].content().contains("class HelloServlet {}"));

    let controller = config
        .project_path()
        .join("src/main/java/com/example/demo/HelloController.java");
    ensure!(controller.is_file(), "controller written");
    let written = report
        .state
        .metadata()
        .get(metadata::WRITTEN_FILES)
        .and_then(|value| value.as_array())
        .ok_or_else(|| eyre!("written_files missing"))?;
    ensure!(written.len() == 1);

    let verification = report
        .state
        .metadata()
        .get(metadata::VERIFICATION)
        .ok_or_else(|| eyre!("verification missing"))?;
    ensure!(verification["app_started"] == true);
    ensure!(harness.launcher.log().interrupts() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn verifier_before_scaffold_reports_missing_project() -> eyre::Result<()> {
    let harness = harness(5)?;
    let classifier = ScriptedClassifier::new(["verifier", "FINISH"]);
    let graph = codegen_graph(
        &harness.config,
        collaborators(&harness, &classifier),
        Arc::new(DefaultClock),
    )?;

    let report = graph
        .run(harness.config.task.clone())
        .await
        .map_err(|failure| eyre!("run failed: {}", failure.error))?;

    ensure!(report.state.messages()[0].content().contains("does not exist"));
    ensure!(harness.launcher.log().launches().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn source_reader_without_path_aborts_run() -> eyre::Result<()> {
    let harness = harness(5)?;
    let classifier = ScriptedClassifier::new(["source_reader"]);
    let graph = codegen_graph(
        &harness.config,
        collaborators(&harness, &classifier),
        Arc::new(DefaultClock),
    )?;

    let failure = match graph.run(harness.config.task.clone()).await {
        Ok(_) => return Err(eyre!("run should abort without a source path")),
        Err(failure) => failure,
    };

    ensure!(matches!(
        failure.error,
        OrchestrationError::Worker {
            worker: WorkerName::SourceReader,
            ..
        }
    ));
    ensure!(failure.state.messages().is_empty());
    Ok(())
}
