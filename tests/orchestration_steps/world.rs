//! World state for orchestration run scenarios.

use atelier::codegen::adapters::{ScriptedBuildLauncher, StaticTemplateService};
use atelier::config::RunConfig;
use atelier::orchestration::adapters::ScriptedClassifier;
use atelier::orchestration::services::{RunFailure, RunReport};
use camino::Utf8PathBuf;
use rstest::fixture;
use std::sync::Arc;
use tempfile::TempDir;

/// Scenario state shared between steps.
pub struct RunWorld {
    pub temp: TempDir,
    pub config: Option<RunConfig>,
    pub template_service: Option<Arc<StaticTemplateService>>,
    pub launcher: Option<ScriptedBuildLauncher>,
    pub classifier: Option<ScriptedClassifier>,
    pub outcome: Option<Result<RunReport, Box<RunFailure>>>,
}

impl RunWorld {
    pub fn target_dir(&self) -> eyre::Result<Utf8PathBuf> {
        Ok(crate::test_helpers::utf8_path(&self.temp)?.join("generated"))
    }
}

#[fixture]
pub fn world() -> RunWorld {
    RunWorld {
        temp: TempDir::new().expect("create scenario temp dir"),
        config: None,
        template_service: None,
        launcher: None,
        classifier: None,
        outcome: None,
    }
}

pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument into trimmed items.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
