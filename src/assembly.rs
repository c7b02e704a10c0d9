//! Wires the four code-generation workers into an orchestration graph.

use crate::codegen::{
    ports::{BuildLauncher, TemplateService},
    services::{BuildVerifier, ScaffoldFetcher, SourceFiles},
};
use crate::config::RunConfig;
use crate::orchestration::{
    adapters::{ReadSourceCapability, ScaffoldCapability, VerifyCapability, WriteCodeCapability},
    domain::WorkerName,
    ports::{CodeDrafter, RoutingClassifier},
    services::{GraphBuildError, OrchestrationGraph, WorkerUnit},
};
use mockable::Clock;
use std::sync::Arc;

/// External collaborators needed by a code-generation graph.
pub struct Collaborators<C, T, L, D> {
    /// Chooses the next worker.
    pub classifier: Arc<C>,
    /// Produces scaffold archives.
    pub template_service: Arc<T>,
    /// Starts build processes for verification.
    pub launcher: Arc<L>,
    /// Drafts code for the code writer.
    pub drafter: Arc<D>,
}

/// Builds a graph with the initializer, verifier, source-reader and
/// code-writer workers configured from `config`.
///
/// # Errors
///
/// Returns [`GraphBuildError`] when the supervisor prompts fail to render.
pub fn codegen_graph<C, T, L, D, K>(
    config: &RunConfig,
    collaborators: Collaborators<C, T, L, D>,
    clock: Arc<K>,
) -> Result<OrchestrationGraph<C, K>, GraphBuildError>
where
    C: RoutingClassifier,
    T: TemplateService + 'static,
    L: BuildLauncher + 'static,
    D: CodeDrafter + 'static,
    K: Clock + Send + Sync,
{
    let files = SourceFiles::new();
    let scaffold = ScaffoldCapability::new(
        ScaffoldFetcher::new(collaborators.template_service),
        config.template.clone(),
        config.target_dir.clone(),
    );
    let verify = VerifyCapability::new(BuildVerifier::new(
        collaborators.launcher,
        config.verifier_settings(),
    ));
    let read_source = ReadSourceCapability::new(files, config.source_path.clone());
    let write_code = WriteCodeCapability::new(collaborators.drafter, files);

    OrchestrationGraph::builder(collaborators.classifier, clock)
        .with_worker(WorkerUnit::new(WorkerName::Initializer, Arc::new(scaffold)))
        .with_worker(WorkerUnit::new(WorkerName::Verifier, Arc::new(verify)))
        .with_worker(WorkerUnit::new(
            WorkerName::SourceReader,
            Arc::new(read_source),
        ))
        .with_worker(WorkerUnit::new(WorkerName::CodeWriter, Arc::new(write_code)))
        .with_budget(config.step_budget)
        .with_retry_policy(config.routing)
        .build()
}
