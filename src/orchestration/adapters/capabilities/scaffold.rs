//! Capability that fetches the project scaffold.

use crate::codegen::{domain::TemplateParams, ports::TemplateService, services::ScaffoldFetcher};
use crate::orchestration::{
    domain::metadata::{KEY_FILES, PROJECT_PATH},
    ports::{CapabilityError, CapabilityKind, CapabilityOutput, WorkerCapability, WorkerContext},
};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use serde_json::Value;

/// Fetches and extracts the configured template into the target
/// directory, recording the project path and key files.
pub struct ScaffoldCapability<T>
where
    T: TemplateService,
{
    fetcher: ScaffoldFetcher<T>,
    params: TemplateParams,
    target_dir: Utf8PathBuf,
}

impl<T> ScaffoldCapability<T>
where
    T: TemplateService,
{
    /// Creates a capability scaffolding `params` into `target_dir`.
    #[must_use]
    pub const fn new(
        fetcher: ScaffoldFetcher<T>,
        params: TemplateParams,
        target_dir: Utf8PathBuf,
    ) -> Self {
        Self {
            fetcher,
            params,
            target_dir,
        }
    }
}

#[async_trait]
impl<T> WorkerCapability for ScaffoldCapability<T>
where
    T: TemplateService + 'static,
{
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Scaffold
    }

    async fn execute(
        &self,
        _context: &WorkerContext<'_>,
    ) -> Result<CapabilityOutput, CapabilityError> {
        let scaffold = self
            .fetcher
            .fetch(&self.params, &self.target_dir)
            .await
            .map_err(CapabilityError::recoverable)?;

        let key_files = scaffold
            .key_files()
            .iter()
            .map(|path| Value::String(path.to_string()))
            .collect::<Vec<_>>();
        let listing = scaffold
            .key_files()
            .iter()
            .map(|path| path.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let content = format!(
            "Scaffold for {}:{} created at {} (sha256 {}). Key files: {}",
            self.params.group_id,
            self.params.artifact_id,
            scaffold.project_path(),
            scaffold.archive_sha256(),
            if listing.is_empty() {
                "none"
            } else {
                listing.as_str()
            },
        );
        Ok(CapabilityOutput::new(content)
            .with_metadata(PROJECT_PATH, Value::String(scaffold.project_path().to_string()))
            .with_metadata(KEY_FILES, Value::Array(key_files)))
    }
}
