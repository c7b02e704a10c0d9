//! Capability that writes drafted code into the scaffold.

use crate::codegen::services::SourceFiles;
use crate::orchestration::{
    domain::metadata::{PROJECT_PATH, WRITTEN_FILES},
    ports::{
        CapabilityError, CapabilityKind, CapabilityOutput, CodeDrafter, WorkerCapability,
        WorkerContext,
    },
};
use async_trait::async_trait;
use camino::Utf8Path;
use serde_json::Value;
use std::sync::Arc;

/// Asks the drafter for a file and writes it under the project root.
pub struct WriteCodeCapability<D>
where
    D: CodeDrafter,
{
    drafter: Arc<D>,
    files: SourceFiles,
}

impl<D> WriteCodeCapability<D>
where
    D: CodeDrafter,
{
    /// Creates a capability writing files produced by `drafter`.
    #[must_use]
    pub const fn new(drafter: Arc<D>, files: SourceFiles) -> Self {
        Self { drafter, files }
    }
}

#[async_trait]
impl<D> WorkerCapability for WriteCodeCapability<D>
where
    D: CodeDrafter + 'static,
{
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::WriteCode
    }

    async fn execute(
        &self,
        context: &WorkerContext<'_>,
    ) -> Result<CapabilityOutput, CapabilityError> {
        let project = context.metadata.get_str(PROJECT_PATH).ok_or_else(|| {
            CapabilityError::Recoverable("no project scaffold to write into".to_owned())
        })?;

        let source = self
            .drafter
            .draft(context)
            .await
            .map_err(CapabilityError::recoverable)?;
        let path = self
            .files
            .write_under(Utf8Path::new(project), &source.relative_path, &source.content)
            .await
            .map_err(CapabilityError::recoverable)?;

        let mut written = context
            .metadata
            .get(WRITTEN_FILES)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let entry = Value::String(path.to_string());
        if !written.contains(&entry) {
            written.push(entry);
        }

        Ok(CapabilityOutput::new(format!(
            "Wrote {} ({} bytes)",
            path,
            source.content.len()
        ))
        .with_metadata(WRITTEN_FILES, Value::Array(written)))
    }
}
