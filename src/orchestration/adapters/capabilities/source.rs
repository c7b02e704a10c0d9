//! Capability that reads the source being migrated.

use crate::codegen::services::SourceFiles;
use crate::orchestration::{
    domain::metadata::SOURCE_PATH,
    ports::{CapabilityError, CapabilityKind, CapabilityOutput, WorkerCapability, WorkerContext},
};
use async_trait::async_trait;
use camino::Utf8PathBuf;
use serde_json::Value;

/// Reads a source file so later workers can see its contents.
///
/// The configured path wins over one recorded in task metadata.
#[derive(Debug, Clone, Default)]
pub struct ReadSourceCapability {
    files: SourceFiles,
    source_path: Option<Utf8PathBuf>,
}

impl ReadSourceCapability {
    /// Creates a capability reading `source_path`, if configured.
    #[must_use]
    pub const fn new(files: SourceFiles, source_path: Option<Utf8PathBuf>) -> Self {
        Self { files, source_path }
    }
}

#[async_trait]
impl WorkerCapability for ReadSourceCapability {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::ReadSource
    }

    async fn execute(
        &self,
        context: &WorkerContext<'_>,
    ) -> Result<CapabilityOutput, CapabilityError> {
        let path = self
            .source_path
            .clone()
            .or_else(|| context.metadata.get_str(SOURCE_PATH).map(Utf8PathBuf::from))
            .ok_or(CapabilityError::MissingArgument(SOURCE_PATH))?;

        let contents = self
            .files
            .read(&path)
            .await
            .map_err(CapabilityError::recoverable)?;
        Ok(
            CapabilityOutput::new(format!("Contents of {path}:\n{contents}"))
                .with_metadata(SOURCE_PATH, Value::String(path.into_string())),
        )
    }
}
