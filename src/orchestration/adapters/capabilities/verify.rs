//! Capability that builds and runs the scaffolded project.

use crate::codegen::{domain::VerificationResult, ports::BuildLauncher, services::BuildVerifier};
use crate::orchestration::{
    domain::metadata::{PROJECT_PATH, VERIFICATION},
    ports::{CapabilityError, CapabilityKind, CapabilityOutput, WorkerCapability, WorkerContext},
};
use async_trait::async_trait;
use camino::Utf8Path;
use serde_json::{Value, json};

/// Runs the verifier against the recorded project path.
pub struct VerifyCapability<L>
where
    L: BuildLauncher,
{
    verifier: BuildVerifier<L>,
}

impl<L> VerifyCapability<L>
where
    L: BuildLauncher,
{
    /// Creates a capability using `verifier`.
    #[must_use]
    pub const fn new(verifier: BuildVerifier<L>) -> Self {
        Self { verifier }
    }
}

fn to_value(result: VerificationResult) -> Value {
    json!({
        "project_exists": result.project_exists,
        "wrapper_exists": result.wrapper_exists,
        "manifest_exists": result.manifest_exists,
        "app_started": result.app_started,
    })
}

fn summary(project: &str, result: VerificationResult) -> String {
    let verdict = if result.is_success() {
        "application started"
    } else {
        "application did not start"
    };
    format!(
        "Verification of {project}: {verdict} (project_exists={}, wrapper_exists={}, \
         manifest_exists={}, app_started={})",
        result.project_exists, result.wrapper_exists, result.manifest_exists, result.app_started,
    )
}

#[async_trait]
impl<L> WorkerCapability for VerifyCapability<L>
where
    L: BuildLauncher + 'static,
{
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::Verify
    }

    async fn execute(
        &self,
        context: &WorkerContext<'_>,
    ) -> Result<CapabilityOutput, CapabilityError> {
        let Some(project) = context.metadata.get_str(PROJECT_PATH) else {
            let result = VerificationResult::default();
            return Ok(CapabilityOutput::new(
                "Verification skipped: the project does not exist yet",
            )
            .with_metadata(VERIFICATION, to_value(result)));
        };

        let result = self.verifier.verify(Utf8Path::new(project)).await;
        Ok(CapabilityOutput::new(summary(project, result))
            .with_metadata(VERIFICATION, to_value(result)))
    }
}
