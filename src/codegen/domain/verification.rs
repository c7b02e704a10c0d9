//! Build/run verification values and settings.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of one verification run.
///
/// A value, not shared state: produced once and never mutated afterwards.
/// An application that did not confirm startup is reported as
/// `app_started == false`, never as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// The project directory exists.
    pub project_exists: bool,
    /// The build wrapper script exists.
    pub wrapper_exists: bool,
    /// The build manifest exists.
    pub manifest_exists: bool,
    /// The success marker appeared in the build output.
    pub app_started: bool,
}

impl VerificationResult {
    /// Returns `true` when every check passed.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.project_exists && self.wrapper_exists && self.manifest_exists && self.app_started
    }
}

/// How the verifier builds, runs and judges a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierSettings {
    /// Build wrapper script relative to the project root.
    pub wrapper_script: String,
    /// Build manifest relative to the project root.
    pub manifest_file: String,
    /// Arguments that make the wrapper run the application.
    pub run_args: Vec<String>,
    /// Output substring that confirms the application started.
    pub success_marker: String,
    /// Longest wait for the success marker before the child is killed.
    pub startup_timeout: Duration,
    /// Longest wait for the child to exit after it is signalled.
    pub shutdown_grace: Duration,
}

impl VerifierSettings {
    /// Creates Maven wrapper settings that wait for `success_marker`.
    #[must_use]
    pub fn new(success_marker: impl Into<String>) -> Self {
        Self {
            wrapper_script: "mvnw".to_owned(),
            manifest_file: "pom.xml".to_owned(),
            run_args: vec!["spring-boot:run".to_owned()],
            success_marker: success_marker.into(),
            startup_timeout: Duration::from_secs(300),
            shutdown_grace: Duration::from_secs(30),
        }
    }

    /// Creates settings whose marker is `Started <application_class>`.
    #[must_use]
    pub fn for_application(application_class: &str) -> Self {
        Self::new(format!("Started {application_class}"))
    }

    /// Sets the startup timeout.
    #[must_use]
    pub const fn with_startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout = timeout;
        self
    }

    /// Sets the shutdown grace period.
    #[must_use]
    pub const fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }
}

/// A build tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    /// Program to execute.
    pub program: Utf8PathBuf,
    /// Program arguments.
    pub args: Vec<String>,
    /// Working directory.
    pub working_dir: Utf8PathBuf,
}

impl BuildCommand {
    /// Creates a command running `program` with `args` in `working_dir`.
    #[must_use]
    pub fn new(
        program: impl Into<Utf8PathBuf>,
        args: impl IntoIterator<Item = String>,
        working_dir: &Utf8Path,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
            working_dir: working_dir.to_owned(),
        }
    }
}
