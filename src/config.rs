//! Per-run configuration.
//!
//! Every setting a run needs travels in one [`RunConfig`] value that is
//! handed to [`crate::assembly::codegen_graph`]. Nothing is cached between
//! runs.

use crate::codegen::{
    adapters::{DEFAULT_TEMPLATE_ENDPOINT, HttpTemplateService},
    domain::{TemplateParams, VerifierSettings},
    ports::TemplateServiceResult,
};
use crate::orchestration::services::{RoutingRetryPolicy, StepBudget};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Longest verifier wait accepted from configuration, one day.
pub const MAX_VERIFIER_WAIT_SECS: u64 = 86_400;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON for [`RunConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for one code-generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory the scaffold is extracted into.
    pub target_dir: Utf8PathBuf,
    /// Template parameters for the scaffold.
    #[serde(default)]
    pub template: TemplateParams,
    /// Natural-language task handed to the supervisor.
    pub task: String,
    /// Maximum number of graph transitions.
    #[serde(default)]
    pub step_budget: StepBudget,
    /// How the supervisor treats invalid classifier answers.
    #[serde(default)]
    pub routing: RoutingRetryPolicy,
    /// Build/run verifier settings.
    #[serde(default)]
    pub verifier: VerifierConfig,
    /// Template service settings.
    #[serde(default)]
    pub template_service: TemplateServiceConfig,
    /// Source file for the source-reader worker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<Utf8PathBuf>,
}

impl RunConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new(
        target_dir: impl Into<Utf8PathBuf>,
        template: TemplateParams,
        task: impl Into<String>,
    ) -> Self {
        Self {
            target_dir: target_dir.into(),
            template,
            task: task.into(),
            step_budget: StepBudget::default(),
            routing: RoutingRetryPolicy::default(),
            verifier: VerifierConfig::default(),
            template_service: TemplateServiceConfig::default(),
            source_path: None,
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the JSON configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, or any
    /// error from [`RunConfig::from_json_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty task, an empty
    /// artifact identifier, a zero startup timeout, or a verifier wait
    /// longer than a day.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.task.trim().is_empty() {
            return Err(ConfigError::Invalid("task must not be empty".to_owned()));
        }
        if self.template.artifact_id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "template.artifact_id must not be empty".to_owned(),
            ));
        }
        if self.verifier.startup_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "verifier.startup_timeout_secs must be at least 1".to_owned(),
            ));
        }
        for (field, secs) in [
            ("startup_timeout_secs", self.verifier.startup_timeout_secs),
            ("shutdown_grace_secs", self.verifier.shutdown_grace_secs),
        ] {
            if secs > MAX_VERIFIER_WAIT_SECS {
                return Err(ConfigError::Invalid(format!(
                    "verifier.{field} must not exceed {MAX_VERIFIER_WAIT_SECS}"
                )));
            }
        }
        Ok(())
    }

    /// Returns the expected project directory, `target_dir/artifact_id`.
    #[must_use]
    pub fn project_path(&self) -> Utf8PathBuf {
        self.target_dir.join(&self.template.artifact_id)
    }

    /// Returns the verifier settings for this run's template.
    #[must_use]
    pub fn verifier_settings(&self) -> VerifierSettings {
        self.verifier.settings(&self.template)
    }
}

/// Verifier section of [`RunConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Build wrapper script relative to the project root.
    #[serde(default = "default_wrapper_script")]
    pub wrapper_script: String,
    /// Build manifest relative to the project root.
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    /// Arguments that run the application.
    #[serde(default = "default_run_args")]
    pub run_args: Vec<String>,
    /// Overrides the marker derived from the application name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_marker: Option<String>,
    /// Seconds to wait for the success marker.
    #[serde(default = "default_startup_timeout_secs")]
    pub startup_timeout_secs: u64,
    /// Seconds to wait for exit after signalling the process.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

fn default_wrapper_script() -> String {
    "mvnw".into()
}

fn default_manifest_file() -> String {
    "pom.xml".into()
}

fn default_run_args() -> Vec<String> {
    vec!["spring-boot:run".into()]
}

const fn default_startup_timeout_secs() -> u64 {
    300
}

const fn default_shutdown_grace_secs() -> u64 {
    30
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            wrapper_script: default_wrapper_script(),
            manifest_file: default_manifest_file(),
            run_args: default_run_args(),
            success_marker: None,
            startup_timeout_secs: default_startup_timeout_secs(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

impl VerifierConfig {
    /// Resolves verifier settings, deriving the success marker from the
    /// template's application name unless overridden.
    #[must_use]
    pub fn settings(&self, template: &TemplateParams) -> VerifierSettings {
        let success_marker = self
            .success_marker
            .clone()
            .unwrap_or_else(|| format!("Started {}", template.application_class()));
        VerifierSettings {
            wrapper_script: self.wrapper_script.clone(),
            manifest_file: self.manifest_file.clone(),
            run_args: self.run_args.clone(),
            success_marker,
            startup_timeout: Duration::from_secs(self.startup_timeout_secs),
            shutdown_grace: Duration::from_secs(self.shutdown_grace_secs),
        }
    }
}

/// Template service section of [`RunConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateServiceConfig {
    /// Archive endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_TEMPLATE_ENDPOINT.into()
}

const fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for TemplateServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl TemplateServiceConfig {
    /// Builds the HTTP template service described by this section.
    ///
    /// # Errors
    ///
    /// Returns the adapter's error when the HTTP client cannot be built.
    pub fn http_service(&self) -> TemplateServiceResult<HttpTemplateService> {
        HttpTemplateService::new(
            self.endpoint.clone(),
            Duration::from_secs(self.request_timeout_secs),
        )
    }
}
