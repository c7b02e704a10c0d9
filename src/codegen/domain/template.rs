//! Parameters sent to the template-generation service.

use serde::{Deserialize, Serialize};

/// Describes the project scaffold to generate.
///
/// Field names follow the project vocabulary; [`TemplateParams::query_pairs`]
/// maps them onto the service's query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateParams {
    /// Build type, e.g. `maven-project` or `gradle-project`.
    pub project_type: String,
    /// Source language, e.g. `java`.
    pub language: String,
    /// Framework runtime version, e.g. `3.3.3`.
    pub runtime_version: String,
    /// Group identifier, e.g. `com.example`.
    pub group_id: String,
    /// Artifact identifier; also the name of the extracted project
    /// directory.
    pub artifact_id: String,
    /// Human-readable application name.
    pub name: String,
    /// Short project description.
    pub description: String,
    /// Base package name, e.g. `com.example.demo`.
    pub package_name: String,
    /// Packaging type, e.g. `jar` or `war`.
    pub packaging: String,
    /// Language version, e.g. `17`.
    pub language_version: String,
    /// Dependency identifiers, e.g. `web`, `data-jpa`.
    pub dependencies: Vec<String>,
}

impl Default for TemplateParams {
    fn default() -> Self {
        Self {
            project_type: "maven-project".to_owned(),
            language: "java".to_owned(),
            runtime_version: "3.3.3".to_owned(),
            group_id: "com.example".to_owned(),
            artifact_id: "demo".to_owned(),
            name: "demo".to_owned(),
            description: "Generated application".to_owned(),
            package_name: "com.example.demo".to_owned(),
            packaging: "jar".to_owned(),
            language_version: "17".to_owned(),
            dependencies: Vec::new(),
        }
    }
}

impl TemplateParams {
    /// Creates parameters for `group_id:artifact_id` with default versions.
    ///
    /// The name defaults to the artifact identifier and the package to
    /// `group_id.artifact_id`.
    #[must_use]
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        let group_id = group_id.into();
        let artifact_id = artifact_id.into();
        Self {
            package_name: format!("{group_id}.{artifact_id}"),
            name: artifact_id.clone(),
            group_id,
            artifact_id,
            ..Self::default()
        }
    }

    /// Sets the application name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the dependency list.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = String>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    /// Parses a comma-separated dependency list, dropping empty items.
    #[must_use]
    pub fn with_dependency_list(self, list: &str) -> Self {
        let dependencies = list
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>();
        self.with_dependencies(dependencies)
    }

    /// Returns the dependencies joined with commas.
    #[must_use]
    pub fn dependency_list(&self) -> String {
        self.dependencies.join(",")
    }

    /// Returns the name of the generated main class, e.g.
    /// `DemoApplication` for `demo` and `MyAppApplication` for `my-app`.
    #[must_use]
    pub fn application_class(&self) -> String {
        let camel: String = self
            .name
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter_map(|word| {
                let mut chars = word.chars();
                chars
                    .next()
                    .map(|first| first.to_uppercase().chain(chars).collect::<String>())
            })
            .collect();
        format!("{camel}Application")
    }

    /// Returns the service query parameters in request order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", self.project_type.clone()),
            ("language", self.language.clone()),
            ("bootVersion", self.runtime_version.clone()),
            ("baseDir", self.artifact_id.clone()),
            ("groupId", self.group_id.clone()),
            ("artifactId", self.artifact_id.clone()),
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("packageName", self.package_name.clone()),
            ("packaging", self.packaging.clone()),
            ("javaVersion", self.language_version.clone()),
            ("dependencies", self.dependency_list()),
        ]
    }
}
