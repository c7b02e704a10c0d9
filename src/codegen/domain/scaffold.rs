//! Result of a scaffold fetch.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// File names treated as key files of a scaffold.
const KEY_FILE_NAMES: [&str; 8] = [
    "pom.xml",
    "mvnw",
    "build.gradle",
    "build.gradle.kts",
    "gradlew",
    "application.properties",
    "application.yml",
    "application.yaml",
];

/// A freshly extracted project scaffold.
///
/// Immutable once returned; callers fold the fields they need into task
/// metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldResult {
    project_path: Utf8PathBuf,
    key_files: Vec<Utf8PathBuf>,
    archive_sha256: String,
}

impl ScaffoldResult {
    /// Creates a scaffold result.
    #[must_use]
    pub const fn new(
        project_path: Utf8PathBuf,
        key_files: Vec<Utf8PathBuf>,
        archive_sha256: String,
    ) -> Self {
        Self {
            project_path,
            key_files,
            archive_sha256,
        }
    }

    /// Returns `target_dir/artifact_id`.
    #[must_use]
    pub fn project_path(&self) -> &Utf8Path {
        &self.project_path
    }

    /// Returns the key files found in the archive, best effort.
    #[must_use]
    pub fn key_files(&self) -> &[Utf8PathBuf] {
        &self.key_files
    }

    /// Returns the hex SHA-256 digest of the downloaded archive.
    #[must_use]
    pub fn archive_sha256(&self) -> &str {
        &self.archive_sha256
    }
}

/// Returns `true` when `path` names a build manifest, build wrapper,
/// application config or main application class.
#[must_use]
pub fn is_key_file(path: &Utf8Path) -> bool {
    let Some(file_name) = path.file_name() else {
        return false;
    };
    KEY_FILE_NAMES.contains(&file_name)
        || file_name.ends_with("Application.java")
        || file_name.ends_with("Application.kt")
}
