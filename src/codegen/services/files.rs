//! Writes generated files and reads existing sources.

use crate::codegen::domain::{CodegenError, CodegenResult};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::io;
use tracing::debug;

/// Plain filesystem access for the code writer and source reader.
///
/// Writes are not atomic; a failed write may leave a partial file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceFiles;

impl SourceFiles {
    /// Creates a file accessor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Writes `content` to `path`, creating missing parent directories and
    /// overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Io`] when a directory or the file cannot be
    /// written.
    pub async fn write(&self, path: &Utf8Path, content: &str) -> CodegenResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| CodegenError::io(parent, err))?;
        }
        tokio::fs::write(path, content)
            .await
            .map_err(|err| CodegenError::io(path, err))?;
        debug!(path = %path, bytes = content.len(), "file written");
        Ok(())
    }

    /// Writes `content` to `root/relative` and returns the full path.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Io`] with [`io::ErrorKind::InvalidInput`]
    /// when `relative` is absolute or climbs out of `root`, or any error
    /// from [`SourceFiles::write`].
    pub async fn write_under(
        &self,
        root: &Utf8Path,
        relative: &Utf8Path,
        content: &str,
    ) -> CodegenResult<Utf8PathBuf> {
        let escapes = relative
            .components()
            .any(|component| !matches!(component, Utf8Component::Normal(_) | Utf8Component::CurDir));
        if escapes || relative.as_str().is_empty() {
            return Err(CodegenError::io(
                relative,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "path must be relative to the project root",
                ),
            ));
        }
        let path = root.join(relative);
        self.write(&path, content).await?;
        Ok(path)
    }

    /// Reads the UTF-8 contents of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Io`] when the file cannot be read.
    pub async fn read(&self, path: &Utf8Path) -> CodegenResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|err| CodegenError::io(path, err))
    }
}
