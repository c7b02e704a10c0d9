//! Error types for the code-generation pipeline.

use crate::codegen::ports::TemplateServiceError;
use camino::{Utf8Path, Utf8PathBuf};
use std::io;
use thiserror::Error;

/// Result type for pipeline operations.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Errors raised by the scaffold fetcher and file writer.
///
/// These are recoverable at the worker boundary: capabilities fold them
/// into the conversation instead of aborting the run.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The template service could not produce an archive.
    #[error(transparent)]
    TemplateService(#[from] TemplateServiceError),

    /// The archive could not be read or contains unsafe entries.
    #[error("corrupt scaffold archive: {0}")]
    CorruptArchive(String),

    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl CodegenError {
    /// Creates an I/O error for `path`.
    #[must_use]
    pub fn io(path: &Utf8Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }

    /// Creates a corrupt-archive error.
    #[must_use]
    pub fn corrupt_archive(reason: impl Into<String>) -> Self {
        Self::CorruptArchive(reason.into())
    }
}
