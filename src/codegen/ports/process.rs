//! Ports for launching and supervising a build tool process.

use crate::codegen::domain::BuildCommand;
use async_trait::async_trait;
use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;

/// Spawns build tool processes.
#[async_trait]
pub trait BuildLauncher: Send + Sync {
    /// Starts `command` with stdout and stderr merged into one line stream.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError`] when the process cannot be spawned.
    async fn launch(&self, command: &BuildCommand) -> Result<Box<dyn BuildProcess>, LaunchError>;
}

/// A running build tool process.
#[async_trait]
pub trait BuildProcess: Send {
    /// Returns the next merged output line, or `None` once both streams
    /// are closed.
    async fn next_line(&mut self) -> Option<String>;

    /// Asks the process to stop gracefully.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError`] when the signal cannot be delivered.
    async fn interrupt(&mut self) -> Result<(), ProcessError>;

    /// Forcibly terminates the process.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError`] when the process cannot be killed.
    async fn kill(&mut self) -> Result<(), ProcessError>;

    /// Stops reading output and waits for the process to exit, returning
    /// its exit code when one is available.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError`] when the exit status cannot be collected.
    async fn wait(&mut self) -> Result<Option<i32>, ProcessError>;
}

/// Errors raised while launching a process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program could not be spawned.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A standard stream was not captured.
    #[error("child {0} was not captured")]
    MissingStream(&'static str),
}

/// Errors raised while controlling a running process.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process could not be signalled.
    #[error("failed to signal process: {0}")]
    Signal(String),

    /// Waiting on or killing the process failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
