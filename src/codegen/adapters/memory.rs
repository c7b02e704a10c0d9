//! In-memory collaborators for tests and offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::codegen::{
    domain::{BuildCommand, TemplateParams},
    ports::{
        BuildLauncher, BuildProcess, LaunchError, ProcessError, TemplateService,
        TemplateServiceError, TemplateServiceResult,
    },
};

/// Template service that serves a fixed archive.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplateService {
    state: Arc<RwLock<StaticTemplateState>>,
}

#[derive(Debug, Default)]
struct StaticTemplateState {
    archive: Vec<u8>,
    requests: Vec<TemplateParams>,
}

fn poisoned(err: impl ToString) -> TemplateServiceError {
    TemplateServiceError::transport(std::io::Error::other(err.to_string()))
}

impl StaticTemplateService {
    /// Creates a service that answers every request with `archive`.
    #[must_use]
    pub fn new(archive: Vec<u8>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StaticTemplateState {
                archive,
                requests: Vec::new(),
            })),
        }
    }

    /// Replaces the archive served by subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::Transport`] when the state lock is
    /// poisoned.
    pub fn replace_archive(&self, archive: Vec<u8>) -> TemplateServiceResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.archive = archive;
        Ok(())
    }

    /// Returns the parameters of every request served so far.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateServiceError::Transport`] when the state lock is
    /// poisoned.
    pub fn requests(&self) -> TemplateServiceResult<Vec<TemplateParams>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.requests.clone())
    }
}

#[async_trait]
impl TemplateService for StaticTemplateService {
    async fn fetch_archive(&self, params: &TemplateParams) -> TemplateServiceResult<Vec<u8>> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.requests.push(params.clone());
        Ok(state.archive.clone())
    }
}

/// Counters shared between a [`ScriptedBuildLauncher`] and its processes.
#[derive(Debug, Default)]
pub struct ProcessLog {
    launches: Mutex<Vec<BuildCommand>>,
    interrupts: AtomicUsize,
    kills: AtomicUsize,
    waits: AtomicUsize,
}

impl ProcessLog {
    /// Returns the commands launched so far.
    #[must_use]
    pub fn launches(&self) -> Vec<BuildCommand> {
        self.launches
            .lock()
            .map(|launches| launches.clone())
            .unwrap_or_default()
    }

    /// Returns how many interrupts were sent.
    #[must_use]
    pub fn interrupts(&self) -> usize {
        self.interrupts.load(Ordering::SeqCst)
    }

    /// Returns how many kills were sent.
    #[must_use]
    pub fn kills(&self) -> usize {
        self.kills.load(Ordering::SeqCst)
    }

    /// Returns how many times a process was waited on.
    #[must_use]
    pub fn waits(&self) -> usize {
        self.waits.load(Ordering::SeqCst)
    }
}

/// How a scripted process behaves once its lines are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScriptEnd {
    /// The output stream closes.
    #[default]
    Close,
    /// The process stays silent until signalled.
    Hang,
}

/// Launcher whose processes replay a fixed list of output lines.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBuildLauncher {
    lines: Vec<String>,
    end: ScriptEnd,
    fail_launch: bool,
    log: Arc<ProcessLog>,
}

impl ScriptedBuildLauncher {
    /// Creates a launcher whose processes print `lines` and then exit.
    #[must_use]
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the behaviour after the last line.
    #[must_use]
    pub const fn ending_with(mut self, end: ScriptEnd) -> Self {
        self.end = end;
        self
    }

    /// Makes every launch fail.
    #[must_use]
    pub const fn failing(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// Returns the shared process log.
    #[must_use]
    pub fn log(&self) -> Arc<ProcessLog> {
        Arc::clone(&self.log)
    }
}

#[async_trait]
impl BuildLauncher for ScriptedBuildLauncher {
    async fn launch(&self, command: &BuildCommand) -> Result<Box<dyn BuildProcess>, LaunchError> {
        if let Ok(mut launches) = self.log.launches.lock() {
            launches.push(command.clone());
        }
        if self.fail_launch {
            return Err(LaunchError::Spawn {
                program: command.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted failure"),
            });
        }
        Ok(Box::new(ScriptedProcess {
            lines: self.lines.iter().cloned().collect(),
            end: self.end,
            stopped: false,
            log: Arc::clone(&self.log),
        }))
    }
}

struct ScriptedProcess {
    lines: VecDeque<String>,
    end: ScriptEnd,
    stopped: bool,
    log: Arc<ProcessLog>,
}

#[async_trait]
impl BuildProcess for ScriptedProcess {
    async fn next_line(&mut self) -> Option<String> {
        if self.stopped {
            return None;
        }
        if let Some(line) = self.lines.pop_front() {
            return Some(line);
        }
        match self.end {
            ScriptEnd::Close => None,
            ScriptEnd::Hang => std::future::pending().await,
        }
    }

    async fn interrupt(&mut self) -> Result<(), ProcessError> {
        self.log.interrupts.fetch_add(1, Ordering::SeqCst);
        self.stopped = true;
        Ok(())
    }

    async fn kill(&mut self) -> Result<(), ProcessError> {
        self.log.kills.fetch_add(1, Ordering::SeqCst);
        self.stopped = true;
        Ok(())
    }

    async fn wait(&mut self) -> Result<Option<i32>, ProcessError> {
        self.log.waits.fetch_add(1, Ordering::SeqCst);
        if self.end == ScriptEnd::Hang && !self.stopped {
            std::future::pending::<()>().await;
        }
        Ok(Some(0))
    }
}
