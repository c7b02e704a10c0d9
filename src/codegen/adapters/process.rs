//! Build launcher backed by `tokio::process`.

use crate::codegen::{
    domain::BuildCommand,
    ports::{BuildLauncher, BuildProcess, LaunchError, ProcessError},
};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const DEFAULT_LINE_BUFFER: usize = 256;

/// Spawns real child processes.
///
/// Children are killed when their handle is dropped, so an abandoned
/// verification never leaves a build running.
#[derive(Debug, Clone, Copy)]
pub struct TokioBuildLauncher {
    line_buffer: usize,
}

impl Default for TokioBuildLauncher {
    fn default() -> Self {
        Self {
            line_buffer: DEFAULT_LINE_BUFFER,
        }
    }
}

impl TokioBuildLauncher {
    /// Creates a launcher with the default line buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BuildLauncher for TokioBuildLauncher {
    async fn launch(&self, command: &BuildCommand) -> Result<Box<dyn BuildProcess>, LaunchError> {
        let mut child = Command::new(command.program.as_std_path())
            .args(&command.args)
            .current_dir(command.working_dir.as_std_path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or(LaunchError::MissingStream("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or(LaunchError::MissingStream("stderr"))?;

        let (sender, lines) = mpsc::channel(self.line_buffer.max(1));
        let readers = vec![
            tokio::spawn(forward_lines(stdout, sender.clone())),
            tokio::spawn(forward_lines(stderr, sender)),
        ];

        Ok(Box::new(TokioBuildProcess {
            child,
            lines,
            readers,
        }))
    }
}

async fn forward_lines<R>(stream: R, sender: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin,
{
    // Output is decoded lossily; build logs are not guaranteed to be UTF-8.
    let mut segments = BufReader::new(stream).split(b'\n');
    while let Ok(Some(mut bytes)) = segments.next_segment().await {
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        let line = String::from_utf8_lossy(&bytes).into_owned();
        if sender.send(line).await.is_err() {
            break;
        }
    }
}

struct TokioBuildProcess {
    child: Child,
    lines: mpsc::Receiver<String>,
    readers: Vec<JoinHandle<()>>,
}

impl TokioBuildProcess {
    fn has_exited(&mut self) -> Result<bool, ProcessError> {
        Ok(self.child.try_wait()?.is_some())
    }
}

#[async_trait]
impl BuildProcess for TokioBuildProcess {
    async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }

    #[cfg(unix)]
    async fn interrupt(&mut self) -> Result<(), ProcessError> {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        if self.has_exited()? {
            return Ok(());
        }
        let Some(id) = self.child.id() else {
            return Ok(());
        };
        let pid = i32::try_from(id).map_err(|err| ProcessError::Signal(err.to_string()))?;
        kill(Pid::from_raw(pid), Signal::SIGINT)
            .map_err(|err| ProcessError::Signal(err.to_string()))
    }

    #[cfg(not(unix))]
    async fn interrupt(&mut self) -> Result<(), ProcessError> {
        self.kill().await
    }

    async fn kill(&mut self) -> Result<(), ProcessError> {
        if self.has_exited()? {
            return Ok(());
        }
        self.child.start_kill()?;
        Ok(())
    }

    async fn wait(&mut self) -> Result<Option<i32>, ProcessError> {
        self.lines.close();
        for reader in self.readers.drain(..) {
            reader.abort();
        }
        let status = self.child.wait().await?;
        Ok(status.code())
    }
}
