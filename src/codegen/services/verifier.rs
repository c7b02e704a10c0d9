//! Confirms that a scaffolded project builds and starts.

use crate::codegen::{
    domain::{BuildCommand, VerificationResult, VerifierSettings},
    ports::{BuildLauncher, BuildProcess},
};
use camino::Utf8Path;
use std::io;
use std::sync::Arc;
use tokio::time::{Instant, timeout, timeout_at};
use tracing::{debug, info, warn};

/// How the startup watch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Startup {
    Started,
    StreamClosed,
    TimedOut,
}

/// Runs a project's build wrapper and watches for the success marker.
///
/// Verification never fails: every problem is reported through the
/// fields of [`VerificationResult`].
#[derive(Debug)]
pub struct BuildVerifier<L>
where
    L: BuildLauncher,
{
    launcher: Arc<L>,
    settings: VerifierSettings,
}

impl<L> BuildVerifier<L>
where
    L: BuildLauncher,
{
    /// Creates a verifier launching processes through `launcher`.
    #[must_use]
    pub const fn new(launcher: Arc<L>, settings: VerifierSettings) -> Self {
        Self { launcher, settings }
    }

    /// Returns the verifier settings.
    #[must_use]
    pub const fn settings(&self) -> &VerifierSettings {
        &self.settings
    }

    /// Checks the project layout, then builds and runs the project until
    /// the success marker appears or the startup deadline passes.
    pub async fn verify(&self, project_path: &Utf8Path) -> VerificationResult {
        let mut result = VerificationResult {
            project_exists: is_dir(project_path).await,
            ..VerificationResult::default()
        };
        if !result.project_exists {
            info!(project = %project_path, "project directory missing");
            return result;
        }

        let wrapper = project_path.join(&self.settings.wrapper_script);
        result.wrapper_exists = is_file(&wrapper).await;
        result.manifest_exists = is_file(&project_path.join(&self.settings.manifest_file)).await;
        if !result.wrapper_exists {
            info!(wrapper = %wrapper, "build wrapper missing");
            return result;
        }

        if let Err(err) = ensure_executable(&wrapper).await {
            warn!(wrapper = %wrapper, error = %err, "could not mark build wrapper executable");
        }

        let command = BuildCommand::new(
            wrapper.clone(),
            self.settings.run_args.iter().cloned(),
            project_path,
        );
        result.app_started = self.run_until_started(&command).await;
        info!(
            project = %project_path,
            app_started = result.app_started,
            "verification finished"
        );
        result
    }

    async fn run_until_started(&self, command: &BuildCommand) -> bool {
        let mut process = match self.launcher.launch(command).await {
            Ok(process) => process,
            Err(err) => {
                warn!(program = %command.program, error = %err, "build launch failed");
                return false;
            }
        };

        let startup = self.watch_output(process.as_mut()).await;
        match startup {
            Startup::Started => {
                if let Err(err) = process.interrupt().await {
                    warn!(error = %err, "failed to interrupt application");
                }
            }
            Startup::TimedOut => {
                warn!(
                    timeout_secs = self.settings.startup_timeout.as_secs(),
                    "application did not start before the deadline"
                );
                if let Err(err) = process.kill().await {
                    warn!(error = %err, "failed to kill build process");
                }
            }
            Startup::StreamClosed => {
                debug!("build output closed without the success marker");
            }
        }

        self.shutdown(process.as_mut()).await;
        startup == Startup::Started
    }

    async fn watch_output(&self, process: &mut dyn BuildProcess) -> Startup {
        // A timeout too large to represent waits for the stream instead.
        let deadline = Instant::now().checked_add(self.settings.startup_timeout);
        loop {
            let next = match deadline {
                Some(deadline) => timeout_at(deadline, process.next_line()).await,
                None => Ok(process.next_line().await),
            };
            match next {
                Ok(Some(line)) => {
                    info!(line = %line, "build output");
                    if line.contains(&self.settings.success_marker) {
                        return Startup::Started;
                    }
                }
                Ok(None) => return Startup::StreamClosed,
                Err(_) => return Startup::TimedOut,
            }
        }
    }

    async fn shutdown(&self, process: &mut dyn BuildProcess) {
        match timeout(self.settings.shutdown_grace, process.wait()).await {
            Ok(Ok(code)) => debug!(?code, "build process exited"),
            Ok(Err(err)) => warn!(error = %err, "failed to collect build process exit"),
            Err(_) => {
                warn!(
                    grace_secs = self.settings.shutdown_grace.as_secs(),
                    "build process ignored shutdown; killing"
                );
                if let Err(err) = process.kill().await {
                    warn!(error = %err, "failed to kill build process");
                }
                if let Err(err) = process.wait().await {
                    warn!(error = %err, "failed to collect build process exit");
                }
            }
        }
    }
}

async fn is_dir(path: &Utf8Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_dir())
}

async fn is_file(path: &Utf8Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_file())
}

#[cfg(unix)]
async fn ensure_executable(path: &Utf8Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = tokio::fs::metadata(path).await?.permissions();
    let mode = permissions.mode();
    if mode & 0o111 == 0o111 {
        return Ok(());
    }
    permissions.set_mode(mode | 0o111);
    tokio::fs::set_permissions(path, permissions).await
}

#[cfg(not(unix))]
async fn ensure_executable(_path: &Utf8Path) -> io::Result<()> {
    Ok(())
}
