//! Verifier runs against real child processes.
#![cfg(unix)]

use atelier::codegen::adapters::TokioBuildLauncher;
use atelier::codegen::domain::VerifierSettings;
use atelier::codegen::services::BuildVerifier;
use camino::Utf8PathBuf;
use eyre::{WrapErr, ensure, eyre};
use rstest::rstest;
use std::os::unix::fs::PermissionsExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn project_with_wrapper(temp: &TempDir, script: &str) -> eyre::Result<Utf8PathBuf> {
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|path| eyre!("temporary path {} is not UTF-8", path.display()))?;
    let project = root.join("demo");
    std::fs::create_dir_all(&project).wrap_err("create project")?;
    std::fs::write(project.join("pom.xml"), "<project/>").wrap_err("write manifest")?;
    let wrapper = project.join("mvnw");
    std::fs::write(&wrapper, script).wrap_err("write wrapper")?;
    std::fs::set_permissions(&wrapper, std::fs::Permissions::from_mode(0o644))
        .wrap_err("clear exec bits")?;
    Ok(project)
}

fn verifier() -> BuildVerifier<TokioBuildLauncher> {
    BuildVerifier::new(
        Arc::new(TokioBuildLauncher::new()),
        VerifierSettings::for_application("DemoApplication")
            .with_startup_timeout(Duration::from_secs(10))
            .with_shutdown_grace(Duration::from_secs(5)),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn marker_on_stdout_interrupts_long_running_child() -> eyre::Result<()> {
    let temp = TempDir::new().wrap_err("temp dir")?;
    let project = project_with_wrapper(
        &temp,
        "#!/bin/sh\n\
         echo '[INFO] Scanning for projects...'\n\
         echo '[WARNING] using default settings' >&2\n\
         echo 'Started DemoApplication in 0.4 seconds'\n\
         exec sleep 30\n",
    )?;

    let started_at = Instant::now();
    let result = verifier().verify(&project).await;

    ensure!(result.is_success(), "unexpected result {result:?}");
    ensure!(
        started_at.elapsed() < Duration::from_secs(15),
        "child should stop after the interrupt"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn marker_on_stderr_is_seen() -> eyre::Result<()> {
    let temp = TempDir::new().wrap_err("temp dir")?;
    let project = project_with_wrapper(
        &temp,
        "#!/bin/sh\necho 'Started DemoApplication' >&2\nexec sleep 30\n",
    )?;

    let result = verifier().verify(&project).await;

    ensure!(result.app_started);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn latin1_output_does_not_hide_later_marker() -> eyre::Result<()> {
    let temp = TempDir::new().wrap_err("temp dir")?;
    let project = project_with_wrapper(
        &temp,
        "#!/bin/sh\n\
         printf 'caf\\351 latin1 log line\\n'\n\
         echo 'Started DemoApplication in 0.4 seconds'\n\
         exec sleep 30\n",
    )?;

    let started_at = Instant::now();
    let result = verifier().verify(&project).await;

    ensure!(result.app_started, "unexpected result {result:?}");
    ensure!(
        started_at.elapsed() < Duration::from_secs(10),
        "marker should be seen before the startup deadline"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exit_without_marker_is_not_started() -> eyre::Result<()> {
    let temp = TempDir::new().wrap_err("temp dir")?;
    let project = project_with_wrapper(
        &temp,
        "#!/bin/sh\necho '[ERROR] BUILD FAILURE'\nexit 1\n",
    )?;

    let result = verifier().verify(&project).await;

    ensure!(result.wrapper_exists && result.manifest_exists);
    ensure!(!result.app_started);
    Ok(())
}
