//! Fetches a project scaffold and extracts it into a target directory.

use crate::codegen::{
    domain::{CodegenError, CodegenResult, ScaffoldResult, TemplateParams, is_key_file},
    ports::TemplateService,
};
use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Cursor};
use std::sync::Arc;
use tracing::{debug, info};
use zip::ZipArchive;

/// Downloads scaffold archives and unpacks them.
///
/// Existing target directories are replaced wholesale: after a successful
/// fetch the directory holds exactly the archive's contents.
#[derive(Debug)]
pub struct ScaffoldFetcher<T>
where
    T: TemplateService,
{
    service: Arc<T>,
}

impl<T> Clone for ScaffoldFetcher<T>
where
    T: TemplateService,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<T> ScaffoldFetcher<T>
where
    T: TemplateService,
{
    /// Creates a fetcher using `service`.
    #[must_use]
    pub const fn new(service: Arc<T>) -> Self {
        Self { service }
    }

    /// Fetches the scaffold for `params` and extracts it into `target_dir`.
    ///
    /// The archive is opened and its entries validated before `target_dir`
    /// is touched, so a corrupt download leaves existing files in place.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::TemplateService`] when the download fails,
    /// [`CodegenError::CorruptArchive`] for malformed archives or entries
    /// escaping `target_dir`, and [`CodegenError::Io`] when extraction
    /// fails.
    pub async fn fetch(
        &self,
        params: &TemplateParams,
        target_dir: &Utf8Path,
    ) -> CodegenResult<ScaffoldResult> {
        let archive = self.service.fetch_archive(params).await?;
        let digest = format!("{:x}", Sha256::digest(&archive));
        debug!(bytes = archive.len(), sha256 = %digest, "scaffold archive downloaded");

        let target = target_dir.to_owned();
        let key_files = tokio::task::spawn_blocking(move || extract_archive(archive, &target))
            .await
            .map_err(|err| CodegenError::io(target_dir, io::Error::other(err)))??;

        let project_path = target_dir.join(&params.artifact_id);
        info!(
            project = %project_path,
            key_files = key_files.len(),
            "scaffold extracted"
        );
        Ok(ScaffoldResult::new(project_path, key_files, digest))
    }
}

fn extract_archive(archive: Vec<u8>, target_dir: &Utf8Path) -> CodegenResult<Vec<Utf8PathBuf>> {
    let mut zip = ZipArchive::new(Cursor::new(archive))
        .map_err(|err| CodegenError::corrupt_archive(err.to_string()))?;
    let entries = enclosed_entries(&mut zip)?;

    if fs::exists(target_dir).map_err(|err| CodegenError::io(target_dir, err))? {
        fs::remove_dir_all(target_dir).map_err(|err| CodegenError::io(target_dir, err))?;
    }
    fs::create_dir_all(target_dir).map_err(|err| CodegenError::io(target_dir, err))?;

    let mut key_files = Vec::new();
    for (index, relative) in entries.into_iter().enumerate() {
        let mut entry = zip
            .by_index(index)
            .map_err(|err| CodegenError::corrupt_archive(err.to_string()))?;
        let out = target_dir.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out).map_err(|err| CodegenError::io(&out, err))?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent).map_err(|err| CodegenError::io(parent, err))?;
        }
        let mut file = fs::File::create(&out).map_err(|err| CodegenError::io(&out, err))?;
        io::copy(&mut entry, &mut file).map_err(|err| CodegenError::io(&out, err))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out, fs::Permissions::from_mode(mode))
                .map_err(|err| CodegenError::io(&out, err))?;
        }

        if is_key_file(&relative) {
            key_files.push(out);
        }
    }
    Ok(key_files)
}

/// Returns every entry path relative to the extraction root, rejecting
/// absolute paths, parent traversal and non-UTF-8 names.
fn enclosed_entries(zip: &mut ZipArchive<Cursor<Vec<u8>>>) -> CodegenResult<Vec<Utf8PathBuf>> {
    (0..zip.len())
        .map(|index| {
            let entry = zip
                .by_index(index)
                .map_err(|err| CodegenError::corrupt_archive(err.to_string()))?;
            let Some(path) = entry.enclosed_name() else {
                return Err(CodegenError::corrupt_archive(format!(
                    "entry '{}' escapes the extraction root",
                    entry.name()
                )));
            };
            Utf8PathBuf::from_path_buf(path).map_err(|path| {
                CodegenError::corrupt_archive(format!(
                    "entry '{}' is not valid UTF-8",
                    path.display()
                ))
            })
        })
        .collect()
}
