//! Shared fixtures for code-generation integration tests.

use camino::Utf8PathBuf;
use eyre::{WrapErr, eyre};
use std::io::{Cursor, Write};
use tempfile::TempDir;
use zip::{ZipWriter, write::SimpleFileOptions};

/// Builds a scaffold archive rooted at `artifact/` with a Maven manifest,
/// a wrapper script and a main class.
///
/// # Errors
///
/// Returns an error if the archive cannot be written.
pub fn scaffold_archive(artifact: &str) -> eyre::Result<Vec<u8>> {
    let class = format!("{}Application", capitalise(artifact));
    let entries = [
        (format!("{artifact}/pom.xml"), "<project/>".to_owned(), 0o644),
        (format!("{artifact}/mvnw"), "#!/bin/sh\n".to_owned(), 0o755),
        (
            format!("{artifact}/src/main/java/com/example/{artifact}/{class}.java"),
            format!("class {class} {{}}"),
            0o644,
        ),
        (
            format!("{artifact}/src/main/resources/application.properties"),
            String::new(),
            0o644,
        ),
    ];

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents, mode) in entries {
        writer
            .start_file(
                name.as_str(),
                SimpleFileOptions::default().unix_permissions(mode),
            )
            .wrap_err_with(|| format!("start entry {name}"))?;
        writer
            .write_all(contents.as_bytes())
            .wrap_err_with(|| format!("write entry {name}"))?;
    }
    Ok(writer.finish().wrap_err("finish archive")?.into_inner())
}

/// Returns the UTF-8 path of `temp`.
///
/// # Errors
///
/// Returns an error if the temporary path is not valid UTF-8.
pub fn utf8_path(temp: &TempDir) -> eyre::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
        .map_err(|path| eyre!("temporary path {} is not UTF-8", path.display()))
}

fn capitalise(value: &str) -> String {
    let mut chars = value.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
