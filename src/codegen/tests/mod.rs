//! Unit tests for the code-generation context.


use camino::Utf8PathBuf;
use std::io::{Cursor, Write};
use tempfile::TempDir;
use zip::{ZipWriter, write::SimpleFileOptions};

/// Builds a zip archive from `(name, contents, unix mode)` triples.
fn archive(entries: &[(&str, &str, u32)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents, mode) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default().unix_permissions(*mode))
            .expect("start zip entry");
        writer
            .write_all(contents.as_bytes())
            .expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}

fn utf8_dir(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 temp dir")
}
