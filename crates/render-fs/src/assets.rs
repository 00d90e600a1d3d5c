//! Recursive asset tree loading and writing

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, Result};

/// Load every file under `dir` into a map of relative path to raw bytes.
///
/// Keys use forward slashes regardless of platform and the map iterates in a
/// stable order on every run. Files for which `skip` returns true are left
/// out; directories are never reported.
pub fn load_files_recursively<F>(dir: &Path, skip: F) -> Result<BTreeMap<String, Vec<u8>>>
where
    F: Fn(&Path) -> bool,
{
    let mut files = BTreeMap::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            match e.into_io_error() {
                Some(io) => Error::io(&path, io),
                None => Error::io(&path, std::io::Error::other("filesystem loop detected")),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if skip(path) {
            tracing::debug!(?path, "Skipping file");
            continue;
        }

        let rel = path
            .strip_prefix(dir)
            .map_err(|_| Error::io(path, std::io::Error::other("entry outside walk root")))?;
        let key = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let content = fs::read(path).map_err(|e| Error::io(path, e))?;
        files.insert(key, content);
    }

    Ok(files)
}

/// Write a file tree under `root`.
///
/// Parent directories are created as needed; existing files are overwritten.
pub fn write_files(root: &Path, files: &BTreeMap<String, Vec<u8>>) -> Result<()> {
    for (rel, content) in files {
        write_file(&root.join(rel), content)?;
    }
    Ok(())
}

/// Write a single file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| Error::io(path, e))?;
    tracing::debug!(?path, bytes = content.len(), "Wrote file");
    Ok(())
}
