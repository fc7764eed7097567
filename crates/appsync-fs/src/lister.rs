//! Recursive file listing
//!
//! Enumerates files under a root as forward-slash relative paths in
//! traversal order. Entries that vanish between enumeration and stat are
//! omitted; failing to read a directory is an error.

use std::path::Path;

use crate::{Error, Result};

/// List all files under `root` as relative, forward-slash paths.
///
/// # Errors
///
/// Returns an error if a directory cannot be read. Stat failures on
/// individual entries are swallowed and the entry omitted.
pub fn list_files(root: &Path) -> Result<Vec<String>> {
    let mut result = Vec::new();
    walk(root, "", &mut result)?;
    Ok(result)
}

/// List files under `root`, keeping only paths for which `predicate` holds.
///
/// The predicate is applied to the complete listing after enumeration,
/// evaluated against root-relative paths.
pub fn list_files_filtered(
    root: &Path,
    predicate: impl Fn(&str) -> bool,
) -> Result<Vec<String>> {
    let mut files = list_files(root)?;
    files.retain(|path| predicate(path));
    Ok(files)
}

fn walk(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };

        // A transiently vanished entry is simply omitted
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            walk(&entry.path(), &relative, out)?;
        } else {
            out.push(relative);
        }
    }
    Ok(())
}
