//! Report persistence.

use std::fs;
use std::path::{Path, PathBuf};

use campreport_core::WriteError;

/// Persist fully-assembled workbook bytes to `path`.
//
// Parent directories are created first. The caller assembles the complete
// buffer before this runs, so an assembly failure leaves no partial file on
// disk; a write failure here is fatal and surfaced as `WriteError`.
pub fn write_report(bytes: &[u8], path: &Path) -> Result<PathBuf, WriteError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| WriteError::CreateDirs {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    fs::write(path, bytes).map_err(|source| WriteError::Save {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(path.to_path_buf())
}
