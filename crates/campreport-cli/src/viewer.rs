//! Best-effort launch of the generated report in the default viewer.

use std::path::Path;
use std::process::Command;

/// Open `path` with the platform's default application.
///
/// Launch failures are logged and swallowed: the report is already on disk
/// and the run's status must not depend on a viewer being installed.
pub fn open_in_viewer(path: &Path) {
    if let Err(err) = spawn_opener(path) {
        tracing::warn!(
            path = %path.display(),
            error = %err,
            "could not open report in viewer"
        );
    }
}

#[cfg(target_os = "macos")]
fn spawn_opener(path: &Path) -> std::io::Result<()> {
    Command::new("open").arg(path).spawn().map(|_| ())
}

#[cfg(target_os = "windows")]
fn spawn_opener(path: &Path) -> std::io::Result<()> {
    Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .spawn()
        .map(|_| ())
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn spawn_opener(path: &Path) -> std::io::Result<()> {
    Command::new("xdg-open").arg(path).spawn().map(|_| ())
}
