//! Opening generated PDFs in the system viewer

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::Result;

/// Open a file with the system default application.
///
/// The viewer is spawned and left running; only a failure to launch it is
/// reported.
pub fn open_in_viewer(path: &Path) -> Result<()> {
    let mut command = viewer_command(path);
    debug!(?command, "Launching viewer");
    command.spawn()?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
