//! Playback hand-off.
//!
//! Playing video is out of scope for a terminal grid, so the player overlay
//! passes the watch URL to either a configured command (`mpv --loop`) or the
//! system opener (browser / default handler via the `open` crate).

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

/// Builds the external player invocation: the configured program and its
/// arguments, with the URL appended last. `None` for a blank command.
pub fn player_command(command: &str, url: &str) -> Option<Command> {
    let mut parts = command.split_whitespace();
    let program = parts.next()?;

    let mut cmd = Command::new(program);
    cmd.args(parts)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    Some(cmd)
}

/// Human-readable name of where playback goes, for the overlay help bar.
pub fn player_label(command: Option<&str>) -> &str {
    command
        .and_then(|c| c.split_whitespace().next())
        .unwrap_or("browser")
}

/// Spawn `cmd` and wait on it from a background thread so the finished
/// player is reaped instead of lingering as a zombie.
fn spawn_reaped(mut cmd: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = cmd.spawn()?;
    Ok(thread::spawn(move || {
        let status = child.wait();
        match &status {
            Ok(status) => debug!("Player exited with {}", status),
            Err(e) => warn!("Failed to wait on player: {}", e),
        }
        status
    }))
}

/// Launch playback without waiting for the player to exit.
pub fn launch(url: &str, command: Option<&str>) -> io::Result<()> {
    match command {
        Some(command) => {
            let cmd = player_command(command, url).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "empty player command")
            })?;
            info!("Launching player: {} {}", command, url);
            spawn_reaped(cmd)?;
            Ok(())
        }
        None => {
            info!("Opening {} with the system opener", url);
            open::that_detached(url)
        }
    }
}
