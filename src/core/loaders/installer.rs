use std::process::{Command, Stdio};

use tracing::debug;

/// Starts the external Forge installer. Launching is fire-and-forget: the
/// child is never waited on and its exit status is never observed.
pub trait InstallerLauncher: Send + Sync {
    fn launch(&self, target: &str) -> std::io::Result<()>;
}

/// Hands the installer URL (or path) to the platform's default opener.
pub struct ShellLauncher;

impl InstallerLauncher for ShellLauncher {
    fn launch(&self, target: &str) -> std::io::Result<()> {
        let mut command = shell_open_command(target);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = command.spawn()?;
        debug!("Spawned installer opener (pid {}) for {}", child.id(), target);
        // Dropping `Child` does not kill or wait on the process.
        drop(child);
        Ok(())
    }
}

fn shell_open_command(target: &str) -> Command {
    // Not `cmd /C start`: cmd.exe would treat `&`, `|` and `^` in a query
    // string as shell syntax.
    #[cfg(target_os = "windows")]
    let command = {
        let mut cmd = Command::new("explorer");
        cmd.arg(target);
        cmd
    };

    #[cfg(target_os = "macos")]
    let command = {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    };

    #[cfg(all(unix, not(target_os = "macos")))]
    let command = {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    };

    command
}
