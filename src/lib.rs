mod commands;
pub mod core;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Installs the RG modpack's mods into a Minecraft directory.
#[derive(Debug, Parser)]
#[command(name = "modpack-installer", version, about)]
struct Cli {
    /// Minecraft directory. Defaults to `.minecraft` in the application-data folder.
    minecraft_dir: Option<PathBuf>,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,modpack_installer_lib=info")),
        )
        .with_target(false)
        .init();

    tracing::debug!("RG modpack installer starting...");

    let code = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime.block_on(commands::install(cli.minecraft_dir)),
        Err(e) => {
            tracing::error!("Failed to start async runtime: {}", e);
            crate::core::error::ErrorClass::Other.exit_code()
        }
    };

    commands::wait_for_acknowledgement();
    code
}
