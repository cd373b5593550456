// ─── Console Commands ───
// The user-facing side of the installer: wiring, error report, exit code.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use crate::core::config::InstallerConfig;
use crate::core::downloader::HttpSource;
use crate::core::error::ErrorClass;
use crate::core::http::build_http_client;
use crate::core::loaders::{ForgeStatus, ShellLauncher};
use crate::core::pipeline::{Pipeline, PipelineFailure};

const SUPPORT_HINT: &str = "Please post a screenshot of this log to the RG discord for help";

/// Run the full install against the real network and filesystem.
pub async fn install(minecraft_dir: Option<PathBuf>) -> ExitCode {
    let config = InstallerConfig::from_env(minecraft_dir);

    let client = match build_http_client(config.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("Error: could not set up HTTP client: {}", e);
            error!("{}", SUPPORT_HINT);
            return ErrorClass::Other.exit_code();
        }
    };
    let source = HttpSource::new(client);

    match Pipeline::new(&config, &source, &ShellLauncher).run().await {
        Ok(report) => {
            if let ForgeStatus::InstallerLaunched { installer } = &report.forge {
                info!(
                    "Forge installer was started from {}. Finish it before launching the game.",
                    installer
                );
            }
            info!("Mods are installed in {:?}", report.minecraft_dir.join("mods"));
            ExitCode::SUCCESS
        }
        Err(failure) => report_failure(&failure),
    }
}

fn report_failure(failure: &PipelineFailure) -> ExitCode {
    let class = failure.error.class();
    error!("Error: {}", failure.error);
    if let Some(detail) = failure.error.response_detail() {
        error!(" - Response: {}", detail);
    }
    error!("{}", SUPPORT_HINT);
    class.exit_code()
}

/// Keep the console window open until the user has read the output.
/// Skipped when stdin isn't a terminal (pipes, CI).
pub fn wait_for_acknowledgement() {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return;
    }

    print!("Press Enter to exit...");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = stdin.lock().read_line(&mut line);
}
