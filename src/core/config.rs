// ─── Installer Config ───
// Everything the pipeline needs, resolved once and threaded through explicitly.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::core::instance::default_minecraft_dir;

pub const DEFAULT_BASE_URL: &str = "https://radioactive-gaming.github.io/minecraft";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const BASE_URL_ENV: &str = "MODPACK_BASE_URL";
const TIMEOUT_ENV: &str = "MODPACK_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// Base URL the manifest is served under (no trailing slash).
    pub base_url: String,
    pub minecraft_dir: PathBuf,
    pub request_timeout: Duration,
}

impl InstallerConfig {
    /// Build the config from the optional CLI root and the process environment.
    pub fn from_env(minecraft_dir: Option<PathBuf>) -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => parse_timeout_secs(&raw).unwrap_or_else(|| {
                warn!("Ignoring invalid {}={:?}", TIMEOUT_ENV, raw);
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self::new(
            base_url,
            minecraft_dir.unwrap_or_else(default_minecraft_dir),
            Duration::from_secs(timeout_secs),
        )
    }

    pub fn new(
        base_url: impl Into<String>,
        minecraft_dir: PathBuf,
        request_timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            minecraft_dir,
            request_timeout,
        }
    }

    pub fn manifest_url(&self) -> String {
        format!("{}/modpack.json", self.base_url)
    }
}

fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}
