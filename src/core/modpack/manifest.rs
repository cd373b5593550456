// ─── Modpack Manifest ───
// Fetches `modpack.json` and turns it into a validated `Modpack`.

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::downloader::RemoteSource;
use crate::core::error::{InstallerError, InstallerResult};

/// Raw shape of `modpack.json`. Every field is optional here so a missing
/// key surfaces as a decode error naming the key, not a serde message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModpack {
    #[serde(default)]
    forge_version: Option<String>,
    #[serde(default)]
    mod_sources: Option<Vec<String>>,
    #[serde(default)]
    forge_installer: Option<String>,
}

/// A decoded and validated modpack descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modpack {
    /// Version `id` that must exist under `versions/` (e.g. `1.12.2-forge-14.23.5.2859`).
    pub forge_version: String,
    /// Mod download URLs, installed in this order.
    pub mod_sources: Vec<String>,
    /// Launched when the required Forge version is missing.
    pub forge_installer: Option<String>,
}

impl Modpack {
    /// Decode a manifest body. Anything but a JSON object (`null`, arrays,
    /// scalars) and objects missing a required field are rejected.
    pub fn from_slice(bytes: &[u8]) -> InstallerResult<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| InstallerError::Decode(format!("invalid JSON: {}", e)))?;
        let raw: RawModpack = match value {
            serde_json::Value::Object(_) => serde_json::from_value(value)
                .map_err(|e| InstallerError::Decode(format!("invalid manifest: {}", e)))?,
            serde_json::Value::Null => {
                return Err(InstallerError::Decode("manifest is null".into()));
            }
            _ => {
                return Err(InstallerError::Decode(
                    "manifest is not a JSON object".into(),
                ));
            }
        };

        let forge_version = raw
            .forge_version
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| InstallerError::Decode("missing field `forgeVersion`".into()))?;
        let mod_sources = raw
            .mod_sources
            .ok_or_else(|| InstallerError::Decode("missing field `modSources`".into()))?;
        let forge_installer = raw.forge_installer.filter(|v| !v.trim().is_empty());

        Ok(Self {
            forge_version,
            mod_sources,
            forge_installer,
        })
    }
}

/// Fetch and decode the modpack manifest at `url`.
pub async fn fetch_modpack(source: &dyn RemoteSource, url: &str) -> InstallerResult<Modpack> {
    info!("Fetching modpack info...");
    debug!("Manifest URL: {}", url);

    let bytes = source.fetch_bytes(url).await?;
    let modpack = Modpack::from_slice(&bytes)?;

    info!(
        "Modpack requires Forge {} and lists {} mods",
        modpack.forge_version,
        modpack.mod_sources.len()
    );
    Ok(modpack)
}
