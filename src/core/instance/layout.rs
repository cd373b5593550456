// ─── Minecraft Directory Layout ───
// Validates the install root the mods are going into.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::{InstallerError, InstallerResult};

/// A validated Minecraft installation: the root exists, `mods/` exists
/// (possibly just created) and `versions/` exists.
#[derive(Debug, Clone)]
pub struct MinecraftDir {
    root: PathBuf,
}

impl MinecraftDir {
    /// Check `root` and prepare it for installing mods.
    ///
    /// `mods/` is created if missing. `versions/` is never created: without
    /// it the installation is broken or not a Minecraft install at all.
    pub async fn open(root: &Path) -> InstallerResult<Self> {
        if !is_dir(root).await {
            return Err(InstallerError::NotFound {
                what: "Minecraft directory",
                path: root.to_path_buf(),
            });
        }
        info!("Minecraft Directory found at {:?}", root);

        let layout = Self {
            root: root.to_path_buf(),
        };

        let mods_dir = layout.mods_dir();
        tokio::fs::create_dir_all(&mods_dir)
            .await
            .map_err(|source| InstallerError::Io {
                path: mods_dir.clone(),
                source,
            })?;
        debug!("Mods directory ready at {:?}", mods_dir);

        let versions_dir = layout.versions_dir();
        if !is_dir(&versions_dir).await {
            return Err(InstallerError::NotFound {
                what: "Versions directory",
                path: versions_dir,
            });
        }

        Ok(layout)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mods_dir(&self) -> PathBuf {
        self.root.join("mods")
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}
