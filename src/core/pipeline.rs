// ─── Install Pipeline ───
// fetch manifest → validate Minecraft dir → check Forge → download mods.
// Each stage hands its result to the next; the first error ends the run.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::config::InstallerConfig;
use crate::core::downloader::{DownloadSummary, ModDownloader, RemoteSource};
use crate::core::error::InstallerError;
use crate::core::instance::MinecraftDir;
use crate::core::loaders::{ensure_forge, ForgeStatus, InstallerLauncher};
use crate::core::modpack::fetch_modpack;

/// Last stage the pipeline reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ManifestFetched,
    EnvironmentValidated,
    DependencyChecked,
    Downloading,
    Complete,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::ManifestFetched => "manifest fetched",
            Stage::EnvironmentValidated => "environment validated",
            Stage::DependencyChecked => "dependency checked",
            Stage::Downloading => "downloading",
            Stage::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Everything a successful run did.
#[derive(Debug)]
pub struct InstallReport {
    pub minecraft_dir: PathBuf,
    pub forge: ForgeStatus,
    pub downloads: DownloadSummary,
}

/// A run that ended in `Failed`. `stage` is the last stage the run reached.
#[derive(Debug)]
pub struct PipelineFailure {
    pub stage: Stage,
    pub error: InstallerError,
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after stage: {})", self.error, self.stage)
    }
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

pub struct Pipeline<'a> {
    config: &'a InstallerConfig,
    source: &'a dyn RemoteSource,
    launcher: &'a dyn InstallerLauncher,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a InstallerConfig,
        source: &'a dyn RemoteSource,
        launcher: &'a dyn InstallerLauncher,
    ) -> Self {
        Self {
            config,
            source,
            launcher,
        }
    }

    pub async fn run(&self) -> Result<InstallReport, PipelineFailure> {
        let mut stage = Stage::Start;
        let fail = |stage: Stage| {
            move |error: InstallerError| {
                debug!("Install failed after stage '{}': {}", stage, error);
                PipelineFailure { stage, error }
            }
        };

        let modpack = fetch_modpack(self.source, &self.config.manifest_url())
            .await
            .map_err(fail(stage))?;
        stage = advance(stage, Stage::ManifestFetched);

        let minecraft_dir = MinecraftDir::open(&self.config.minecraft_dir)
            .await
            .map_err(fail(stage))?;
        stage = advance(stage, Stage::EnvironmentValidated);

        let forge = ensure_forge(minecraft_dir.versions_dir(), &modpack, self.launcher)
            .await
            .map_err(fail(stage))?;
        stage = advance(stage, Stage::DependencyChecked);

        stage = advance(stage, Stage::Downloading);
        let mods_dir = minecraft_dir.mods_dir();
        let downloads = ModDownloader::new(self.source, &mods_dir)
            .install_all(&modpack.mod_sources)
            .await
            .map_err(fail(stage))?;
        advance(stage, Stage::Complete);

        info!(
            "Download Complete! {} downloaded, {} already installed",
            downloads.downloaded(),
            downloads.skipped()
        );

        Ok(InstallReport {
            minecraft_dir: minecraft_dir.root().to_path_buf(),
            forge,
            downloads,
        })
    }
}

fn advance(from: Stage, to: Stage) -> Stage {
    debug!("Pipeline: {} -> {}", from, to);
    to
}
