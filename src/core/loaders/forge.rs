// ─── Forge Check ───
// Makes sure the Forge version the modpack targets is installed locally.

use std::path::PathBuf;

use tracing::{info, warn};

use super::installer::InstallerLauncher;
use crate::core::error::{InstallerError, InstallerResult};
use crate::core::modpack::Modpack;
use crate::core::version::find_installed_version;

/// Result of a successful Forge check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForgeStatus {
    /// A version descriptor with the required `id` was found.
    Installed { descriptor: PathBuf },
    /// Not installed; the modpack's installer was handed to the OS and the
    /// run carries on without knowing whether it succeeded.
    InstallerLaunched { installer: String },
}

/// Look for `modpack.forge_version` under `versions_dir`.
///
/// When it's missing and the modpack ships an installer, the installer is
/// launched detached and the check still succeeds. Without an installer the
/// check fails with `DependencyMismatch`.
pub async fn ensure_forge(
    versions_dir: PathBuf,
    modpack: &Modpack,
    launcher: &dyn InstallerLauncher,
) -> InstallerResult<ForgeStatus> {
    let required = modpack.forge_version.clone();
    let found = {
        let required = required.clone();
        let scan_dir = versions_dir.clone();
        tokio::task::spawn_blocking(move || find_installed_version(&scan_dir, &required))
            .await
            .map_err(|e| InstallerError::Io {
                path: versions_dir,
                source: std::io::Error::other(e),
            })?
    };

    if let Some(descriptor) = found {
        info!("The correct version of forge is installed.");
        return Ok(ForgeStatus::Installed { descriptor });
    }

    let Some(installer) = modpack.forge_installer.clone() else {
        return Err(InstallerError::DependencyMismatch { required });
    };

    warn!(
        "Forge {} is not installed, launching installer {}",
        required, installer
    );
    if let Err(e) = launcher.launch(&installer) {
        warn!("Could not launch Forge installer {}: {}", installer, e);
    }
    Ok(ForgeStatus::InstallerLaunched { installer })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::core::error::ErrorClass;

    #[derive(Default)]
    struct RecordingLauncher {
        launched: Mutex<Vec<String>>,
        fail: bool,
    }

    impl InstallerLauncher for RecordingLauncher {
        fn launch(&self, target: &str) -> std::io::Result<()> {
            self.launched.lock().unwrap().push(target.to_string());
            if self.fail {
                return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no opener"));
            }
            Ok(())
        }
    }

    fn modpack(installer: Option<&str>) -> Modpack {
        Modpack {
            forge_version: "forge-1.2.3".into(),
            mod_sources: Vec::new(),
            forge_installer: installer.map(str::to_string),
        }
    }

    fn versions_with(ids: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for id in ids {
            let sub = dir.path().join(id);
            std::fs::create_dir_all(&sub).unwrap();
            std::fs::write(sub.join(format!("{id}.json")), format!(r#"{{"id":"{id}"}}"#))
                .unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn installed_forge_does_not_launch_installer() {
        let dir = versions_with(&["other", "forge-1.2.3"]);
        let launcher = RecordingLauncher::default();

        let status = ensure_forge(
            dir.path().to_path_buf(),
            &modpack(Some("https://x/i.jar")),
            &launcher,
        )
        .await
        .unwrap();

        assert!(matches!(status, ForgeStatus::Installed { .. }));
        assert!(launcher.launched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_forge_without_installer_is_mismatch() {
        let dir = versions_with(&["other"]);
        let launcher = RecordingLauncher::default();

        let err = ensure_forge(dir.path().to_path_buf(), &modpack(None), &launcher)
            .await
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::DependencyMismatch);
    }

    #[tokio::test]
    async fn missing_forge_with_installer_launches_and_continues() {
        let dir = versions_with(&["other"]);
        let launcher = RecordingLauncher {
            fail: true,
            ..Default::default()
        };

        let status = ensure_forge(
            dir.path().to_path_buf(),
            &modpack(Some("https://x/i.jar")),
            &launcher,
        )
        .await
        .unwrap();

        assert_eq!(
            status,
            ForgeStatus::InstallerLaunched {
                installer: "https://x/i.jar".into()
            }
        );
        assert_eq!(
            *launcher.launched.lock().unwrap(),
            vec!["https://x/i.jar".to_string()]
        );
    }
}
