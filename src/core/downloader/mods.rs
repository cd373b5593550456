// ─── Mod Downloader ───
// Places each mod jar from the manifest into the mods folder, skipping the
// ones that are already there.

use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::{info, warn};

use super::client::RemoteSource;
use crate::core::error::{InstallerError, InstallerResult};

/// What happened to a single mod source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    AlreadyInstalled { path: PathBuf },
}

#[derive(Debug, Default, Clone)]
pub struct DownloadSummary {
    pub outcomes: Vec<ModOutcome>,
}

impl DownloadSummary {
    pub fn downloaded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ModOutcome::Downloaded { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.downloaded()
    }
}

/// Sequential downloader bound to one mods directory.
pub struct ModDownloader<'a> {
    source: &'a dyn RemoteSource,
    mods_dir: &'a Path,
}

impl<'a> ModDownloader<'a> {
    pub fn new(source: &'a dyn RemoteSource, mods_dir: &'a Path) -> Self {
        Self { source, mods_dir }
    }

    /// Install every mod in order. The first failure aborts the rest; files
    /// already placed stay where they are.
    pub async fn install_all(&self, mod_sources: &[String]) -> InstallerResult<DownloadSummary> {
        let mut summary = DownloadSummary::default();
        for url in mod_sources {
            let outcome = self.install_one(url).await?;
            summary.outcomes.push(outcome);
        }
        Ok(summary)
    }

    pub async fn install_one(&self, url: &str) -> InstallerResult<ModOutcome> {
        let file_name = file_name_from_url(url)?;
        let dest = self.mods_dir.join(&file_name);

        if dest.exists() {
            info!("{} is already installed", file_name);
            return Ok(ModOutcome::AlreadyInstalled { path: dest });
        }

        info!("Downloading {}...", file_name);

        // Never expose a partial file under the final name: a truncated jar
        // would pass the existence check on the next run.
        let partial = self
            .mods_dir
            .join(format!(".{}.{}.part", file_name, uuid::Uuid::new_v4().simple()));

        let bytes = match self.source.download_to(url, &partial).await {
            Ok(bytes) => bytes,
            Err(e) => {
                discard_partial(&partial).await;
                return Err(e.into_download(url));
            }
        };

        if let Err(source) = tokio::fs::rename(&partial, &dest).await {
            discard_partial(&partial).await;
            return Err(InstallerError::Io {
                path: dest.clone(),
                source,
            }
            .into_download(url));
        }

        Ok(ModOutcome::Downloaded { path: dest, bytes })
    }
}

async fn discard_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove partial download {:?}: {}", path, e),
    }
}

/// Final path segment of a mod URL, used as the on-disk file name.
///
/// Query strings and fragments are not part of the name. Segments are kept
/// percent-encoded as served.
pub fn file_name_from_url(url: &str) -> InstallerResult<String> {
    let invalid = |reason: &str| InstallerError::Download {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(url).map_err(|e| invalid(&format!("invalid URL: {}", e)))?;
    let name = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    if name.is_empty() || name == "." || name == ".." {
        return Err(invalid("URL has no file name"));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::core::error::ErrorClass;

    /// Serves `<url> -> body` for known URLs and fails for anything in `broken`.
    #[derive(Default)]
    struct RecordingSource {
        broken: HashSet<String>,
        requested: Mutex<Vec<String>>,
    }

    impl RecordingSource {
        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RemoteSource for RecordingSource {
        async fn fetch_bytes(&self, url: &str) -> InstallerResult<Vec<u8>> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(url.as_bytes().to_vec())
        }

        async fn download_to(&self, url: &str, dest: &Path) -> InstallerResult<u64> {
            self.requested.lock().unwrap().push(url.to_string());
            let io_err = |source| InstallerError::Io {
                path: dest.to_path_buf(),
                source,
            };
            // Half-written file before failing, like a dropped connection.
            tokio::fs::write(dest, b"partial").await.map_err(io_err)?;
            if self.broken.contains(url) {
                return Err(InstallerError::HttpStatus {
                    url: url.to_string(),
                    status: 503,
                });
            }
            tokio::fs::write(dest, url.as_bytes())
                .await
                .map_err(io_err)?;
            Ok(url.len() as u64)
        }
    }

    /// Collects formatted log output so notices can be asserted on.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn file_name_is_last_segment_without_query() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/mods/jei-1.12.2.jar?token=abc#x").unwrap(),
            "jei-1.12.2.jar"
        );
        assert_eq!(file_name_from_url("https://x/a.jar").unwrap(), "a.jar");
    }

    #[test]
    fn file_name_rejects_directory_urls() {
        let err = file_name_from_url("https://x/mods/").unwrap_err();
        assert_eq!(err.class(), ErrorClass::Download);
        assert!(file_name_from_url("not a url").is_err());
    }

    #[tokio::test]
    async fn existing_mod_is_left_untouched_and_only_missing_one_downloads() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("a.jar");
        std::fs::write(&existing, b"original bytes").unwrap();

        let source = RecordingSource::default();
        let downloader = ModDownloader::new(&source, dir.path());
        let summary = downloader
            .install_all(&urls(&["https://x/a.jar", "https://x/b.jar"]))
            .await
            .unwrap();

        assert_eq!(source.requested(), vec!["https://x/b.jar".to_string()]);
        assert_eq!(std::fs::read(&existing).unwrap(), b"original bytes");
        assert_eq!(
            summary.outcomes[0],
            ModOutcome::AlreadyInstalled { path: existing }
        );
        assert_eq!(summary.downloaded(), 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(
            std::fs::read(dir.path().join("b.jar")).unwrap(),
            b"https://x/b.jar"
        );
    }

    #[tokio::test]
    async fn skipped_mod_emits_already_installed_notice() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jar"), b"original bytes").unwrap();

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let source = RecordingSource::default();
        ModDownloader::new(&source, dir.path())
            .install_all(&urls(&["https://x/a.jar", "https://x/b.jar"]))
            .await
            .unwrap();

        let output = logs.contents();
        assert!(output.contains("a.jar is already installed"), "{output}");
        assert!(output.contains("Downloading b.jar..."), "{output}");
        assert!(!output.contains("b.jar is already installed"), "{output}");
    }

    #[tokio::test]
    async fn failure_aborts_remaining_downloads_and_keeps_earlier_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = RecordingSource {
            broken: HashSet::from(["https://x/b.jar".to_string()]),
            ..Default::default()
        };

        let downloader = ModDownloader::new(&source, dir.path());
        let err = downloader
            .install_all(&urls(&[
                "https://x/a.jar",
                "https://x/b.jar",
                "https://x/c.jar",
            ]))
            .await
            .unwrap_err();

        assert_eq!(err.class(), ErrorClass::Download);
        assert_eq!(
            source.requested(),
            urls(&["https://x/a.jar", "https://x/b.jar"])
        );
        assert_eq!(
            std::fs::read(dir.path().join("a.jar")).unwrap(),
            b"https://x/a.jar"
        );
        assert!(!dir.path().join("b.jar").exists());
        assert!(!dir.path().join("c.jar").exists());

        // No leftover partial files either.
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(leftovers, vec!["a.jar".to_string()]);
    }
}
