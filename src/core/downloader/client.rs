use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{InstallerError, InstallerResult};

/// Transport seam between the pipeline and the network.
///
/// The pipeline only ever asks for two things: a small document held in
/// memory (the manifest) and a file streamed to disk (a mod jar).
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// GET `url` and return the whole body.
    async fn fetch_bytes(&self, url: &str) -> InstallerResult<Vec<u8>>;

    /// GET `url` and write the body to `dest`, returning the byte count.
    /// `dest` is created or truncated.
    async fn download_to(&self, url: &str, dest: &Path) -> InstallerResult<u64>;
}

/// `reqwest`-backed source used by the real installer.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> InstallerResult<reqwest::Response> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstallerError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch_bytes(&self, url: &str) -> InstallerResult<Vec<u8>> {
        let bytes = self.get(url).await?.bytes().await?;
        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    async fn download_to(&self, url: &str, dest: &Path) -> InstallerResult<u64> {
        let response = self.get(url).await?;
        let io_err = |source| InstallerError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let mut written = 0u64;
        // Scoped so the handle is closed before the caller renames the file.
        {
            let mut file = tokio::fs::File::create(dest).await.map_err(io_err)?;
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await.map_err(io_err)?;
                written += chunk.len() as u64;
            }
            file.flush().await.map_err(io_err)?;
            file.sync_all().await.map_err(io_err)?;
        }

        debug!("Downloaded: {} -> {:?} ({} bytes)", url, dest, written);
        Ok(written)
    }
}
