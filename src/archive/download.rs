use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::core::Throttle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The destination already held the asset; nothing was requested.
    Skipped,
    /// The asset was fetched and written; carries the byte count.
    Fetched(u64),
}

/// An asset counts as fetched iff its path exists and is non-empty.
/// Zero-byte leftovers from an interrupted run are fetched again.
pub fn is_fetched(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

pub struct Downloader {
    http: Client,
    throttle: Arc<dyn Throttle>,
}

impl Downloader {
    pub fn new(http: Client, throttle: Arc<dyn Throttle>) -> Self {
        Self { http, throttle }
    }

    /// Stream `url` into `dest` unless `dest` is already fetched.
    /// Waits on the throttle before every network request. On failure
    /// the partial file is removed and the error is returned.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<DownloadOutcome> {
        if is_fetched(dest) {
            tracing::debug!("Skipping download of {} to {}", url, dest.display());
            return Ok(DownloadOutcome::Skipped);
        }

        self.throttle.wait().await;

        match self.stream_to_file(url, dest).await {
            Ok(bytes) => Ok(DownloadOutcome::Fetched(bytes)),
            Err(err) => {
                let _ = tokio::fs::remove_file(dest).await;
                Err(err)
            }
        }
    }

    async fn stream_to_file(&self, url: &str, dest: &Path) -> Result<u64> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request for {} failed", url))?;
        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("Download of {} failed: {}", url, status);
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .with_context(|| format!("Failed to create {}", dest.display()))?;
        let mut written = 0u64;
        let mut stream = res.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.with_context(|| format!("Download of {} was interrupted", url))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }
}
