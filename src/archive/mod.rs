//! Fetch, normalize and persist events, then build browsable pages
//! from what is on disk.

pub mod download;
pub use download::{DownloadOutcome, Downloader};

pub mod event;
pub use event::ArchivedEvent;

pub mod group;
pub use group::{GroupReport, completed_event_ids};

pub mod naming;

pub mod record;
pub use record::*;

pub mod scan;
pub use scan::{ArchiveIndex, ScanReport, scan_archive};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use handlebars::Handlebars;
use reqwest::Client;
use serde_json::Value;

use crate::core::{AppConfig, Throttle};
use crate::meetup::{Endpoint, MeetupClient, queries};
use crate::render;

pub const RAW_FILE: &str = "raw.json";
pub const RECORD_FILE: &str = "event-data.json";
pub const MARKER_FILE: &str = "ID";
pub const PAGE_FILE: &str = "index.html";
pub const PHOTOS_DIR: &str = "photos";
pub const GROUP_EVENTS_FILE: &str = "events";

/// Runs the network-facing pipelines. Every remote query is followed
/// by a wait on the shared throttle and every asset fetch is preceded
/// by one.
pub struct Archiver {
    client: MeetupClient,
    downloader: Downloader,
    throttle: Arc<dyn Throttle>,
    templates: Handlebars<'static>,
    photos_query: String,
    verbose: bool,
}

impl Archiver {
    pub fn new(config: &AppConfig, throttle: Arc<dyn Throttle>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let photos_query = load_photos_query(Path::new(&config.photos_query_path))?;

        Ok(Self {
            client: MeetupClient::from_config(http.clone(), config),
            downloader: Downloader::new(http, Arc::clone(&throttle)),
            throttle,
            templates: render::templates(),
            photos_query,
            verbose: config.verbose,
        })
    }

    /// Query then wait, whether or not the query succeeded.
    async fn fetch(&self, query: &str, variables: Value, endpoint: Endpoint) -> Result<Value> {
        let result = self.client.query(query, variables, endpoint).await;
        self.throttle.wait().await;
        result
    }
}

fn load_photos_query(path: &Path) -> Result<String> {
    if path.is_file() {
        tracing::debug!("Using legacy photos query from {}", path.display());
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    Ok(queries::LEGACY_PHOTOS_QUERY.to_string())
}

pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_photos_query_prefers_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("photos.graphql");
        assert_eq!(load_photos_query(&path)?, queries::LEGACY_PHOTOS_QUERY);

        fs::write(&path, "query { custom }")?;
        assert_eq!(load_photos_query(&path)?, "query { custom }");
        Ok(())
    }
}
