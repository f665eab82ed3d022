//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use meetup_archive::core::{AppConfig, Throttle};

/// Config pointing both GraphQL endpoints at a mock server and all
/// storage at `storage_path`.
pub fn test_config(server_url: &str, storage_path: &Path) -> AppConfig {
    AppConfig {
        storage_path: storage_path.display().to_string(),
        api_url: format!("{}/gql-ext", server_url),
        legacy_api_url: format!("{}/gql", server_url),
        sleep_millis: 0,
        verbose: true,
        archive_title: String::from("SGV Hikers Archive"),
        photos_query_path: storage_path.join("photos.graphql").display().to_string(),
    }
}

/// Load `tests/data/<name>`, substituting `SERVER_URL` so photo URLs
/// resolve against the mock server.
pub fn fixture(name: &str, server_url: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Missing fixture {}", path.display()))
        .replace("SERVER_URL", server_url)
}

/// Records, at every wait, whether a completion marker exists yet.
pub struct MarkerProbe {
    marker: PathBuf,
    seen: Mutex<Vec<bool>>,
}

impl MarkerProbe {
    pub fn new(marker: PathBuf) -> Self {
        Self {
            marker,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn waits(&self) -> Vec<bool> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Throttle for MarkerProbe {
    async fn wait(&self) {
        let exists = self.marker.exists();
        self.seen.lock().unwrap().push(exists);
    }
}
