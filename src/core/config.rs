use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_API_URL: &str = "https://api.meetup.com/gql-ext";
const DEFAULT_LEGACY_API_URL: &str = "https://api.meetup.com/gql";
const DEFAULT_SLEEP_MILLIS: u64 = 5000;
const DEFAULT_ARCHIVE_TITLE: &str = "Meetup Events Archive";

pub const DOWNLOADS_DIR: &str = "downloads";
pub const ATTENDEES_DIR: &str = "attendees";
pub const INDEX_FILE: &str = "index.html";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub api_url: String,
    pub legacy_api_url: String,
    pub sleep_millis: u64,
    pub verbose: bool,
    pub archive_title: String,
    pub photos_query_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("ARCHIVE_STORAGE_PATH").unwrap_or("./".to_string());
        let api_url = env::var("MEETUP_API_URL").unwrap_or(DEFAULT_API_URL.to_string());
        let legacy_api_url =
            env::var("MEETUP_LEGACY_API_URL").unwrap_or(DEFAULT_LEGACY_API_URL.to_string());
        let sleep_millis = parse_sleep_millis(env::var("SLEEP_MILLIS").ok().as_deref());
        let verbose = parse_verbose(env::var("VERBOSE").ok().as_deref());
        let archive_title =
            env::var("ARCHIVE_TITLE").unwrap_or_else(|_| DEFAULT_ARCHIVE_TITLE.to_string());
        let photos_query_path = env::var("MEETUP_PHOTOS_QUERY")
            .unwrap_or_else(|_| format!("{}/photos.graphql", storage_path.trim_end_matches('/')));

        Self {
            storage_path,
            api_url,
            legacy_api_url,
            sleep_millis,
            verbose,
            archive_title,
            photos_query_path,
        }
    }
}

impl AppConfig {
    fn root(&self) -> &Path {
        Path::new(&self.storage_path)
    }

    /// Output root for `event` and input root for `scan`.
    pub fn downloads_path(&self) -> PathBuf {
        self.root().join(DOWNLOADS_DIR)
    }

    pub fn group_path(&self, group_id: &str) -> PathBuf {
        self.root().join(group_id)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root().join(INDEX_FILE)
    }

    pub fn attendees_path(&self) -> PathBuf {
        self.root().join(ATTENDEES_DIR)
    }
}

fn parse_sleep_millis(value: Option<&str>) -> u64 {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_SLEEP_MILLIS)
}

fn parse_verbose(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1") | Some("true"))
}
